use common::{
    api::{AnalyzePasswordRet, Breach, CalculateChecksumRet, VerifyChecksumRet},
    strength,
};
use minijinja::context;

use super::{info_card, render, Kind, Result};
use crate::{controller::password::StrengthMeter, crack_time::estimate_crack_time};

const CHECKSUM_EXPLAINER: &str = r#"<p>A checksum (or hash) is a string of characters derived from a file's contents.
Even a tiny change to the file will produce a completely different checksum. This makes
checksums ideal for:</p>
<ul>
  <li><strong>Verifying file integrity</strong> - Confirm a file hasn't been corrupted during download</li>
  <li><strong>Detecting unauthorized changes</strong> - Identify if a file has been tampered with</li>
  <li><strong>Validating authenticity</strong> - Ensure a file matches the original source</li>
</ul>
<div class="alert alert-primary">
  <i class="bi bi-info-circle-fill me-2"></i>
  Share this checksum with anyone who receives your file so they can verify its integrity.
</div>"#;

const VERIFY_FAILURE_HELP: &str = r#"<p>There are several reasons why the checksum verification might have failed:</p>
<ul>
  <li><strong>Download corruption</strong> - The file may have been corrupted during download</li>
  <li><strong>File modification</strong> - The file may have been modified since the original checksum was created</li>
  <li><strong>Incorrect checksum provided</strong> - The expected checksum may have been entered incorrectly</li>
  <li><strong>Wrong algorithm selected</strong> - Make sure you're using the same algorithm that was used to generate the original checksum</li>
</ul>
<div class="alert alert-info">
  <i class="bi bi-info-circle-fill me-2"></i>
  Try downloading the file again or verifying the expected checksum value.
</div>"#;

const PASSWORD_INSIGHTS: &str = r#"<h6>Why Password Strength Matters</h6>
<p>Strong passwords are your first line of defense against unauthorized access.
Weak passwords can be cracked through various methods:</p>
<ul>
  <li><strong>Dictionary Attacks</strong>: Trying common words and phrases</li>
  <li><strong>Brute Force</strong>: Systematically trying all possible combinations</li>
  <li><strong>Social Engineering</strong>: Using personal information to guess passwords</li>
</ul>
<h6>Password Best Practices</h6>
<ul>
  <li>Use a <strong>unique password</strong> for each account</li>
  <li>Aim for <strong>at least 12 characters</strong></li>
  <li>Include a <strong>mix of character types</strong></li>
  <li>Consider using a <strong>password manager</strong></li>
  <li>Enable <strong>multi-factor authentication</strong> where available</li>
</ul>
<h6>The Challenge of Human Memory</h6>
<p>Humans struggle to remember complex random strings, which leads to insecure practices like reusing
passwords or using simple variations. Password managers solve this problem by generating and storing
strong unique passwords for each service.</p>"#;

/// Spinner shown while a request is in flight.
pub fn loading(text: &str) -> Result<String> {
    render("loading.html", context! { text })
}

pub fn checksum_result(ret: &CalculateChecksumRet, copied: bool) -> Result<String> {
    let explainer = info_card("What is a File Checksum?", CHECKSUM_EXPLAINER, Kind::Info)?;
    render(
        "checksum_result.html",
        context! {
            filename => ret.filename,
            algorithm => ret.algorithm,
            checksum => ret.checksum,
            copied,
            explainer,
        },
    )
}

pub fn verify_result(ret: &VerifyChecksumRet) -> Result<String> {
    let status = if ret.is_valid { Kind::Success } else { Kind::Danger };
    let failure_help = info_card("Why Did Verification Fail?", VERIFY_FAILURE_HELP, Kind::Warning)?;
    render(
        "verify_result.html",
        context! {
            filename => ret.filename,
            is_valid => ret.is_valid,
            provided_checksum => ret.provided_checksum,
            calculated_checksum => ret.calculated_checksum,
            status => status.as_ref(),
            failure_help,
        },
    )
}

pub fn password_report(ret: &AnalyzePasswordRet) -> Result<String> {
    let classes = [
        ("Lowercase Letters", ret.has_lowercase),
        ("Uppercase Letters", ret.has_uppercase),
        ("Numbers", ret.has_digit),
        ("Special Characters", ret.has_special),
    ];
    let entropy_width = (ret.entropy / 128.0 * 100.0).clamp(0.0, 100.0);
    let report = render(
        "password_report.html",
        context! {
            rating => ret.rating,
            text_class => strength::text_class(ret.strength),
            length => ret.length,
            classes,
            entropy => ret.entropy,
            entropy_width,
            crack_time => estimate_crack_time(ret.entropy),
        },
    )?;
    let insights = info_card("Educational Insights", PASSWORD_INSIGHTS, Kind::Info)?;
    Ok(format!("{}\n{}", report, insights))
}

/// `None` renders the placeholder shown before any analysis.
pub fn feedback_list(items: Option<&[String]>) -> Result<String> {
    render(
        "feedback_list.html",
        context! { placeholder => items.is_none(), items => items.unwrap_or_default() },
    )
}

pub fn strength_meter(meter: &StrengthMeter) -> Result<String> {
    render("strength_meter.html", minijinja::Value::from_serialize(meter))
}

pub fn breach_list(breaches: &[Breach]) -> Result<String> {
    render("breach_list.html", context! { breaches })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(strength: i64, entropy: f64) -> AnalyzePasswordRet {
        AnalyzePasswordRet {
            strength,
            rating: strength::label(strength).to_owned(),
            length: 8,
            has_lowercase: true,
            has_uppercase: false,
            has_digit: true,
            has_special: false,
            entropy,
            feedback: vec![],
        }
    }

    #[test]
    fn checksum_result_shows_upper_case_algorithm() {
        let ret = CalculateChecksumRet {
            filename: "notes.txt".into(),
            algorithm: "sha3_256".into(),
            checksum: "abcdef".into(),
        };
        let html = checksum_result(&ret, false).unwrap();
        assert!(html.contains("Checksum Generated"));
        assert!(html.contains("SHA3_256"));
        assert!(html.contains("notes.txt"));
        assert!(html.contains("abcdef"));
        assert!(html.contains("What is a File Checksum?"));
        assert!(html.contains("Copy"));
        assert!(!html.contains("Copied!"));

        assert!(checksum_result(&ret, true).unwrap().contains("Copied!"));
    }

    #[test]
    fn verify_result_banners() {
        let mut ret = VerifyChecksumRet {
            filename: "a.iso".into(),
            is_valid: true,
            provided_checksum: "AB".into(),
            calculated_checksum: "ab".into(),
        };
        let html = verify_result(&ret).unwrap();
        assert!(html.contains("Verification Successful"));
        assert!(html.contains("bg-success bg-opacity-25 text-success"));
        assert!(!html.contains("Why Did Verification Fail?"));

        ret.is_valid = false;
        let html = verify_result(&ret).unwrap();
        assert!(html.contains("Verification Failed"));
        assert!(html.contains("alert alert-danger"));
        assert!(html.contains("Why Did Verification Fail?"));
    }

    #[test]
    fn password_report_fragment() {
        let html = password_report(&report(3, 52.2)).unwrap();
        assert!(html.contains(r#"class="fs-4 fw-bold text-primary""#));
        assert!(html.contains("Strong"));
        assert!(html.contains("8 characters"));
        assert!(html.contains("52.2 bits"));
        assert!(html.contains("Educational Insights"));
        assert!(html.contains(&estimate_crack_time(52.2)));

        let html = password_report(&report(9, 300.0)).unwrap();
        assert!(html.contains("text-secondary"));
        assert!(html.contains("width: 100"));
    }

    #[test]
    fn feedback_is_escaped() {
        let items = vec!["<script>".to_owned()];
        let html = feedback_list(Some(&items)).unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("Enter a password above"));

        let html = feedback_list(None).unwrap();
        assert!(html.contains("Enter a password above to receive analysis and recommendations."));
    }

    #[test]
    fn empty_breach_list() {
        assert!(breach_list(&[]).unwrap().contains("No breaches found"));
    }
}
