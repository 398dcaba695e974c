use std::{sync::Arc, time::Duration};

use common::{
    algorithm::HashAlgorithm,
    consts::COPY_FEEDBACK_SECS,
    api::{CalculateChecksum, CalculateChecksumRet, Upload, VerifyChecksum, VerifyChecksumRet},
};
use tokio::time::Instant;
use tracing::info;

use super::{report_failure, Alerts, Panel};
use crate::{
    api_client::Backend,
    clipboard::{copy_to_clipboard, Clipboard},
    view,
};

/// How long the copy button reads "Copied!".
pub const COPIED_LABEL_LIFETIME: Duration = Duration::from_secs(COPY_FEEDBACK_SECS);

#[derive(Debug)]
pub struct Section<T> {
    pub alerts: Alerts,
    pub panel: Panel<T>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            alerts: Alerts::default(),
            panel: Panel::Empty,
        }
    }
}

/// File integrity checker: one section computing a checksum, one verifying it.
#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct ChecksumController<B: Backend> {
    #[derivative(Debug = "ignore")]
    backend: Arc<B>,
    pub calc: Section<CalculateChecksumRet>,
    pub verify: Section<VerifyChecksumRet>,
    copied_at: Option<Instant>,
}

impl<B: Backend> ChecksumController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            calc: Section::default(),
            verify: Section::default(),
            copied_at: None,
        }
    }

    pub async fn calculate(&mut self, file: Option<Upload>, algorithm: HashAlgorithm) {
        let file = match file {
            Some(f) => f,
            None => return self.calc.alerts.warning("Please select a file"),
        };

        self.calc.panel = Panel::Loading("Calculating checksum...");
        self.copied_at = None;
        let req = CalculateChecksum {
            file,
            algorithm: algorithm.id().to_owned(),
        };
        match self.backend.call(req).await {
            Ok(ret) => {
                info!(filename = %ret.filename, "checksum calculated");
                self.calc.panel = Panel::Ready(ret);
            }
            Err(e) => {
                report_failure(&mut self.calc.alerts, &e, "Error calculating checksum. Please try again.");
                self.calc.panel = Panel::Empty;
            }
        }
    }

    pub async fn verify(&mut self, file: Option<Upload>, algorithm: HashAlgorithm, expected: &str) {
        let expected = expected.trim();
        let file = match file {
            Some(f) => f,
            None => return self.verify.alerts.warning("Please select a file"),
        };
        if expected.is_empty() {
            return self.verify.alerts.warning("Please enter a checksum to verify against");
        }

        self.verify.panel = Panel::Loading("Verifying checksum...");
        let req = VerifyChecksum {
            file,
            algorithm: algorithm.id().to_owned(),
            checksum: expected.to_owned(),
        };
        match self.backend.call(req).await {
            Ok(ret) => {
                info!(filename = %ret.filename, is_valid = ret.is_valid, "checksum verified");
                self.verify.panel = Panel::Ready(ret);
            }
            Err(e) => {
                report_failure(&mut self.verify.alerts, &e, "Error verifying checksum. Please try again.");
                self.verify.panel = Panel::Empty;
            }
        }
    }

    /// Copies the last computed checksum. Returns false when there is none.
    pub fn copy_checksum(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        let checksum = match self.calc.panel.ready() {
            Some(ret) => ret.checksum.clone(),
            None => return false,
        };
        let copied_at = &mut self.copied_at;
        copy_to_clipboard(clipboard, &checksum, |res| {
            if res.is_ok() {
                *copied_at = Some(Instant::now());
            }
        });
        true
    }

    pub fn copy_label(&self) -> &'static str {
        if self.show_copied(Instant::now()) {
            "Copied!"
        } else {
            "Copy"
        }
    }

    fn show_copied(&self, now: Instant) -> bool {
        self.copied_at
            .map_or(false, |t| now.duration_since(t) < COPIED_LABEL_LIFETIME)
    }

    pub fn calc_html(&self) -> view::Result<String> {
        let copied = self.show_copied(Instant::now());
        Ok(format!(
            "{}{}",
            self.calc.alerts.html()?,
            self.calc.panel.html(|ret| view::checksum_result(ret, copied))?
        ))
    }

    pub fn verify_html(&self) -> view::Result<String> {
        Ok(format!(
            "{}{}",
            self.verify.alerts.html()?,
            self.verify.panel.html(view::verify_result)?
        ))
    }
}
