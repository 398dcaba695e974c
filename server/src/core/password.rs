use async_trait::async_trait;
use common::{
    api::{self, AnalyzePassword, AnalyzePasswordRet},
    strength::Strength,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{request_dispatcher::Handler, state::State};

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Model used to score passwords that pass the length rules.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Estimator {
    #[default]
    Zxcvbn,
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composition {
    pub length: usize,
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl Composition {
    pub fn of(password: &str) -> Self {
        Self {
            length: password.chars().count(),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }

    pub fn class_count(&self) -> usize {
        [self.has_lowercase, self.has_uppercase, self.has_digit, self.has_special]
            .iter()
            .filter(|b| **b)
            .count()
    }

    pub fn has_all_classes(&self) -> bool {
        self.class_count() == 4
    }

    pub fn charset_size(&self) -> u32 {
        let mut size = 0;
        if self.has_lowercase { size += 26 }
        if self.has_uppercase { size += 26 }
        if self.has_digit { size += 10 }
        if self.has_special { size += 30 }
        size
    }
}

fn heuristic_score(c: &Composition) -> Strength {
    match c.class_count() {
        0 | 1 => Strength::Weak,
        2 | 3 => Strength::Moderate,
        _ if c.length >= 12 => Strength::VeryStrong,
        _ => Strength::Strong,
    }
}

pub fn predict_strength(password: &str, estimator: Estimator) -> Strength {
    let c = Composition::of(password);

    // short passwords are never strong, whatever the estimator says
    if c.length < 4 {
        return Strength::VeryWeak;
    }
    if c.length < 8 {
        return Strength::Weak;
    }

    let predicted = match estimator {
        Estimator::Heuristic => heuristic_score(&c),
        Estimator::Zxcvbn => match zxcvbn::zxcvbn(password, &[]) {
            Ok(entropy) => Strength::saturating(entropy.score()),
            Err(e) => {
                warn!("zxcvbn failed, using heuristic: {}", e);
                heuristic_score(&c)
            }
        },
    };

    if predicted >= Strength::Strong && !c.has_all_classes() {
        Strength::Moderate
    } else {
        predicted
    }
}

/// `length * log2(charset)` in bits, rounded to one decimal.
pub fn entropy(c: &Composition) -> f64 {
    let charset = c.charset_size();
    if charset == 0 {
        return 0.0;
    }
    let bits = c.length as f64 * (charset as f64).log2();
    (bits * 10.0).round() / 10.0
}

pub fn feedback(c: &Composition, strength: Strength) -> Vec<String> {
    let mut feedback = Vec::new();
    if c.length < 8 {
        feedback.push("Password is too short (minimum 8 characters recommended)");
    }
    if !c.has_lowercase {
        feedback.push("Add lowercase letters");
    }
    if !c.has_uppercase {
        feedback.push("Add uppercase letters");
    }
    if !c.has_digit {
        feedback.push("Add numbers");
    }
    if !c.has_special {
        feedback.push("Add special characters");
    }
    if feedback.is_empty() && strength < Strength::Strong {
        feedback.push("Avoid common patterns and dictionary words");
    }
    if c.length >= 12 && c.has_all_classes() {
        feedback.push("Good password complexity");
    }
    feedback.into_iter().map(str::to_owned).collect()
}

pub fn analyze_password(password: &str, estimator: Estimator) -> AnalyzePasswordRet {
    let c = Composition::of(password);
    let strength = predict_strength(password, estimator);

    AnalyzePasswordRet {
        strength: strength.score() as i64,
        rating: strength.label().to_owned(),
        length: c.length,
        has_lowercase: c.has_lowercase,
        has_uppercase: c.has_uppercase,
        has_digit: c.has_digit,
        has_special: c.has_special,
        entropy: entropy(&c),
        feedback: feedback(&c, strength),
    }
}

#[async_trait]
impl Handler for AnalyzePassword {
    async fn handle(self, state: &State) -> api::Result<Self::Ret> {
        let ret = analyze_password(&self.password, state.config.password_estimator);
        debug!(strength = ret.strength, entropy = ret.entropy);
        Ok(ret)
    }

    fn fallback(e: &api::Error) -> Option<serde_json::Value> {
        match e {
            api::Error::NoPasswordProvided => serde_json::to_value(api::NoPasswordRet::default()).ok(),
            _ => None,
        }
    }
}
