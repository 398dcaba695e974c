use serde::{Deserialize, Serialize};

/// The 0-4 password strength scale shared by the analyzer and the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Strength {
    VeryWeak = 0,
    Weak = 1,
    Moderate = 2,
    Strong = 3,
    VeryStrong = 4,
}

pub const UNKNOWN_LABEL: &str = "Unknown";
pub const UNKNOWN_COLOR: &str = "secondary";

impl Strength {
    pub const MAX: Strength = Strength::VeryStrong;

    pub fn from_score(score: i64) -> Option<Self> {
        match score {
            0 => Some(Strength::VeryWeak),
            1 => Some(Strength::Weak),
            2 => Some(Strength::Moderate),
            3 => Some(Strength::Strong),
            4 => Some(Strength::VeryStrong),
            _ => None,
        }
    }

    /// Scores above the scale saturate, used where a rating must always exist.
    pub fn saturating(score: u8) -> Self {
        Self::from_score(score.min(Strength::MAX as u8) as i64).unwrap_or(Strength::MAX)
    }

    pub fn score(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::VeryWeak => "Very Weak",
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        }
    }

    /// Bootstrap contextual color.
    pub fn color(self) -> &'static str {
        match self {
            Strength::VeryWeak => "danger",
            Strength::Weak => "warning",
            Strength::Moderate => "info",
            Strength::Strong => "primary",
            Strength::VeryStrong => "success",
        }
    }
}

impl From<Strength> for u8 {
    fn from(s: Strength) -> u8 {
        s.score()
    }
}

impl TryFrom<u8> for Strength {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Strength::from_score(v as i64).ok_or_else(|| format!("strength out of range: {}", v))
    }
}

// total mappings over raw scores, as received from the wire

pub fn label(score: i64) -> &'static str {
    Strength::from_score(score).map_or(UNKNOWN_LABEL, Strength::label)
}

pub fn color(score: i64) -> &'static str {
    Strength::from_score(score).map_or(UNKNOWN_COLOR, Strength::color)
}

pub fn text_class(score: i64) -> String {
    format!("text-{}", color(score))
}
