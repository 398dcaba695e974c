use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Digests offered by the file integrity checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum HashAlgorithm {
    #[strum(serialize = "md5")]
    #[serde(rename = "md5")]
    Md5,
    #[strum(serialize = "sha1")]
    #[serde(rename = "sha1")]
    Sha1,
    #[default]
    #[strum(serialize = "sha256")]
    #[serde(rename = "sha256")]
    Sha256,
    #[strum(serialize = "sha384")]
    #[serde(rename = "sha384")]
    Sha384,
    #[strum(serialize = "sha512")]
    #[serde(rename = "sha512")]
    Sha512,
    #[strum(serialize = "sha3_256")]
    #[serde(rename = "sha3_256")]
    Sha3_256,
    #[strum(serialize = "sha3_512")]
    #[serde(rename = "sha3_512")]
    Sha3_512,
}

impl HashAlgorithm {
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Unknown ids silently fall back to SHA-256, the server never rejects an algorithm.
    pub fn from_id_or_default(id: &str) -> Self {
        id.parse().unwrap_or_default()
    }

    /// Length of the hex digest.
    pub fn hex_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha256 | HashAlgorithm::Sha3_256 => 64,
            HashAlgorithm::Sha384 => 96,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 => 128,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum CipherAlgorithm {
    #[default]
    #[strum(serialize = "aes")]
    #[serde(rename = "aes")]
    Aes,
    #[strum(serialize = "fernet")]
    #[serde(rename = "fernet")]
    Fernet,
    #[strum(serialize = "chacha20")]
    #[serde(rename = "chacha20")]
    ChaCha20,
}

impl CipherAlgorithm {
    pub fn id(self) -> &'static str {
        self.into()
    }
}
