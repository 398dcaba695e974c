use std::{io::ErrorKind, net::SocketAddr, path::Path};

use common::consts::{DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PBKDF2_ITERATIONS, DEFAULT_PORT, LEAKCHECK_PUBLIC_URL};
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::password::Estimator;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: u64,
    pub pbkdf2_iterations: u32,
    pub password_estimator: Estimator,
    pub leakcheck_url: String,
    /// Answer the well-known example.com addresses with canned breaches.
    pub demo_breaches: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
            password_estimator: Estimator::default(),
            leakcheck_url: LEAKCHECK_PUBLIC_URL.to_owned(),
            demo_breaches: true,
        }
    }
}

impl Config {
    /// A missing file is not an error, defaults are used instead.
    pub async fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let buf = match tokio::fs::read_to_string(path).await {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("no config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e).wrap_err_with(|| format!("failed to read {}", path.display())),
        };

        Self::from_toml(&buf).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml(s: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(s)?;
        eyre::ensure!(config.pbkdf2_iterations > 0, "pbkdf2_iterations must be positive");
        Ok(config)
    }

    pub fn listen_addr(&self) -> eyre::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .wrap_err_with(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
