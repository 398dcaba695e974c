use eyre::WrapErr;

use crate::config::Config;

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub http_client: reqwest::Client, // outbound calls to the breach lookup API
}

impl State {
    pub fn new(config: Config) -> eyre::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .wrap_err("failed to build HTTP client")?;

        Ok(Self { config, http_client })
    }
}
