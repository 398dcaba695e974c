use std::path::PathBuf;

use common::consts::CONFIG_PATH;
use server::{config::Config, setup_logger, state::State};
use structopt::StructOpt;
use tracing::debug;

#[derive(Debug, StructOpt)]
#[structopt(name = "server", about = "cybersecurity toolkit API server")]
struct Opt {
    /// TOML configuration file
    #[structopt(long, parse(from_os_str), default_value = CONFIG_PATH)]
    config: PathBuf,
    /// Overrides the configured listen host
    #[structopt(long)]
    host: Option<String>,
    /// Overrides the configured listen port
    #[structopt(long)]
    port: Option<u16>,
    /// Trace every request
    #[structopt(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::from_args();
    setup_logger(opt.debug)?;

    let mut config = Config::load(&opt.config).await?;
    if let Some(host) = opt.host {
        config.host = host;
    }
    if let Some(port) = opt.port {
        config.port = port;
    }
    debug!(?config);

    let state = State::new(config)?;

    debug!("ready!");

    server::http_server::run(state).await?;
    Ok(())
}
