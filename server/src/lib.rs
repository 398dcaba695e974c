pub mod config;
pub mod core;
pub mod http_server;
pub mod request_dispatcher;
pub mod state;

use eyre::WrapErr;
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn setup_logger(debug: bool) -> eyre::Result<()> {

    let filter = EnvFilter::from_default_env()
        // Set the base level when not matched by other directives to WARN.
        .add_directive(LevelFilter::WARN.into())
        // Set the max level for `my_crate::my_mod` to DEBUG, overriding
        // any directives parsed from the env variable.
        .add_directive("common=debug".parse()?)
        .add_directive(if debug { "server=trace" } else { "server=info" }.parse()?);

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
    .with_max_level(tracing::Level::TRACE)
    .with_env_filter(filter)
    .finish();

    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("setting default subscriber failed")?;

    Ok(())
}
