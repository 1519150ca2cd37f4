use color_eyre::eyre::{Context, Result};
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::LogConfig;

/// Overrides the configured log filter when set.
pub const LOG_ENV_VAR: &str = "CATALOG_LOG";

pub fn env_filter(config: &LogConfig) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV_VAR) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .wrap_err_with(|| format!("invalid {} directives: {}", LOG_ENV_VAR, directives)),
        Err(_) => EnvFilter::try_new(&config.filter)
            .wrap_err_with(|| format!("invalid log filter: {}", config.filter)),
    }
}

/// Installs color-eyre reports and a stderr subscriber capturing span traces.
///
/// Meant to be called once by the embedding program.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    if std::env::var("RUST_SPANTRACE").is_err() {
        std::env::set_var("RUST_SPANTRACE", "1");
    }
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(env_filter(config)?)
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .wrap_err("error installing tracing subscriber")?;
    Ok(())
}
