pub mod config;
pub mod services;
pub mod usecases;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to init tracing: {}", err))?;

    Ok(())
}
