use anyhow::{Ok, Result};

use super::config_model::{Database, DotEnvyConfig, Stats};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let stats = Stats {
        interval_secs: std::env::var("STATS_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()?,
    };

    Ok(DotEnvyConfig { database, stats })
}
