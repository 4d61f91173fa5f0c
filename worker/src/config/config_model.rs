#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub database: Database,
    pub stats: Stats,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Stats {
    pub interval_secs: u64,
}
