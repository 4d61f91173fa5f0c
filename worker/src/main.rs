use anyhow::Result;
use infra::postgres::{
    postgres_connection,
    repositories::{daily_stats::DailyStatsPostgres, users::UserPostgres},
};
use std::sync::Arc;
use tracing::{error, info};
use worker::{config, services, usecases::aggregate_daily_stats::AggregateDailyStatsUseCase};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Worker exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    worker::init_tracing()?;

    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");

    let db_pool = Arc::new(postgres_pool);

    let user_repository = Arc::new(UserPostgres::new(Arc::clone(&db_pool)));
    let daily_stats_repository = Arc::new(DailyStatsPostgres::new(Arc::clone(&db_pool)));

    let aggregate_usecase = Arc::new(AggregateDailyStatsUseCase::new(
        user_repository,
        daily_stats_repository,
    ));

    info!("Worker started");

    services::stats_loop::run_stats_loop(aggregate_usecase, dotenvy_env.stats.interval_secs).await
}
