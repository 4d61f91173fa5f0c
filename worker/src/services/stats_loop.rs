use anyhow::Result;
use domain::repositories::{daily_stats::DailyStatsRepository, users::UserRepository};
use std::{sync::Arc, time::Duration};
use tracing::error;

use crate::usecases::aggregate_daily_stats::AggregateDailyStatsUseCase;

/// Refreshes today's aggregate row on a fixed interval. Failures are logged
/// and the loop keeps running.
pub async fn run_stats_loop<U, D>(
    usecase: Arc<AggregateDailyStatsUseCase<U, D>>,
    interval_secs: u64,
) -> Result<()>
where
    U: UserRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
{
    loop {
        if let Err(e) = usecase.aggregate_today().await {
            error!("Error while aggregating daily stats: {}", e);
        }

        tokio::time::sleep(Duration::from_secs(interval_secs)).await;
    }
}
