use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use domain::repositories::{daily_stats::DailyStatsRepository, users::UserRepository};

pub struct AggregateDailyStatsUseCase<U, D>
where
    U: UserRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    daily_stats_repository: Arc<D>,
}

impl<U, D> AggregateDailyStatsUseCase<U, D>
where
    U: UserRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<U>, daily_stats_repository: Arc<D>) -> Self {
        Self {
            user_repository,
            daily_stats_repository,
        }
    }

    /// Counts users and upserts today's row. Page-view and revenue counters
    /// are written elsewhere and survive the upsert.
    pub async fn aggregate_today(&self) -> Result<()> {
        let total_users = self.user_repository.count_total().await?;
        let paid_users = self.user_repository.count_paid().await?;

        let today = Utc::now().date_naive();

        self.daily_stats_repository
            .upsert_counts(
                today,
                i32::try_from(total_users).unwrap_or(i32::MAX),
                i32::try_from(paid_users).unwrap_or(i32::MAX),
            )
            .await?;

        info!(%today, total_users, paid_users, "daily_stats: counts refreshed");

        Ok(())
    }
}
