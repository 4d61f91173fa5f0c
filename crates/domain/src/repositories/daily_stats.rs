use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;

use crate::entities::daily_stats::DailyStatsEntity;

#[automock]
#[async_trait]
pub trait DailyStatsRepository {
    /// Inserts or updates the row for the given day with fresh user counts,
    /// leaving page-view and revenue counters untouched on conflict.
    async fn upsert_counts(
        &self,
        date: NaiveDate,
        total_users: i32,
        paid_users: i32,
    ) -> Result<()>;

    async fn add_revenue(&self, date: NaiveDate, amount_minor: i64) -> Result<()>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<DailyStatsEntity>>;
}
