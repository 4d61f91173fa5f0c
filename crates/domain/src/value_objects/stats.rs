use chrono::NaiveDate;
use serde::Serialize;

use crate::entities::daily_stats::DailyStatsEntity;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatsModel {
    pub date: NaiveDate,
    pub total_page_views: i32,
    pub total_users: i32,
    pub paid_users: i32,
    pub total_revenue_minor: i64,
}

impl From<DailyStatsEntity> for DailyStatsModel {
    fn from(entity: DailyStatsEntity) -> Self {
        Self {
            date: entity.date,
            total_page_views: entity.total_page_views,
            total_users: entity.total_users,
            paid_users: entity.paid_users,
            total_revenue_minor: entity.total_revenue_minor,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsModel {
    pub total_users: i64,
    pub paid_users: i64,
    pub total_generations: i64,
    pub daily: Vec<DailyStatsModel>,
}
