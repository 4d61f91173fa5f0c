use chrono::NaiveDate;
use diesel::prelude::*;

use crate::schema::daily_stats;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = daily_stats)]
pub struct DailyStatsEntity {
    pub id: i64,
    pub date: NaiveDate,
    pub total_page_views: i32,
    pub total_users: i32,
    pub paid_users: i32,
    pub total_revenue_minor: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = daily_stats)]
pub struct InsertDailyStatsEntity {
    pub date: NaiveDate,
    pub total_page_views: i32,
    pub total_users: i32,
    pub paid_users: i32,
    pub total_revenue_minor: i64,
}
