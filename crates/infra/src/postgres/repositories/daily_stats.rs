use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::{dsl::insert_into, prelude::*, upsert::excluded};

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::daily_stats::{DailyStatsEntity, InsertDailyStatsEntity},
    repositories::daily_stats::DailyStatsRepository,
    schema::daily_stats,
};

pub struct DailyStatsPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DailyStatsPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    fn blank_row(date: NaiveDate) -> InsertDailyStatsEntity {
        InsertDailyStatsEntity {
            date,
            total_page_views: 0,
            total_users: 0,
            paid_users: 0,
            total_revenue_minor: 0,
        }
    }
}

#[async_trait]
impl DailyStatsRepository for DailyStatsPostgres {
    async fn upsert_counts(
        &self,
        date: NaiveDate,
        total_users: i32,
        paid_users: i32,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = InsertDailyStatsEntity {
            total_users,
            paid_users,
            ..Self::blank_row(date)
        };

        insert_into(daily_stats::table)
            .values(&row)
            .on_conflict(daily_stats::date)
            .do_update()
            .set((
                daily_stats::total_users.eq(excluded(daily_stats::total_users)),
                daily_stats::paid_users.eq(excluded(daily_stats::paid_users)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn add_revenue(&self, date: NaiveDate, amount_minor: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = InsertDailyStatsEntity {
            total_revenue_minor: amount_minor,
            ..Self::blank_row(date)
        };

        insert_into(daily_stats::table)
            .values(&row)
            .on_conflict(daily_stats::date)
            .do_update()
            .set(
                daily_stats::total_revenue_minor
                    .eq(daily_stats::total_revenue_minor + amount_minor),
            )
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<DailyStatsEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = daily_stats::table
            .select(DailyStatsEntity::as_select())
            .order(daily_stats::date.desc())
            .limit(limit)
            .load::<DailyStatsEntity>(&mut conn)?;

        Ok(results)
    }
}
