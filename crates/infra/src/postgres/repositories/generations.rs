use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{dsl::insert_into, prelude::*};
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::gpt_responses::InsertGptResponseEntity,
    repositories::generations::GenerationRepository,
    schema::{gpt_responses, users},
    value_objects::schedule::GenerationPersistOutcome,
};

pub struct GenerationPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl GenerationPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl GenerationRepository for GenerationPostgres {
    async fn record_success(
        &self,
        user_id: Uuid,
        content: String,
        charge_credit: bool,
    ) -> Result<GenerationPersistOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = Utc::now();

        let outcome = conn.transaction::<GenerationPersistOutcome, diesel::result::Error, _>(
            |tx| {
                if charge_credit {
                    // Conditional decrement: the balance can never go
                    // negative, concurrent spenders race on the row count.
                    let affected = diesel::update(
                        users::table
                            .filter(users::id.eq(user_id))
                            .filter(users::credits.gt(0)),
                    )
                    .set(users::credits.eq(users::credits - 1))
                    .execute(tx)?;

                    if affected == 0 {
                        return Ok(GenerationPersistOutcome::CreditsExhausted);
                    }
                }

                insert_into(gpt_responses::table)
                    .values(&InsertGptResponseEntity {
                        user_id,
                        content: content.clone(),
                        created_at: now,
                    })
                    .execute(tx)?;

                diesel::update(users::table.find(user_id))
                    .set((
                        users::last_active_at.eq(Some(now)),
                        users::updated_at.eq(now),
                    ))
                    .execute(tx)?;

                Ok(GenerationPersistOutcome::Recorded {
                    charged: charge_credit,
                })
            },
        )?;

        Ok(outcome)
    }

    async fn count_total(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = gpt_responses::table.count().get_result::<i64>(&mut conn)?;

        Ok(result)
    }
}
