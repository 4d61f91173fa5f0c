use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{dsl::insert_into, prelude::*};
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::users::{RegisterUserEntity, UpdateSubscriptionEntity, UserEntity},
    repositories::users::UserRepository,
    schema::users,
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn register(&self, register_user_entity: RegisterUserEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(users::table)
            .values(&register_user_entity)
            .returning(users::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .find(user_id)
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_email(&self, email: String) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::email.eq(email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_customer_ref(&self, customer_ref: String) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::stripe_customer_ref.eq(customer_ref))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update_subscription(
        &self,
        user_id: Uuid,
        update_subscription_entity: UpdateSubscriptionEntity,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::update(users::table.find(user_id))
            .set(&update_subscription_entity)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn count_total(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table.count().get_result::<i64>(&mut conn)?;

        Ok(result)
    }

    async fn count_paid(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::subscription_status.eq(SubscriptionStatus::Active.to_string()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(result)
    }
}
