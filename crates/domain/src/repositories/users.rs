use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::users::{RegisterUserEntity, UpdateSubscriptionEntity, UserEntity};

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn register(&self, register_user_entity: RegisterUserEntity) -> Result<Uuid>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
    async fn find_by_email(&self, email: String) -> Result<Option<UserEntity>>;
    async fn find_by_customer_ref(&self, customer_ref: String) -> Result<Option<UserEntity>>;
    async fn update_subscription(
        &self,
        user_id: Uuid,
        update_subscription_entity: UpdateSubscriptionEntity,
    ) -> Result<()>;
    async fn count_total(&self) -> Result<i64>;
    async fn count_paid(&self) -> Result<i64>;
}
