use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::tasks::{InsertTaskEntity, TaskEntity, UpdateTaskEntity};

/// Task rows are always addressed by owner; a task id alone never reaches
/// another user's row.
#[automock]
#[async_trait]
pub trait TaskRepository {
    async fn create(&self, insert_task_entity: InsertTaskEntity) -> Result<TaskEntity>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<TaskEntity>>;
    async fn update(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        update_task_entity: UpdateTaskEntity,
    ) -> Result<Option<TaskEntity>>;
    async fn delete(&self, user_id: Uuid, task_id: Uuid) -> Result<bool>;
}
