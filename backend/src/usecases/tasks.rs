use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;
use domain::{
    repositories::tasks::TaskRepository,
    value_objects::tasks::{InsertTaskModel, TaskModel, UpdateTaskModel},
};

pub struct TaskUseCase<T>
where
    T: TaskRepository + Send + Sync + 'static,
{
    task_repository: Arc<T>,
}

impl<T> TaskUseCase<T>
where
    T: TaskRepository + Send + Sync + 'static,
{
    pub fn new(task_repository: Arc<T>) -> Self {
        Self { task_repository }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        body: InsertTaskModel,
    ) -> Result<TaskModel, AppError> {
        let task = self
            .task_repository
            .create(body.into_entity(user_id))
            .await?;

        info!(%user_id, task_id = %task.id, "tasks: created");
        Ok(task.into())
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<TaskModel>, AppError> {
        let tasks = self.task_repository.list_by_user(user_id).await?;

        Ok(tasks.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        body: UpdateTaskModel,
    ) -> Result<TaskModel, AppError> {
        let task = self
            .task_repository
            .update(user_id, task_id, body.to_entity())
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        Ok(task.into())
    }

    pub async fn delete(&self, user_id: Uuid, task_id: Uuid) -> Result<(), AppError> {
        let deleted = self.task_repository.delete(user_id, task_id).await?;

        if !deleted {
            return Err(AppError::NotFound("Task not found".to_string()));
        }

        info!(%user_id, %task_id, "tasks: deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{entities::tasks::TaskEntity, repositories::tasks::MockTaskRepository};
    use mockall::predicate::eq;

    fn sample_task(user_id: Uuid) -> TaskEntity {
        let now = Utc::now();
        TaskEntity {
            id: Uuid::new_v4(),
            user_id,
            description: "Write report".to_string(),
            time_estimate: "2".to_string(),
            is_done: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_scopes_entity_to_caller() {
        let user_id = Uuid::new_v4();

        let mut task_repository = MockTaskRepository::new();
        let task = sample_task(user_id);
        task_repository
            .expect_create()
            .withf(move |entity| entity.user_id == user_id)
            .returning(move |_| Ok(task.clone()));

        let usecase = TaskUseCase::new(Arc::new(task_repository));

        let created = usecase
            .create(
                user_id,
                InsertTaskModel {
                    description: "Write report".to_string(),
                    time: "2".to_string(),
                    is_done: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.description, "Write report");
        assert_eq!(created.time, "2");
    }

    #[tokio::test]
    async fn update_of_foreign_or_missing_task_is_not_found() {
        let user_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();

        let mut task_repository = MockTaskRepository::new();
        task_repository
            .expect_update()
            .with(eq(user_id), eq(task_id), mockall::predicate::always())
            .returning(|_, _, _| Ok(None));

        let usecase = TaskUseCase::new(Arc::new(task_repository));

        let result = usecase
            .update(user_id, task_id, UpdateTaskModel::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_of_missing_task_is_not_found() {
        let user_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();

        let mut task_repository = MockTaskRepository::new();
        task_repository
            .expect_delete()
            .returning(|_, _| Ok(false));

        let usecase = TaskUseCase::new(Arc::new(task_repository));

        let result = usecase.delete(user_id, task_id).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
