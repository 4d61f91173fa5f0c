use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{dsl::insert_into, prelude::*};
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::tasks::{InsertTaskEntity, TaskEntity, UpdateTaskEntity},
    repositories::tasks::TaskRepository,
    schema::tasks,
};

pub struct TaskPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TaskPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TaskRepository for TaskPostgres {
    async fn create(&self, insert_task_entity: InsertTaskEntity) -> Result<TaskEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(tasks::table)
            .values(&insert_task_entity)
            .returning(TaskEntity::as_returning())
            .get_result::<TaskEntity>(&mut conn)?;

        Ok(result)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<TaskEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = tasks::table
            .filter(tasks::user_id.eq(user_id))
            .select(TaskEntity::as_select())
            .order(tasks::created_at.asc())
            .load::<TaskEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        update_task_entity: UpdateTaskEntity,
    ) -> Result<Option<TaskEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = diesel::update(
            tasks::table
                .filter(tasks::id.eq(task_id))
                .filter(tasks::user_id.eq(user_id)),
        )
        .set(&update_task_entity)
        .returning(TaskEntity::as_returning())
        .get_result::<TaskEntity>(&mut conn)
        .optional()?;

        Ok(result)
    }

    async fn delete(&self, user_id: Uuid, task_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = diesel::delete(
            tasks::table
                .filter(tasks::id.eq(task_id))
                .filter(tasks::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
