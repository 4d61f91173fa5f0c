use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::tasks;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = tasks)]
pub struct TaskEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub time_estimate: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct InsertTaskEntity {
    pub user_id: Uuid,
    pub description: String,
    pub time_estimate: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct UpdateTaskEntity {
    pub description: Option<String>,
    pub time_estimate: Option<String>,
    pub is_done: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}
