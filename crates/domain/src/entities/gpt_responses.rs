use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::gpt_responses;

/// Append-only log row holding one serialized generation output.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = gpt_responses)]
pub struct GptResponseEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gpt_responses)]
pub struct InsertGptResponseEntity {
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
