use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::tasks::{InsertTaskEntity, TaskEntity, UpdateTaskEntity};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTaskModel {
    pub description: String,
    pub time: String,
    #[serde(default)]
    pub is_done: bool,
}

impl InsertTaskModel {
    pub fn into_entity(self, user_id: Uuid) -> InsertTaskEntity {
        let now = Utc::now();
        InsertTaskEntity {
            user_id,
            description: self.description,
            time_estimate: self.time,
            is_done: self.is_done,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskModel {
    pub description: Option<String>,
    pub time: Option<String>,
    pub is_done: Option<bool>,
}

impl UpdateTaskModel {
    pub fn to_entity(&self) -> UpdateTaskEntity {
        UpdateTaskEntity {
            description: self.description.clone(),
            time_estimate: self.time.clone(),
            is_done: self.is_done,
            updated_at: Some(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskModel {
    pub id: Uuid,
    pub description: String,
    pub time: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TaskEntity> for TaskModel {
    fn from(entity: TaskEntity) -> Self {
        Self {
            id: entity.id,
            description: entity.description,
            time: entity.time_estimate,
            is_done: entity.is_done,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_model_always_touches_updated_at() {
        let entity = UpdateTaskModel::default().to_entity();

        assert!(entity.description.is_none());
        assert!(entity.updated_at.is_some());
    }

    #[test]
    fn insert_model_maps_time_to_estimate() {
        let user_id = Uuid::new_v4();
        let entity = InsertTaskModel {
            description: "Write report".to_string(),
            time: "2".to_string(),
            is_done: false,
        }
        .into_entity(user_id);

        assert_eq!(entity.user_id, user_id);
        assert_eq!(entity.time_estimate, "2");
    }
}
