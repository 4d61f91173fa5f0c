use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    entities::users::UserEntity,
    value_objects::enums::{
        subscription_plans::SubscriptionPlan, subscription_statuses::SubscriptionStatus,
    },
};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserModel {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUserModel {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileModel {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub credits: i32,
    pub subscription_status: SubscriptionStatus,
    pub subscription_plan: SubscriptionPlan,
    pub is_admin: bool,
}

impl From<UserEntity> for UserProfileModel {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.display_name,
            credits: entity.credits,
            subscription_status: SubscriptionStatus::from_str(&entity.subscription_status),
            subscription_plan: SubscriptionPlan::from_str(&entity.subscription_plan),
            is_admin: entity.is_admin,
        }
    }
}

/// Body returned by signin alongside the session cookie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionModel {
    pub token: String,
    pub user: UserProfileModel,
}
