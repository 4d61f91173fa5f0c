use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::users;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = users)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub credits: i32,
    pub subscription_status: String,
    pub subscription_plan: String,
    pub stripe_customer_ref: Option<String>,
    pub is_admin: bool,
    pub last_active_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct RegisterUserEntity {
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub credits: i32,
    pub subscription_status: String,
    pub subscription_plan: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
pub struct UpdateSubscriptionEntity {
    pub subscription_status: Option<String>,
    pub subscription_plan: Option<String>,
    pub stripe_customer_ref: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
