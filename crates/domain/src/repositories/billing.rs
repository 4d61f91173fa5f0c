use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::value_objects::{billing::BillingEvent, enums::subscription_plans::SubscriptionPlan};

#[automock]
#[async_trait]
pub trait BillingProvider {
    async fn create_customer(&self, email: String, user_id: Uuid) -> Result<String>;
    async fn create_checkout_session(
        &self,
        customer_ref: String,
        user_id: Uuid,
        plan: SubscriptionPlan,
    ) -> Result<String>;
    async fn create_portal_session(&self, customer_ref: String) -> Result<String>;
    fn verify_webhook(&self, payload: &[u8], signature_header: &str) -> Result<BillingEvent>;
}
