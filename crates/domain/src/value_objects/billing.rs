use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::enums::{
    subscription_plans::SubscriptionPlan, subscription_statuses::SubscriptionStatus,
};

/// Generation allowance seeded on signup for users without a subscription.
pub const FREE_PLAN_CREDITS: i32 = 3;

/// The entitlement predicate: an active subscription grants unlimited
/// generations, otherwise one credit buys one generation.
pub fn has_generation_access(status: SubscriptionStatus, credits: i32) -> bool {
    status.is_active() || credits > 0
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequestModel {
    pub plan: SubscriptionPlan,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionModel {
    pub url: String,
}

/// Provider-agnostic webhook event, mapped from the raw payload by the
/// billing adapter after signature verification.
#[derive(Debug, Clone, PartialEq)]
pub enum BillingEvent {
    CheckoutCompleted {
        user_id: Option<Uuid>,
        customer_ref: Option<String>,
        plan: SubscriptionPlan,
        amount_minor: i64,
    },
    SubscriptionUpdated {
        customer_ref: String,
        status: SubscriptionStatus,
    },
    SubscriptionDeleted {
        customer_ref: String,
    },
    Ignored {
        event_type: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_subscription_grants_access_without_credits() {
        assert!(has_generation_access(SubscriptionStatus::Active, 0));
    }

    #[test]
    fn credits_grant_access_without_subscription() {
        assert!(has_generation_access(SubscriptionStatus::None, 1));
        assert!(has_generation_access(SubscriptionStatus::Canceled, 5));
    }

    #[test]
    fn no_subscription_and_no_credits_denies_access() {
        assert!(!has_generation_access(SubscriptionStatus::None, 0));
        assert!(!has_generation_access(SubscriptionStatus::PastDue, 0));
        assert!(!has_generation_access(SubscriptionStatus::Canceled, 0));
    }
}
