use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Free,
    Hobby,
    Pro,
}

impl Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plan = match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Hobby => "hobby",
            SubscriptionPlan::Pro => "pro",
        };
        write!(f, "{}", plan)
    }
}

impl SubscriptionPlan {
    pub fn from_str(value: &str) -> Self {
        match value {
            "hobby" => SubscriptionPlan::Hobby,
            "pro" => SubscriptionPlan::Pro,
            _ => SubscriptionPlan::Free,
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionPlan::Free)
    }
}
