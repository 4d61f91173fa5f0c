use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use sha2::Sha256;
use tracing::error;
use uuid::Uuid;

use domain::{
    repositories::billing::BillingProvider,
    value_objects::{
        billing::BillingEvent,
        enums::{
            subscription_plans::SubscriptionPlan, subscription_statuses::SubscriptionStatus,
        },
    },
};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone)]
pub struct StripeClientConfig {
    pub secret_key: String,
    pub webhook_secret: String,
    pub hobby_price_id: String,
    pub pro_price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    pub portal_return_url: String,
}

/// Minimal Stripe client built on reqwest.
pub struct StripeClient {
    http: reqwest::Client,
    config: StripeClientConfig,
}

#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_: String,
    pub livemode: Option<bool>,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    customer: Option<String>,
    amount_total: Option<i64>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct StripeSubscriptionObject {
    customer: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorDetails,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetails {
    #[serde(rename = "type")]
    type_: Option<String>,
    code: Option<String>,
    message: Option<String>,
    param: Option<String>,
}

fn subscription_status_from_provider(status: &str) -> SubscriptionStatus {
    match status {
        "active" | "trialing" => SubscriptionStatus::Active,
        "past_due" | "unpaid" => SubscriptionStatus::PastDue,
        _ => SubscriptionStatus::Canceled,
    }
}

impl StripeClient {
    pub fn new(config: StripeClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn price_id_for_plan(&self, plan: SubscriptionPlan) -> Result<&str> {
        match plan {
            SubscriptionPlan::Hobby => Ok(&self.config.hobby_price_id),
            SubscriptionPlan::Pro => Ok(&self.config.pro_price_id),
            SubscriptionPlan::Free => anyhow::bail!("the free plan has no Stripe price"),
        }
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let request_id = resp
            .headers()
            .get("request-id")
            .or_else(|| resp.headers().get("stripe-request-id"))
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (stripe_error_type, stripe_error_code, stripe_error_param, stripe_error_message) =
            match serde_json::from_str::<StripeErrorEnvelope>(&body) {
                Ok(envelope) => {
                    let details = envelope.error;
                    (details.type_, details.code, details.param, details.message)
                }
                Err(_) => (None, None, None, None),
            };

        error!(
            status = %status,
            stripe_request_id = ?request_id,
            stripe_error_type = ?stripe_error_type,
            stripe_error_code = ?stripe_error_code,
            stripe_error_param = ?stripe_error_param,
            stripe_error_message = ?stripe_error_message,
            response_body = %body,
            context = %context,
            "stripe api request failed"
        );

        anyhow::bail!(
            "Stripe API request failed: {} (status {}, request_id={:?})",
            context,
            status,
            request_id
        );
    }

    /// Verifies the webhook signature. https://stripe.com/docs/webhooks/signatures
    pub fn verify_webhook_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent> {
        let mut timestamp: Option<String> = None;
        let mut signature: Option<String> = None;

        for part in signature_header.split(',') {
            if let Some(rest) = part.strip_prefix("t=") {
                timestamp = Some(rest.to_string());
            } else if let Some(rest) = part.strip_prefix("v1=") {
                signature = Some(rest.to_string());
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| anyhow::anyhow!("missing timestamp in stripe-signature"))?;
        let signature =
            signature.ok_or_else(|| anyhow::anyhow!("missing v1 in stripe-signature"))?;

        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
        let mut mac = HmacSha256::new_from_slice(self.config.webhook_secret.as_bytes())?;
        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();
        let provided = hex::decode(signature)?;

        if expected[..] != provided[..] {
            anyhow::bail!("invalid webhook signature");
        }

        let event: StripeEvent = serde_json::from_slice(payload)?;
        Ok(event)
    }

    fn map_event(event: StripeEvent) -> BillingEvent {
        match event.type_.as_str() {
            "checkout.session.completed" => {
                let session: StripeCheckoutSession =
                    match serde_json::from_value(event.data.object) {
                        Ok(session) => session,
                        Err(_) => {
                            return BillingEvent::Ignored {
                                event_type: event.type_,
                            };
                        }
                    };

                let user_id = session
                    .metadata
                    .get("user_id")
                    .and_then(|raw| Uuid::parse_str(raw).ok());
                let plan = session
                    .metadata
                    .get("plan")
                    .map(|raw| SubscriptionPlan::from_str(raw))
                    .unwrap_or_default();

                BillingEvent::CheckoutCompleted {
                    user_id,
                    customer_ref: session.customer,
                    plan,
                    amount_minor: session.amount_total.unwrap_or(0),
                }
            }
            "customer.subscription.updated" | "customer.subscription.deleted" => {
                let subscription: StripeSubscriptionObject =
                    match serde_json::from_value(event.data.object) {
                        Ok(subscription) => subscription,
                        Err(_) => {
                            return BillingEvent::Ignored {
                                event_type: event.type_,
                            };
                        }
                    };

                let Some(customer_ref) = subscription.customer else {
                    return BillingEvent::Ignored {
                        event_type: event.type_,
                    };
                };

                if event.type_ == "customer.subscription.deleted" {
                    BillingEvent::SubscriptionDeleted { customer_ref }
                } else {
                    let status = subscription
                        .status
                        .as_deref()
                        .map(subscription_status_from_provider)
                        .unwrap_or(SubscriptionStatus::Canceled);

                    BillingEvent::SubscriptionUpdated {
                        customer_ref,
                        status,
                    }
                }
            }
            _ => BillingEvent::Ignored {
                event_type: event.type_,
            },
        }
    }
}

#[async_trait]
impl BillingProvider for StripeClient {
    /// Creates a Stripe customer for the given email/user.
    async fn create_customer(&self, email: String, user_id: Uuid) -> Result<String> {
        // See Stripe customer docs: https://stripe.com/docs/api/customers/create
        let body = [
            ("email", email),
            ("metadata[user_id]", user_id.to_string()),
        ];

        let resp = self
            .http
            .post("https://api.stripe.com/v1/customers")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.secret_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create customer").await?;

        #[derive(Deserialize)]
        struct CustomerResp {
            id: String,
        }

        let parsed: CustomerResp = resp.json().await?;
        Ok(parsed.id)
    }

    /// Creates a subscription Checkout Session and returns its URL.
    async fn create_checkout_session(
        &self,
        customer_ref: String,
        user_id: Uuid,
        plan: SubscriptionPlan,
    ) -> Result<String> {
        // Stripe Checkout docs:
        // https://stripe.com/docs/payments/checkout
        let price_id = self.price_id_for_plan(plan)?;

        let body: Vec<(String, String)> = vec![
            ("mode".to_string(), "subscription".to_string()),
            ("customer".to_string(), customer_ref),
            ("line_items[0][price]".to_string(), price_id.to_string()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            (
                "success_url".to_string(),
                self.config.success_url.clone(),
            ),
            ("cancel_url".to_string(), self.config.cancel_url.clone()),
            ("metadata[user_id]".to_string(), user_id.to_string()),
            ("metadata[plan]".to_string(), plan.to_string()),
        ];

        let resp = self
            .http
            .post("https://api.stripe.com/v1/checkout/sessions")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.secret_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create checkout session").await?;

        #[derive(Deserialize)]
        struct CheckoutResp {
            url: Option<String>,
        }

        let parsed: CheckoutResp = resp.json().await?;
        parsed
            .url
            .ok_or_else(|| anyhow::anyhow!("Stripe Checkout session URL is missing"))
    }

    /// Creates a customer-portal session for self-service plan management.
    async fn create_portal_session(&self, customer_ref: String) -> Result<String> {
        // https://stripe.com/docs/api/customer_portal/sessions/create
        let body = [
            ("customer", customer_ref),
            ("return_url", self.config.portal_return_url.clone()),
        ];

        let resp = self
            .http
            .post("https://api.stripe.com/v1/billing_portal/sessions")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.secret_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create portal session").await?;

        #[derive(Deserialize)]
        struct PortalResp {
            url: String,
        }

        let parsed: PortalResp = resp.json().await?;
        Ok(parsed.url)
    }

    fn verify_webhook(&self, payload: &[u8], signature_header: &str) -> Result<BillingEvent> {
        let event = self.verify_webhook_signature(payload, signature_header)?;
        Ok(Self::map_event(event))
    }
}
