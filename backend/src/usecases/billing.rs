use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;
use domain::{
    entities::users::{UpdateSubscriptionEntity, UserEntity},
    repositories::{
        billing::BillingProvider, daily_stats::DailyStatsRepository, users::UserRepository,
    },
    value_objects::{
        billing::{BillingEvent, CheckoutSessionModel},
        enums::{
            subscription_plans::SubscriptionPlan, subscription_statuses::SubscriptionStatus,
        },
    },
};

pub struct BillingUseCase<U, D, B>
where
    U: UserRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    daily_stats_repository: Arc<D>,
    billing_provider: Arc<B>,
}

impl<U, D, B> BillingUseCase<U, D, B>
where
    U: UserRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    pub fn new(
        user_repository: Arc<U>,
        daily_stats_repository: Arc<D>,
        billing_provider: Arc<B>,
    ) -> Self {
        Self {
            user_repository,
            daily_stats_repository,
            billing_provider,
        }
    }

    pub async fn checkout(
        &self,
        user_id: Uuid,
        plan: SubscriptionPlan,
    ) -> Result<CheckoutSessionModel, AppError> {
        if !plan.is_paid() {
            return Err(AppError::BadRequest(
                "The free plan cannot be purchased".to_string(),
            ));
        }

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let customer_ref = self.ensure_customer_ref(&user).await?;

        let url = self
            .billing_provider
            .create_checkout_session(customer_ref, user_id, plan)
            .await?;

        info!(%user_id, plan = %plan, "billing: checkout session created");
        Ok(CheckoutSessionModel { url })
    }

    pub async fn portal(&self, user_id: Uuid) -> Result<CheckoutSessionModel, AppError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let customer_ref = user.stripe_customer_ref.ok_or_else(|| {
            AppError::BadRequest("No billing account exists for this user".to_string())
        })?;

        let url = self
            .billing_provider
            .create_portal_session(customer_ref)
            .await?;

        Ok(CheckoutSessionModel { url })
    }

    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<(), AppError> {
        let event = self
            .billing_provider
            .verify_webhook(payload, signature_header)
            .map_err(|err| {
                warn!(error = %err, "billing: webhook rejected");
                AppError::BadRequest("Invalid webhook payload or signature".to_string())
            })?;

        match event {
            BillingEvent::CheckoutCompleted {
                user_id,
                customer_ref,
                plan,
                amount_minor,
            } => {
                let user = match user_id {
                    Some(user_id) => self.user_repository.find_by_id(user_id).await?,
                    None => match &customer_ref {
                        Some(customer_ref) => {
                            self.user_repository
                                .find_by_customer_ref(customer_ref.clone())
                                .await?
                        }
                        None => None,
                    },
                };

                let Some(user) = user else {
                    warn!("billing: checkout completion for unknown user");
                    return Ok(());
                };

                self.user_repository
                    .update_subscription(
                        user.id,
                        UpdateSubscriptionEntity {
                            subscription_status: Some(SubscriptionStatus::Active.to_string()),
                            subscription_plan: Some(plan.to_string()),
                            stripe_customer_ref: customer_ref,
                            updated_at: Some(Utc::now()),
                        },
                    )
                    .await?;

                if amount_minor > 0 {
                    self.daily_stats_repository
                        .add_revenue(Utc::now().date_naive(), amount_minor)
                        .await?;
                }

                info!(user_id = %user.id, plan = %plan, "billing: subscription activated");
            }
            BillingEvent::SubscriptionUpdated {
                customer_ref,
                status,
            } => {
                let Some(user) = self
                    .user_repository
                    .find_by_customer_ref(customer_ref)
                    .await?
                else {
                    warn!("billing: subscription update for unknown customer");
                    return Ok(());
                };

                self.user_repository
                    .update_subscription(
                        user.id,
                        UpdateSubscriptionEntity {
                            subscription_status: Some(status.to_string()),
                            updated_at: Some(Utc::now()),
                            ..Default::default()
                        },
                    )
                    .await?;

                info!(user_id = %user.id, status = %status, "billing: subscription updated");
            }
            BillingEvent::SubscriptionDeleted { customer_ref } => {
                let Some(user) = self
                    .user_repository
                    .find_by_customer_ref(customer_ref)
                    .await?
                else {
                    warn!("billing: subscription deletion for unknown customer");
                    return Ok(());
                };

                self.user_repository
                    .update_subscription(
                        user.id,
                        UpdateSubscriptionEntity {
                            subscription_status: Some(SubscriptionStatus::Canceled.to_string()),
                            subscription_plan: Some(SubscriptionPlan::Free.to_string()),
                            updated_at: Some(Utc::now()),
                            ..Default::default()
                        },
                    )
                    .await?;

                info!(user_id = %user.id, "billing: subscription canceled");
            }
            BillingEvent::Ignored { event_type } => {
                debug!(event_type = %event_type, "billing: webhook event ignored");
            }
        }

        Ok(())
    }

    async fn ensure_customer_ref(&self, user: &UserEntity) -> Result<String, AppError> {
        if let Some(customer_ref) = &user.stripe_customer_ref {
            return Ok(customer_ref.clone());
        }

        let customer_ref = self
            .billing_provider
            .create_customer(user.email.clone(), user.id)
            .await?;

        self.user_repository
            .update_subscription(
                user.id,
                UpdateSubscriptionEntity {
                    stripe_customer_ref: Some(customer_ref.clone()),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await?;

        Ok(customer_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::{
        billing::MockBillingProvider, daily_stats::MockDailyStatsRepository,
        users::MockUserRepository,
    };

    fn sample_user(user_id: Uuid, customer_ref: Option<&str>) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id: user_id,
            email: "user@example.com".to_string(),
            display_name: None,
            password_hash: "hash".to_string(),
            credits: 0,
            subscription_status: "none".to_string(),
            subscription_plan: "free".to_string(),
            stripe_customer_ref: customer_ref.map(|value| value.to_string()),
            is_admin: false,
            last_active_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn checkout_rejects_free_plan() {
        let usecase = BillingUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockDailyStatsRepository::new()),
            Arc::new(MockBillingProvider::new()),
        );

        let result = usecase.checkout(Uuid::new_v4(), SubscriptionPlan::Free).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn checkout_creates_customer_once_and_persists_ref() {
        let user_id = Uuid::new_v4();

        let mut user_repository = MockUserRepository::new();
        let user = sample_user(user_id, None);
        user_repository.expect_find_by_id().returning(move |_| Ok(Some(user.clone())));
        user_repository
            .expect_update_subscription()
            .withf(|_, entity| entity.stripe_customer_ref.as_deref() == Some("cus_123"))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut billing_provider = MockBillingProvider::new();
        billing_provider
            .expect_create_customer()
            .times(1)
            .returning(|_, _| Ok("cus_123".to_string()));
        billing_provider
            .expect_create_checkout_session()
            .withf(move |customer_ref, id, plan| {
                customer_ref == "cus_123"
                    && *id == user_id
                    && *plan == SubscriptionPlan::Hobby
            })
            .returning(|_, _, _| Ok("https://checkout.stripe.com/c/pay/cs_test".to_string()));

        let usecase = BillingUseCase::new(
            Arc::new(user_repository),
            Arc::new(MockDailyStatsRepository::new()),
            Arc::new(billing_provider),
        );

        let session = usecase
            .checkout(user_id, SubscriptionPlan::Hobby)
            .await
            .unwrap();

        assert!(session.url.starts_with("https://checkout.stripe.com/"));
    }

    #[tokio::test]
    async fn checkout_reuses_existing_customer_ref() {
        let user_id = Uuid::new_v4();

        let mut user_repository = MockUserRepository::new();
        let user = sample_user(user_id, Some("cus_existing"));
        user_repository.expect_find_by_id().returning(move |_| Ok(Some(user.clone())));
        user_repository.expect_update_subscription().times(0);

        let mut billing_provider = MockBillingProvider::new();
        billing_provider.expect_create_customer().times(0);
        billing_provider
            .expect_create_checkout_session()
            .withf(|customer_ref, _, _| customer_ref == "cus_existing")
            .returning(|_, _, _| Ok("https://checkout".to_string()));

        let usecase = BillingUseCase::new(
            Arc::new(user_repository),
            Arc::new(MockDailyStatsRepository::new()),
            Arc::new(billing_provider),
        );

        assert!(usecase.checkout(user_id, SubscriptionPlan::Pro).await.is_ok());
    }

    #[tokio::test]
    async fn webhook_signature_failure_is_bad_request() {
        let mut billing_provider = MockBillingProvider::new();
        billing_provider
            .expect_verify_webhook()
            .returning(|_, _| Err(anyhow::anyhow!("invalid webhook signature")));

        let usecase = BillingUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockDailyStatsRepository::new()),
            Arc::new(billing_provider),
        );

        let result = usecase.handle_webhook(b"{}", "t=1,v1=bad").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn checkout_completion_activates_plan_and_records_revenue() {
        let user_id = Uuid::new_v4();

        let mut user_repository = MockUserRepository::new();
        let user = sample_user(user_id, None);
        user_repository.expect_find_by_id().returning(move |_| Ok(Some(user.clone())));
        user_repository
            .expect_update_subscription()
            .withf(|_, entity| {
                entity.subscription_status.as_deref() == Some("active")
                    && entity.subscription_plan.as_deref() == Some("hobby")
                    && entity.stripe_customer_ref.as_deref() == Some("cus_123")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut daily_stats_repository = MockDailyStatsRepository::new();
        daily_stats_repository
            .expect_add_revenue()
            .withf(|_, amount_minor| *amount_minor == 900)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut billing_provider = MockBillingProvider::new();
        billing_provider.expect_verify_webhook().returning(move |_, _| {
            Ok(BillingEvent::CheckoutCompleted {
                user_id: Some(user_id),
                customer_ref: Some("cus_123".to_string()),
                plan: SubscriptionPlan::Hobby,
                amount_minor: 900,
            })
        });

        let usecase = BillingUseCase::new(
            Arc::new(user_repository),
            Arc::new(daily_stats_repository),
            Arc::new(billing_provider),
        );

        assert!(usecase.handle_webhook(b"{}", "t=1,v1=ok").await.is_ok());
    }

    #[tokio::test]
    async fn subscription_deletion_downgrades_to_free() {
        let user_id = Uuid::new_v4();

        let mut user_repository = MockUserRepository::new();
        let user = sample_user(user_id, Some("cus_123"));
        user_repository
            .expect_find_by_customer_ref()
            .returning(move |_| Ok(Some(user.clone())));
        user_repository
            .expect_update_subscription()
            .withf(|_, entity| {
                entity.subscription_status.as_deref() == Some("canceled")
                    && entity.subscription_plan.as_deref() == Some("free")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut billing_provider = MockBillingProvider::new();
        billing_provider.expect_verify_webhook().returning(|_, _| {
            Ok(BillingEvent::SubscriptionDeleted {
                customer_ref: "cus_123".to_string(),
            })
        });

        let usecase = BillingUseCase::new(
            Arc::new(user_repository),
            Arc::new(MockDailyStatsRepository::new()),
            Arc::new(billing_provider),
        );

        assert!(usecase.handle_webhook(b"{}", "t=1,v1=ok").await.is_ok());
    }

    #[tokio::test]
    async fn unknown_events_are_acknowledged_without_writes() {
        let mut user_repository = MockUserRepository::new();
        user_repository.expect_update_subscription().times(0);

        let mut billing_provider = MockBillingProvider::new();
        billing_provider.expect_verify_webhook().returning(|_, _| {
            Ok(BillingEvent::Ignored {
                event_type: "invoice.paid".to_string(),
            })
        });

        let usecase = BillingUseCase::new(
            Arc::new(user_repository),
            Arc::new(MockDailyStatsRepository::new()),
            Arc::new(billing_provider),
        );

        assert!(usecase.handle_webhook(b"{}", "t=1,v1=ok").await.is_ok());
    }
}
