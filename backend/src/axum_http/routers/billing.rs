use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};

use crate::{
    auth::AuthUser, axum_http::error_responses::AppError, config::config_model::DotEnvyConfig,
    usecases::billing::BillingUseCase,
};
use domain::{
    repositories::{
        billing::BillingProvider, daily_stats::DailyStatsRepository, users::UserRepository,
    },
    value_objects::billing::CheckoutRequestModel,
};
use infra::{
    payments::stripe_client::{StripeClient, StripeClientConfig},
    postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{daily_stats::DailyStatsPostgres, users::UserPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let daily_stats_repository = DailyStatsPostgres::new(Arc::clone(&db_pool));
    let billing_provider = StripeClient::new(StripeClientConfig {
        secret_key: config.stripe.secret_key.clone(),
        webhook_secret: config.stripe.webhook_secret.clone(),
        hobby_price_id: config.stripe.hobby_price_id.clone(),
        pro_price_id: config.stripe.pro_price_id.clone(),
        success_url: config.stripe.success_url.clone(),
        cancel_url: config.stripe.cancel_url.clone(),
        portal_return_url: config.stripe.portal_return_url.clone(),
    });

    let billing_usecase = BillingUseCase::new(
        Arc::new(user_repository),
        Arc::new(daily_stats_repository),
        Arc::new(billing_provider),
    );

    Router::new()
        .route("/checkout", post(checkout))
        .route("/portal", post(portal))
        .route("/webhook", post(webhook))
        .with_state(Arc::new(billing_usecase))
}

pub async fn checkout<U, D, B>(
    State(billing_usecase): State<Arc<BillingUseCase<U, D, B>>>,
    auth: AuthUser,
    Json(body): Json<CheckoutRequestModel>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    let session = billing_usecase.checkout(auth.user_id, body.plan).await?;

    Ok(Json(session))
}

pub async fn portal<U, D, B>(
    State(billing_usecase): State<Arc<BillingUseCase<U, D, B>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    let session = billing_usecase.portal(auth.user_id).await?;

    Ok(Json(session))
}

/// Signature-authenticated provider callback; never session-gated.
pub async fn webhook<U, D, B>(
    State(billing_usecase): State<Arc<BillingUseCase<U, D, B>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
    B: BillingProvider + Send + Sync + 'static,
{
    let signature_header = headers
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing stripe-signature header".to_string()))?;

    billing_usecase
        .handle_webhook(&body, signature_header)
        .await?;

    Ok(StatusCode::OK)
}
