use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;
use domain::{
    repositories::{
        generations::GenerationRepository, schedule_generator::ScheduleGenerator,
        users::UserRepository,
    },
    value_objects::{
        billing::has_generation_access,
        enums::subscription_statuses::SubscriptionStatus,
        schedule::{
            GenerationPersistOutcome, ScheduleRequestModel, ScheduleResponseModel,
            build_schedule_prompt, pending_tasks,
        },
    },
};

const NO_CREDITS_MESSAGE: &str = "No credits remaining. Please upgrade to continue.";
const MISSING_FIELDS_MESSAGE: &str = "Tasks, start time, and end time are required";

/// Orchestrates one generation request: entitlement, validation, the hosted
/// call, then the transactional ledger/log writes. Credits are never spent
/// on a failed generation.
pub struct ScheduleGenerationUseCase<U, G, R>
where
    U: UserRepository + Send + Sync + 'static,
    G: ScheduleGenerator + Send + Sync + 'static,
    R: GenerationRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    schedule_generator: Arc<G>,
    generation_repository: Arc<R>,
}

impl<U, G, R> ScheduleGenerationUseCase<U, G, R>
where
    U: UserRepository + Send + Sync + 'static,
    G: ScheduleGenerator + Send + Sync + 'static,
    R: GenerationRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repository: Arc<U>,
        schedule_generator: Arc<G>,
        generation_repository: Arc<R>,
    ) -> Self {
        Self {
            user_repository,
            schedule_generator,
            generation_repository,
        }
    }

    pub async fn generate(
        &self,
        user_id: Uuid,
        request: ScheduleRequestModel,
    ) -> Result<ScheduleResponseModel, AppError> {
        info!(%user_id, "schedule_generation: requested");

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let subscription_status = SubscriptionStatus::from_str(&user.subscription_status);
        let subscription_active = subscription_status.is_active();

        if !has_generation_access(subscription_status, user.credits) {
            warn!(
                %user_id,
                credits = user.credits,
                subscription_status = %user.subscription_status,
                status = axum::http::StatusCode::PAYMENT_REQUIRED.as_u16(),
                "schedule_generation: entitlement denied"
            );
            return Err(AppError::PaymentRequired(NO_CREDITS_MESSAGE.to_string()));
        }

        let (tasks, start_time, end_time) =
            match (request.tasks, request.start_time, request.end_time) {
                (Some(tasks), Some(start_time), Some(end_time)) if !tasks.is_empty() => {
                    (tasks, start_time, end_time)
                }
                _ => {
                    warn!(%user_id, "schedule_generation: missing request fields");
                    return Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()));
                }
            };

        // A fully-done task list would produce a degenerate prompt; reject
        // before any external call.
        if pending_tasks(&tasks).is_empty() {
            warn!(%user_id, "schedule_generation: no pending tasks to schedule");
            return Err(AppError::BadRequest(
                "All tasks are already done".to_string(),
            ));
        }

        let prompt = build_schedule_prompt(&tasks, &start_time, &end_time);

        let schedule = self
            .schedule_generator
            .generate(prompt)
            .await
            .map_err(AppError::Generation)?;

        let response = ScheduleResponseModel { schedule };
        let content =
            serde_json::to_string(&response).map_err(|err| AppError::Internal(err.into()))?;

        let outcome = self
            .generation_repository
            .record_success(user_id, content, !subscription_active)
            .await?;

        if let GenerationPersistOutcome::CreditsExhausted = outcome {
            warn!(
                %user_id,
                "schedule_generation: credits exhausted by a concurrent request"
            );
            return Err(AppError::PaymentRequired(NO_CREDITS_MESSAGE.to_string()));
        }

        info!(
            %user_id,
            entries = response.schedule.len(),
            charged = !subscription_active,
            "schedule_generation: completed"
        );

        Ok(response)
    }
}
