use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

use crate::{
    auth::AuthUser, axum_http::error_responses::AppError, config::config_model::DotEnvyConfig,
    usecases::schedule_generation::ScheduleGenerationUseCase,
};
use domain::{
    repositories::{
        generations::GenerationRepository, schedule_generator::ScheduleGenerator,
        users::UserRepository,
    },
    value_objects::schedule::{ScheduleRequestModel, ScheduleResponseModel},
};
use infra::{
    ai::openai_client::OpenAiClient,
    postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{generations::GenerationPostgres, users::UserPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let generation_repository = GenerationPostgres::new(Arc::clone(&db_pool));
    let schedule_generator = OpenAiClient::new(
        config.openai.api_key.clone(),
        config.openai.model.clone(),
        config.openai.base_url.clone(),
    );

    let schedule_generation_usecase = ScheduleGenerationUseCase::new(
        Arc::new(user_repository),
        Arc::new(schedule_generator),
        Arc::new(generation_repository),
    );

    Router::new()
        .route("/generate", post(generate))
        .with_state(Arc::new(schedule_generation_usecase))
}

pub async fn generate<U, G, R>(
    State(schedule_generation_usecase): State<Arc<ScheduleGenerationUseCase<U, G, R>>>,
    auth: AuthUser,
    Json(body): Json<ScheduleRequestModel>,
) -> Result<Json<ScheduleResponseModel>, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    G: ScheduleGenerator + Send + Sync + 'static,
    R: GenerationRepository + Send + Sync + 'static,
{
    let response = schedule_generation_usecase
        .generate(auth.user_id, body)
        .await?;

    Ok(Json(response))
}
