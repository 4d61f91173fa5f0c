use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use tracing::info;

use crate::{
    auth::AdminUser, axum_http::error_responses::AppError,
    usecases::admin_stats::AdminStatsUseCase,
};
use domain::repositories::{
    daily_stats::DailyStatsRepository, generations::GenerationRepository, users::UserRepository,
};
use infra::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        daily_stats::DailyStatsPostgres, generations::GenerationPostgres, users::UserPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let generation_repository = GenerationPostgres::new(Arc::clone(&db_pool));
    let daily_stats_repository = DailyStatsPostgres::new(Arc::clone(&db_pool));

    let admin_stats_usecase = AdminStatsUseCase::new(
        Arc::new(user_repository),
        Arc::new(generation_repository),
        Arc::new(daily_stats_repository),
    );

    Router::new()
        .route("/stats", get(stats))
        .with_state(Arc::new(admin_stats_usecase))
}

pub async fn stats<U, G, D>(
    State(admin_stats_usecase): State<Arc<AdminStatsUseCase<U, G, D>>>,
    AdminUser(auth): AdminUser,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    G: GenerationRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
{
    info!(admin_id = %auth.user_id, "admin: stats requested");

    let overview = admin_stats_usecase.overview().await?;

    Ok(Json(overview))
}
