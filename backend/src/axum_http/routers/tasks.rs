use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    auth::AuthUser, axum_http::error_responses::AppError, usecases::tasks::TaskUseCase,
};
use domain::{
    repositories::tasks::TaskRepository,
    value_objects::tasks::{InsertTaskModel, UpdateTaskModel},
};
use infra::postgres::{postgres_connection::PgPoolSquad, repositories::tasks::TaskPostgres};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let task_repository = TaskPostgres::new(Arc::clone(&db_pool));
    let task_usecase = TaskUseCase::new(Arc::new(task_repository));

    Router::new()
        .route("/", post(create))
        .route("/", get(list))
        .route("/:task_id", patch(update))
        .route("/:task_id", delete(remove))
        .with_state(Arc::new(task_usecase))
}

pub async fn create<T>(
    State(task_usecase): State<Arc<TaskUseCase<T>>>,
    auth: AuthUser,
    Json(body): Json<InsertTaskModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: TaskRepository + Send + Sync + 'static,
{
    let task = task_usecase.create(auth.user_id, body).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list<T>(
    State(task_usecase): State<Arc<TaskUseCase<T>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    T: TaskRepository + Send + Sync + 'static,
{
    let tasks = task_usecase.list(auth.user_id).await?;

    Ok(Json(tasks))
}

pub async fn update<T>(
    State(task_usecase): State<Arc<TaskUseCase<T>>>,
    auth: AuthUser,
    Path(task_id): Path<Uuid>,
    Json(body): Json<UpdateTaskModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: TaskRepository + Send + Sync + 'static,
{
    let task = task_usecase.update(auth.user_id, task_id, body).await?;

    Ok(Json(task))
}

pub async fn remove<T>(
    State(task_usecase): State<Arc<TaskUseCase<T>>>,
    auth: AuthUser,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    T: TaskRepository + Send + Sync + 'static,
{
    task_usecase.delete(auth.user_id, task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
