use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::{
    auth::{ACCESS_TOKEN_COOKIE, AuthUser},
    axum_http::error_responses::AppError,
    usecases::accounts::AccountUseCase,
};
use domain::{
    repositories::users::UserRepository,
    value_objects::users::{LoginUserModel, RegisterUserModel},
};
use infra::postgres::{postgres_connection::PgPoolSquad, repositories::users::UserPostgres};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let account_usecase = AccountUseCase::new(Arc::new(user_repository));

    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/me", get(me))
        .with_state(Arc::new(account_usecase))
}

pub async fn signup<T>(
    State(account_usecase): State<Arc<AccountUseCase<T>>>,
    Json(body): Json<RegisterUserModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync + 'static,
{
    let profile = account_usecase.signup(body).await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn signin<T>(
    State(account_usecase): State<Arc<AccountUseCase<T>>>,
    jar: CookieJar,
    Json(body): Json<LoginUserModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync + 'static,
{
    let session = account_usecase.signin(body).await?;

    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true);

    Ok((jar.add(cookie), Json(session)))
}

pub async fn me<T>(
    State(account_usecase): State<Arc<AccountUseCase<T>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync + 'static,
{
    let profile = account_usecase.profile(auth.user_id).await?;

    Ok(Json(profile))
}
