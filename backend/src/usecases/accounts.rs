use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{auth, axum_http::error_responses::AppError};
use domain::{
    entities::users::RegisterUserEntity,
    repositories::users::UserRepository,
    value_objects::{
        billing::FREE_PLAN_CREDITS,
        enums::{
            subscription_plans::SubscriptionPlan, subscription_statuses::SubscriptionStatus,
        },
        users::{LoginUserModel, RegisterUserModel, SessionModel, UserProfileModel},
    },
};

pub struct AccountUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
}

impl<U> AccountUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    pub async fn signup(&self, body: RegisterUserModel) -> Result<UserProfileModel, AppError> {
        if self
            .user_repository
            .find_by_email(body.email.clone())
            .await?
            .is_some()
        {
            warn!(email = %body.email, "accounts: signup rejected, email already registered");
            return Err(AppError::BadRequest(
                "Email is already registered".to_string(),
            ));
        }

        let password_hash = auth::hash_password(&body.password)?;
        let now = Utc::now();

        let register_user_entity = RegisterUserEntity {
            email: body.email,
            display_name: body.name,
            password_hash,
            credits: FREE_PLAN_CREDITS,
            subscription_status: SubscriptionStatus::None.to_string(),
            subscription_plan: SubscriptionPlan::Free.to_string(),
            is_admin: false,
            created_at: now,
            updated_at: now,
        };

        let user_id = self.user_repository.register(register_user_entity).await?;
        info!(%user_id, "accounts: user registered");

        self.profile(user_id).await
    }

    pub async fn signin(&self, body: LoginUserModel) -> Result<SessionModel, AppError> {
        let user = self
            .user_repository
            .find_by_email(body.email.clone())
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !auth::verify_password(&body.password, &user.password_hash)? {
            warn!(email = %body.email, "accounts: signin rejected, bad credentials");
            return Err(AppError::Unauthorized);
        }

        let token = auth::issue_session_token(user.id, &user.email, user.is_admin)?;
        info!(user_id = %user.id, "accounts: signed in");

        Ok(SessionModel {
            token,
            user: user.into(),
        })
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfileModel, AppError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{entities::users::UserEntity, repositories::users::MockUserRepository};
    use std::env;

    fn set_env_vars() {
        unsafe {
            env::set_var("JWT_AUTH_SECRET", "supersecretjwtsecretforunittesting123");
        }
    }

    fn stored_user(user_id: Uuid, password: &str) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id: user_id,
            email: "user@example.com".to_string(),
            display_name: Some("User".to_string()),
            password_hash: auth::hash_password(password).unwrap(),
            credits: FREE_PLAN_CREDITS,
            subscription_status: "none".to_string(),
            subscription_plan: "free".to_string(),
            stripe_customer_ref: None,
            is_admin: false,
            last_active_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let user_id = Uuid::new_v4();

        let mut user_repository = MockUserRepository::new();
        let existing = stored_user(user_id, "correct horse");
        user_repository.expect_find_by_email().returning(move |_| Ok(Some(existing.clone())));
        user_repository.expect_register().times(0);

        let usecase = AccountUseCase::new(Arc::new(user_repository));

        let result = usecase
            .signup(RegisterUserModel {
                email: "user@example.com".to_string(),
                name: None,
                password: "correct horse".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn signup_seeds_free_plan_credits() {
        let user_id = Uuid::new_v4();

        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_find_by_email()
            .returning(|_| Ok(None));
        user_repository
            .expect_register()
            .withf(|entity| {
                entity.credits == FREE_PLAN_CREDITS
                    && entity.subscription_status == "none"
                    && entity.subscription_plan == "free"
                    && !entity.is_admin
            })
            .returning(move |_| Ok(user_id));

        let registered = stored_user(user_id, "correct horse");
        user_repository.expect_find_by_id().returning(move |_| Ok(Some(registered.clone())));

        let usecase = AccountUseCase::new(Arc::new(user_repository));

        let profile = usecase
            .signup(RegisterUserModel {
                email: "user@example.com".to_string(),
                name: Some("User".to_string()),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(profile.credits, FREE_PLAN_CREDITS);
    }

    #[tokio::test]
    async fn signin_rejects_wrong_password() {
        let user_id = Uuid::new_v4();

        let mut user_repository = MockUserRepository::new();
        let existing = stored_user(user_id, "correct horse");
        user_repository.expect_find_by_email().returning(move |_| Ok(Some(existing.clone())));

        let usecase = AccountUseCase::new(Arc::new(user_repository));

        let result = usecase
            .signin(LoginUserModel {
                email: "user@example.com".to_string(),
                password: "battery staple".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn signin_rejects_unknown_email() {
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_find_by_email()
            .returning(|_| Ok(None));

        let usecase = AccountUseCase::new(Arc::new(user_repository));

        let result = usecase
            .signin(LoginUserModel {
                email: "ghost@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn signin_issues_token_for_valid_credentials() {
        set_env_vars();
        let user_id = Uuid::new_v4();

        let mut user_repository = MockUserRepository::new();
        let existing = stored_user(user_id, "correct horse");
        user_repository.expect_find_by_email().returning(move |_| Ok(Some(existing.clone())));

        let usecase = AccountUseCase::new(Arc::new(user_repository));

        let session = usecase
            .signin(LoginUserModel {
                email: "user@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();

        let claims = auth::validate_session_token(&session.token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(session.user.id, user_id);
    }
}
