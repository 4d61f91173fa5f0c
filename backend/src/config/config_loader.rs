use anyhow::{Ok, Result};

use super::config_model::{AuthSecret, BackendServer, Database, DotEnvyConfig, OpenAi, Stripe};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: std::env::var("SERVER_PORT_BACKEND")
            .expect("SERVER_PORT_BACKEND is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let openai = OpenAi {
        api_key: std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY is invalid"),
        model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
        base_url: std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
    };

    let success_url = std::env::var("STRIPE_SUCCESS_URL").expect("STRIPE_SUCCESS_URL is invalid");
    let stripe = Stripe {
        secret_key: std::env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY is invalid"),
        webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET")
            .expect("STRIPE_WEBHOOK_SECRET is invalid"),
        hobby_price_id: std::env::var("STRIPE_HOBBY_PRICE_ID")
            .expect("STRIPE_HOBBY_PRICE_ID is invalid"),
        pro_price_id: std::env::var("STRIPE_PRO_PRICE_ID")
            .expect("STRIPE_PRO_PRICE_ID is invalid"),
        cancel_url: std::env::var("STRIPE_CANCEL_URL").expect("STRIPE_CANCEL_URL is invalid"),
        portal_return_url: std::env::var("STRIPE_PORTAL_RETURN_URL")
            .unwrap_or_else(|_| success_url.clone()),
        success_url,
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        openai,
        stripe,
    })
}

pub fn get_auth_secret() -> Result<AuthSecret> {
    dotenvy::dotenv().ok();

    Ok(AuthSecret {
        jwt_secret: std::env::var("JWT_AUTH_SECRET").expect("JWT_AUTH_SECRET is invalid"),
        token_ttl_secs: std::env::var("JWT_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()?,
    })
}
