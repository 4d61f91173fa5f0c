use super::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;
use uuid::Uuid;

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_AUTH_SECRET", "supersecretjwtsecretforunittesting123");
        env::set_var("JWT_TOKEN_TTL_SECS", "3600");
    }
}

#[test]
fn test_session_token_roundtrip() {
    set_env_vars();
    let user_id = Uuid::new_v4();

    let token = issue_session_token(user_id, "test@example.com", false).unwrap();
    let claims = validate_session_token(&token).expect("Valid token should pass");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "test@example.com");
    assert!(!claims.is_admin);
}

#[test]
fn test_session_token_carries_admin_flag() {
    set_env_vars();
    let user_id = Uuid::new_v4();

    let token = issue_session_token(user_id, "admin@example.com", true).unwrap();
    let claims = validate_session_token(&token).unwrap();

    assert!(claims.is_admin);
}

#[test]
fn test_validate_session_token_expired() {
    set_env_vars();
    let my_claims = SessionClaims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        email: "test@example.com".to_string(),
        is_admin: false,
        exp: 1, // past
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret("supersecretjwtsecretforunittesting123".as_bytes()),
    )
    .unwrap();

    let result = validate_session_token(&token);
    assert!(result.is_err());
}

#[test]
fn test_validate_session_token_invalid_signature() {
    set_env_vars();
    let my_claims = SessionClaims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        email: "test@example.com".to_string(),
        is_admin: false,
        exp: 9999999999,
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret("wrongsecret".as_bytes()),
    )
    .unwrap();

    let result = validate_session_token(&token);
    assert!(result.is_err());
}

#[test]
fn test_password_hash_roundtrip() {
    let hash = hash_password("hunter2hunter2").unwrap();

    assert_ne!(hash, "hunter2hunter2");
    assert!(verify_password("hunter2hunter2", &hash).unwrap());
    assert!(!verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn test_verify_password_rejects_garbage_hash() {
    assert!(verify_password("whatever", "not-a-phc-string").is_err());
}
