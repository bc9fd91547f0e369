mod common;

use common::*;
use linkedicci::error::Error;
use linkedicci::services::auth_service::RegisterOutcome;
use linkedicci::utils::validation::{
    field_message, MSG_EMAIL_REQUIRED, MSG_PASSWORD_MISMATCH, MSG_PASSWORD_TOO_SHORT,
};
use linkedicci::AppContext;
use std::sync::Arc;

#[tokio::test]
async fn invalid_credentials_never_reach_the_network() {
    let backend = Arc::new(FakeBackend::new());
    let ctx = AppContext::with_api(backend.clone(), test_session("auth"));

    let err = ctx.auth.login("", "password123").await.unwrap_err();
    let Error::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(
        field_message(&errors, "email").as_deref(),
        Some(MSG_EMAIL_REQUIRED)
    );

    let err = ctx.auth.login("ana@mail.com", "corta").await.unwrap_err();
    let Error::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(
        field_message(&errors, "password").as_deref(),
        Some(MSG_PASSWORD_TOO_SHORT)
    );

    assert_eq!(backend.total_calls(), 0);
    assert!(!ctx.auth.is_authenticated());
}

#[tokio::test]
async fn mismatched_passwords_block_registration_locally() {
    let backend = Arc::new(FakeBackend::new());
    let ctx = AppContext::with_api(backend.clone(), test_session("auth"));

    let err = ctx
        .auth
        .register("Ana", "ana@mail.com", "password123", "password124")
        .await
        .unwrap_err();
    let Error::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(
        field_message(&errors, "confirmPassword").as_deref(),
        Some(MSG_PASSWORD_MISMATCH)
    );
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn login_persists_the_bearer_token() {
    let backend = Arc::new(FakeBackend::new());
    let ctx = AppContext::with_api(backend.clone(), test_session("auth"));

    ctx.auth.login("ana@mail.com", "password123").await.unwrap();

    assert!(ctx.auth.is_authenticated());
    assert_eq!(
        ctx.session.load().as_deref(),
        Some("token-ana@mail.com")
    );
    ctx.session.clear().unwrap();
}

#[tokio::test]
async fn registration_chains_an_automatic_login() {
    let backend = Arc::new(FakeBackend::new());
    let ctx = AppContext::with_api(backend.clone(), test_session("auth"));

    let outcome = ctx
        .auth
        .register("Ana", "ana@mail.com", "password123", "password123")
        .await
        .unwrap();

    assert_eq!(outcome, RegisterOutcome::LoggedIn);
    assert_eq!(backend.call_count("register:ana@mail.com"), 1);
    assert_eq!(backend.call_count("login:ana@mail.com"), 1);
    assert!(ctx.auth.is_authenticated());
    ctx.session.clear().unwrap();
}

#[tokio::test]
async fn a_failed_auto_login_is_reported_not_raised() {
    let backend = Arc::new(FakeBackend::new());
    *backend.fail_login.lock().unwrap() = true;
    let ctx = AppContext::with_api(backend.clone(), test_session("auth"));

    let outcome = ctx
        .auth
        .register("Ana", "ana@mail.com", "password123", "password123")
        .await
        .unwrap();

    assert!(matches!(outcome, RegisterOutcome::AutoLoginFailed { .. }));
    assert!(!ctx.auth.is_authenticated());
}

#[tokio::test]
async fn logout_clears_the_token_and_the_cache() {
    let backend = Arc::new(FakeBackend::new());
    let ctx = AppContext::with_api(backend.clone(), test_session("auth"));

    ctx.auth.login("ana@mail.com", "password123").await.unwrap();
    ctx.cache.store_profile(student("s1", "Ana Rojas"));

    ctx.auth.logout().unwrap();

    assert!(!ctx.auth.is_authenticated());
    assert!(ctx.cache.profile().is_none());
    // A second logout with no stored token is a no-op, not an error.
    ctx.auth.logout().unwrap();
}
