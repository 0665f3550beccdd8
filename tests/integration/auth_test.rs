//! Integration tests for authentication flow.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
}

#[tokio::test]
async fn test_signup_assigns_default_role() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "username": "alice",
                "email": "Alice@Example.com",
                "password": "secret123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["role"], "user");
    assert_eq!(response.data()["user"]["email"], "alice@example.com");
    assert!(response.data()["user"].get("password_hash").is_none());
    assert!(response.data()["token"].as_str().is_some());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new().await;
    app.signup("alice").await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "username": "alice2",
                "email": "ALICE@example.com",
                "password": "secret123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error()["kind"], "CONFLICT");
    assert_eq!(response.error()["conflict"], "duplicate_email");
}

#[tokio::test]
async fn test_signup_short_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "abc",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error()["field"], "password");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    app.signup("alice").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": "alice@example.com",
                "password": "secret123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["user"]["username"], "alice");
    assert!(response.data()["token"].as_str().is_some());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.signup("alice").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": "alice@example.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": "nobody@example.com",
                "password": "secret123",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error(), unknown_email.error());
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app
        .request("GET", "/api/auth/me", None, Some(&alice.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["user"]["username"], "alice");
    assert_eq!(response.data()["role"], "user");
    let permissions = response.data()["permissions"].as_array().unwrap();
    assert!(permissions.contains(&json!("create_own_events")));
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error()["kind"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let tampered = format!("{}x", alice.token);

    let response = app
        .request("GET", "/api/auth/me", None, Some(&tampered))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error()["kind"], "TOKEN_INVALID");
}

#[tokio::test]
async fn test_invalid_optional_bearer_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/events", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
