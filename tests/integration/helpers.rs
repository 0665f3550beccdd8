//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use eventhub_api::{AppState, build_app};
use eventhub_core::config::{AppConfig, AuthConfig};
use eventhub_core::types::{RoleId, UserId};
use eventhub_database::Stores;

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// In-memory stores for direct manipulation
    pub stores: Stores,
}

/// A signed-up user and their bearer token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub token: String,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub async fn new() -> Self {
        let config = AppConfig {
            auth: AuthConfig {
                jwt_secret: "integration-test-secret".into(),
                argon2_memory_kib: 64,
                argon2_iterations: 1,
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        };

        let stores = Stores::memory();
        stores.migrate().await.expect("Failed to seed roles");

        let state = AppState::new(config, stores.clone()).expect("Failed to build state");
        Self {
            router: build_app(state),
            stores,
        }
    }

    /// Sign up `username` with the default role
    pub async fn signup(&self, username: &str) -> TestUser {
        let response = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": "secret123",
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );

        TestUser {
            id: response.data()["user"]["id"]
                .as_str()
                .expect("No user id in signup response")
                .to_string(),
            token: response.data()["token"]
                .as_str()
                .expect("No token in signup response")
                .to_string(),
        }
    }

    /// Sign up `username` and move them onto `role`
    pub async fn signup_with_role(&self, username: &str, role: RoleId) -> TestUser {
        let user = self.signup(username).await;
        let id: UserId = user.id.parse().expect("Invalid user id");
        self.stores
            .users
            .update_role(id, role)
            .await
            .expect("Failed to update role")
            .expect("User vanished");
        user
    }

    /// Create an event as `user` and return its id
    pub async fn create_event(&self, user: &TestUser, title: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/events",
                Some(event_body(title)),
                Some(&user.token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Event creation failed: {:?}",
            response.body
        );

        response.data()["id"]
            .as_str()
            .expect("No event id in response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Valid event fields dated a month ahead.
pub fn event_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Lightning talks followed by pizza",
        "date": (Utc::now() + Duration::days(30)).to_rfc3339(),
        "address": "42 Harbour Road, Portsmouth",
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` member of a failure envelope.
    pub fn error(&self) -> &Value {
        &self.body["error"]
    }

    /// Titles of the items in a paginated `data` member.
    pub fn titles(&self) -> Vec<String> {
        self.data()["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["title"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
