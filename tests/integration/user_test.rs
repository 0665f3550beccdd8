//! Integration tests for user administration and role management.

use axum::http::StatusCode;
use serde_json::json;

use eventhub_core::types::RoleId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_users_admin_only() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let admin = app.signup_with_role("root", RoleId::ADMIN).await;

    let denied = app.request("GET", "/api/users", None, Some(&alice.token)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let listed = app.request("GET", "/api/users", None, Some(&admin.token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data()["total"], 2);
}

#[tokio::test]
async fn test_profile_access() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let admin = app.signup_with_role("root", RoleId::ADMIN).await;
    let path = format!("/api/users/{}", alice.id);

    let own = app.request("GET", &path, None, Some(&alice.token)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data()["username"], "alice");

    let other = app.request("GET", &path, None, Some(&bob.token)).await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    let by_admin = app.request("GET", &path, None, Some(&admin.token)).await;
    assert_eq!(by_admin.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    app.signup("bob").await;
    let path = format!("/api/users/{}", alice.id);

    let renamed = app
        .request(
            "PUT",
            &path,
            Some(json!({ "username": "alice_r" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["username"], "alice_r");
    assert_eq!(renamed.data()["email"], "alice@example.com");

    let taken = app
        .request(
            "PUT",
            &path,
            Some(json!({ "username": "BOB" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
    assert_eq!(taken.error()["conflict"], "duplicate_username");

    let password = app
        .request(
            "PUT",
            &path,
            Some(json!({ "password": "n3w-passw0rd" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(password.status, StatusCode::OK);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "alice@example.com", "password": "n3w-passw0rd" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_role_takes_effect_immediately() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let admin = app.signup_with_role("root", RoleId::ADMIN).await;
    let event = app.create_event(&alice, "Rust Meetup").await;
    let approve = format!("/api/events/{event}/approve");

    let before = app.request("POST", &approve, None, Some(&bob.token)).await;
    assert_eq!(before.status, StatusCode::FORBIDDEN);

    let promoted = app
        .request(
            "PUT",
            &format!("/api/users/{}/role", bob.id),
            Some(json!({ "role_id": 3 })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.data()["role_id"], 3);

    let after = app.request("POST", &approve, None, Some(&bob.token)).await;
    assert_eq!(after.status, StatusCode::OK);

    let unknown = app
        .request(
            "PUT",
            &format!("/api/users/{}/role", bob.id),
            Some(json!({ "role_id": 99 })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.error()["field"], "role_id");
}

#[tokio::test]
async fn test_deactivated_account_is_locked_out() {
    let app = TestApp::new().await;
    let bob = app.signup("bob").await;
    let admin = app.signup_with_role("root", RoleId::ADMIN).await;
    let toggle = format!("/api/users/{}/toggle-active", bob.id);

    let toggled = app.request("POST", &toggle, None, Some(&admin.token)).await;
    assert_eq!(toggled.status, StatusCode::OK);
    assert_eq!(toggled.data()["is_active"], false);

    let me = app.request("GET", "/api/auth/me", None, Some(&bob.token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.error()["kind"], "ACCOUNT_DEACTIVATED");

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "bob@example.com", "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login.error()["kind"], "ACCOUNT_DEACTIVATED");

    let restored = app.request("POST", &toggle, None, Some(&admin.token)).await;
    assert_eq!(restored.data()["is_active"], true);
    let me = app.request("GET", "/api/auth/me", None, Some(&bob.token)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_cannot_lock_out_self() {
    let app = TestApp::new().await;
    let admin = app.signup_with_role("root", RoleId::ADMIN).await;

    let toggled = app
        .request(
            "POST",
            &format!("/api/users/{}/toggle-active", admin.id),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(toggled.status, StatusCode::BAD_REQUEST);
    assert_eq!(toggled.error()["field"], "id");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/users/{}", admin.id),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user_removes_their_events() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let admin = app.signup_with_role("root", RoleId::ADMIN).await;
    app.create_event(&alice, "Rust Meetup").await;

    let before = app.request("GET", "/api/events", None, Some(&admin.token)).await;
    assert_eq!(before.data()["total"], 1);

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/users/{}", alice.id),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let after = app.request("GET", "/api/events", None, Some(&admin.token)).await;
    assert_eq!(after.data()["total"], 0);

    let stale = app.request("GET", "/api/auth/me", None, Some(&alice.token)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_roles() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let moderator = app.signup_with_role("mod", RoleId::MODERATOR).await;

    let denied = app.request("GET", "/api/roles", None, Some(&alice.token)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let listed = app
        .request("GET", "/api/roles", None, Some(&moderator.token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let names: Vec<&str> = listed
        .data()
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|role| role["name"].as_str())
        .collect();
    assert_eq!(names, vec!["admin", "user", "moderator"]);
}

#[tokio::test]
async fn test_delete_role_reassigns_users() {
    let app = TestApp::new().await;
    let moderator = app.signup_with_role("mod", RoleId::MODERATOR).await;
    let admin = app.signup_with_role("root", RoleId::ADMIN).await;

    let denied = app
        .request("DELETE", "/api/roles/3", None, Some(&moderator.token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let default_role = app
        .request("DELETE", "/api/roles/2", None, Some(&admin.token))
        .await;
    assert_eq!(default_role.status, StatusCode::BAD_REQUEST);

    let deleted = app
        .request("DELETE", "/api/roles/3", None, Some(&admin.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.data()["reassigned_users"], 1);

    let me = app
        .request("GET", "/api/auth/me", None, Some(&moderator.token))
        .await;
    assert_eq!(me.data()["role"], "user");

    let missing = app
        .request("DELETE", "/api/roles/3", None, Some(&admin.token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
