//! Integration tests for the event workflow and event reads.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use eventhub_core::types::RoleId;

use crate::helpers::{TestApp, event_body};

#[tokio::test]
async fn test_create_event_is_pending() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(event_body("Rust Meetup")),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["status"], "pending");
    assert_eq!(response.data()["is_approved"], false);
    assert_eq!(response.data()["organizer_id"], alice.id.as_str());
    assert_eq!(response.data()["organizer_name"], "alice");
    assert_eq!(response.data()["organizer_email"], "alice@example.com");
    assert!(response.data()["approved_by"].is_null());
}

#[tokio::test]
async fn test_create_event_requires_auth() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/events", Some(event_body("Rust Meetup")), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_event_validation() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let mut past = event_body("Rust Meetup");
    past["date"] = json!((Utc::now() - Duration::days(1)).to_rfc3339());
    let response = app
        .request("POST", "/api/events", Some(past), Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error()["field"], "date");

    let mut short = event_body("Rust Meetup");
    short["title"] = json!("ab");
    let response = app
        .request("POST", "/api/events", Some(short), Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error()["field"], "title");

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({ "title": "Missing fields" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error()["field"], "body");
}

#[tokio::test]
async fn test_pending_events_hidden_from_non_moderators() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let moderator = app.signup_with_role("mod", RoleId::MODERATOR).await;
    let id = app.create_event(&alice, "Rust Meetup").await;
    let path = format!("/api/events/{id}");

    let anonymous = app.request("GET", "/api/events", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.data()["total"], 0);

    let owner = app.request("GET", &path, None, Some(&alice.token)).await;
    assert_eq!(owner.status, StatusCode::NOT_FOUND);

    let privileged = app.request("GET", &path, None, Some(&moderator.token)).await;
    assert_eq!(privileged.status, StatusCode::OK);
    assert_eq!(privileged.data()["title"], "Rust Meetup");

    let listed = app
        .request("GET", "/api/events", None, Some(&moderator.token))
        .await;
    assert_eq!(listed.titles(), vec!["Rust Meetup"]);
}

#[tokio::test]
async fn test_approve_then_reject() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let moderator = app.signup_with_role("mod", RoleId::MODERATOR).await;
    let id = app.create_event(&alice, "Rust Meetup").await;

    let approved = app
        .request(
            "POST",
            &format!("/api/events/{id}/approve"),
            None,
            Some(&moderator.token),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.data()["status"], "approved");
    assert_eq!(approved.data()["approved_by"], moderator.id.as_str());
    assert!(approved.data()["approved_at"].is_string());

    let public = app
        .request("GET", &format!("/api/events/{id}"), None, None)
        .await;
    assert_eq!(public.status, StatusCode::OK);

    let rejected = app
        .request(
            "POST",
            &format!("/api/events/{id}/reject"),
            None,
            Some(&moderator.token),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.data()["status"], "rejected");
    assert!(rejected.data()["approved_by"].is_null());
    assert!(rejected.data()["approved_at"].is_null());

    let hidden = app
        .request("GET", &format!("/api/events/{id}"), None, None)
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_transition_conflicts() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let moderator = app.signup_with_role("mod", RoleId::MODERATOR).await;
    let id = app.create_event(&alice, "Rust Meetup").await;

    let reject_pending = app
        .request(
            "POST",
            &format!("/api/events/{id}/reject"),
            None,
            Some(&moderator.token),
        )
        .await;
    assert_eq!(reject_pending.status, StatusCode::CONFLICT);
    assert_eq!(reject_pending.error()["conflict"], "already_unapproved");

    let approve = format!("/api/events/{id}/approve");
    let first = app
        .request("POST", &approve, None, Some(&moderator.token))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request("POST", &approve, None, Some(&moderator.token))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.error()["conflict"], "already_approved");
}

#[tokio::test]
async fn test_moderation_requires_permission() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let id = app.create_event(&alice, "Rust Meetup").await;

    let response = app
        .request(
            "POST",
            &format!("/api/events/{id}/approve"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let moderator = app.signup_with_role("mod", RoleId::MODERATOR).await;
    let missing = app
        .request(
            "POST",
            "/api/events/00000000-0000-0000-0000-000000000000/approve",
            None,
            Some(&moderator.token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_rules() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let moderator = app.signup_with_role("mod", RoleId::MODERATOR).await;
    let id = app.create_event(&alice, "Rust Meetup").await;
    let path = format!("/api/events/{id}");

    let own = app
        .request("PUT", &path, Some(event_body("Rust Meetup #2")), Some(&alice.token))
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data()["title"], "Rust Meetup #2");

    let other = app
        .request("PUT", &path, Some(event_body("Hijacked")), Some(&bob.token))
        .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    let moderated = app
        .request(
            "PUT",
            &path,
            Some(event_body("Rust Meetup (moderated)")),
            Some(&moderator.token),
        )
        .await;
    assert_eq!(moderated.status, StatusCode::OK);

    let mut invalid = event_body("Rust Meetup");
    invalid["address"] = json!("x");
    let response = app
        .request("PUT", &path, Some(invalid), Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error()["field"], "address");
}

#[tokio::test]
async fn test_delete_rules() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let moderator = app.signup_with_role("mod", RoleId::MODERATOR).await;
    let own = app.create_event(&alice, "Rust Meetup").await;
    let other = app.create_event(&alice, "Go Meetup").await;

    let denied = app
        .request("DELETE", &format!("/api/events/{own}"), None, Some(&bob.token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let by_owner = app
        .request("DELETE", &format!("/api/events/{own}"), None, Some(&alice.token))
        .await;
    assert_eq!(by_owner.status, StatusCode::OK);

    let by_moderator = app
        .request(
            "DELETE",
            &format!("/api/events/{other}"),
            None,
            Some(&moderator.token),
        )
        .await;
    assert_eq!(by_moderator.status, StatusCode::OK);

    let gone = app
        .request(
            "DELETE",
            &format!("/api/events/{own}"),
            None,
            Some(&moderator.token),
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let moderator = app.signup_with_role("mod", RoleId::MODERATOR).await;

    for (user, title) in [(&alice, "Rust Meetup"), (&bob, "Go Workshop")] {
        let id = app.create_event(user, title).await;
        let approved = app
            .request(
                "POST",
                &format!("/api/events/{id}/approve"),
                None,
                Some(&moderator.token),
            )
            .await;
        assert_eq!(approved.status, StatusCode::OK);
    }
    app.create_event(&alice, "Rust Pending").await;

    let all = app.request("GET", "/api/events", None, None).await;
    assert_eq!(all.data()["total"], 2);

    let search = app.request("GET", "/api/events?q=RUST", None, None).await;
    assert_eq!(search.titles(), vec!["Rust Meetup"]);

    let by_bob = app
        .request("GET", &format!("/api/events?organizer={}", bob.id), None, None)
        .await;
    assert_eq!(by_bob.titles(), vec!["Go Workshop"]);

    let upcoming = app.request("GET", "/api/events/upcoming", None, None).await;
    assert_eq!(upcoming.data()["total"], 2);

    let today = Utc::now().date_naive();
    let range = format!(
        "/api/events?from={}&to={}",
        today,
        today + Duration::days(60)
    );
    let ranged = app.request("GET", &range, None, None).await;
    assert_eq!(ranged.data()["total"], 2);

    let paged = app
        .request("GET", "/api/events?limit=1&offset=0", None, None)
        .await;
    assert_eq!(paged.data()["items"].as_array().unwrap().len(), 1);
    assert_eq!(paged.data()["has_next"], true);

    let mine = app
        .request("GET", "/api/events/mine", None, Some(&alice.token))
        .await;
    assert_eq!(mine.titles(), vec!["Rust Meetup"]);
}

#[tokio::test]
async fn test_invalid_queries() {
    let app = TestApp::new().await;

    let inverted = app
        .request(
            "GET",
            "/api/events?from=2030-02-01&to=2030-01-01",
            None,
            None,
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);
    assert_eq!(inverted.error()["field"], "end");

    let half_open = app
        .request("GET", "/api/events?from=2030-01-01", None, None)
        .await;
    assert_eq!(half_open.status, StatusCode::BAD_REQUEST);
    assert_eq!(half_open.error()["field"], "to");

    let bad_id = app
        .request("GET", "/api/events/not-an-id", None, None)
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.error()["field"], "id");
}
