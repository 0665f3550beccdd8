//! Route definitions for the EventHub HTTP API.
//!
//! Domain routes are mounted under `/api`; the health check sits at the
//! root. Handlers receive `AppState` through Axum's `State` extractor.

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, without the middleware stack.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(role_routes())
        .merge(event_routes());

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes)
        .with_state(state)
}

/// Auth endpoints: signup, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// User management endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::users::list_users))
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route("/users/{id}/role", put(handlers::users::change_role))
        .route(
            "/users/{id}/toggle-active",
            post(handlers::users::toggle_active),
        )
}

/// Role endpoints
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", get(handlers::roles::list_roles))
        .route("/roles/{id}", delete(handlers::roles::delete_role))
}

/// Event workflow and read endpoints
fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route("/events/upcoming", get(handlers::events::upcoming_events))
        .route("/events/mine", get(handlers::events::my_events))
        .route(
            "/events/{id}",
            get(handlers::events::get_event)
                .put(handlers::events::update_event)
                .delete(handlers::events::delete_event),
        )
        .route("/events/{id}/approve", post(handlers::events::approve_event))
        .route("/events/{id}/reject", post(handlers::events::reject_event))
}
