//! Event handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use eventhub_core::types::{EventId, PageRequest};
use eventhub_service::EventInput;

use crate::dto::request::EventListParams;
use crate::dto::response::{ApiResponse, EventResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::path::parse_id;
use crate::extractors::{ApiJson, ApiQuery, AuthUser, MaybeAuthUser, PaginationParams};
use crate::state::AppState;

type EventPage = Json<ApiResponse<PaginatedResponse<EventResponse>>>;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    ApiQuery(params): ApiQuery<EventListParams>,
) -> Result<EventPage, ApiError> {
    let filter = params.filter()?;
    let page = PageRequest::from_query(params.limit, params.offset);
    let events = state.events.query(viewer.principal(), filter, page).await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(events))))
}

/// GET /api/events/upcoming
pub async fn upcoming_events(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<EventPage, ApiError> {
    let events = state
        .events
        .upcoming(viewer.principal(), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(events))))
}

/// GET /api/events/mine
pub async fn my_events(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<EventPage, ApiError> {
    let events = state
        .events
        .mine(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(events))))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EventResponse>>, ApiError> {
    let id: EventId = parse_id(&id)?;
    let listing = state.events.get(viewer.principal(), id).await?;
    Ok(Json(ApiResponse::ok(listing.into())))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<EventInput>,
) -> Result<(StatusCode, Json<ApiResponse<EventResponse>>), ApiError> {
    let listing = state.events.create(&auth, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Event submitted for approval",
            listing.into(),
        )),
    ))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EventInput>,
) -> Result<Json<ApiResponse<EventResponse>>, ApiError> {
    let id: EventId = parse_id(&id)?;
    let listing = state.events.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::with_message("Event updated", listing.into())))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: EventId = parse_id(&id)?;
    state.events.delete(&auth, id).await?;
    Ok(Json(ApiResponse::with_message("Event deleted", ())))
}

/// POST /api/events/{id}/approve
pub async fn approve_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EventResponse>>, ApiError> {
    let id: EventId = parse_id(&id)?;
    let listing = state.events.approve(&auth, id).await?;
    Ok(Json(ApiResponse::with_message("Event approved", listing.into())))
}

/// POST /api/events/{id}/reject
pub async fn reject_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EventResponse>>, ApiError> {
    let id: EventId = parse_id(&id)?;
    let listing = state.events.reject(&auth, id).await?;
    Ok(Json(ApiResponse::with_message("Event rejected", listing.into())))
}
