//! User management handlers.

use axum::Json;
use axum::extract::{Path, State};

use eventhub_core::types::UserId;
use eventhub_service::UpdateProfileInput;

use crate::dto::request::ChangeRoleRequest;
use crate::dto::response::{ApiResponse, PaginatedResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::path::parse_id;
use crate::extractors::{ApiJson, ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<UserResponse>>>, ApiError> {
    let page = state
        .users
        .list_users(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(page))))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let user = state.users.get_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateProfileInput>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let user = state.users.update_user(&auth, id, req).await?;
    Ok(Json(ApiResponse::with_message("Profile updated", user.into())))
}

/// PUT /api/users/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let user = state.users.change_role(&auth, id, req.role_id).await?;
    Ok(Json(ApiResponse::with_message("Role updated", user.into())))
}

/// POST /api/users/{id}/toggle-active
pub async fn toggle_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let user = state.users.toggle_active(&auth, id).await?;
    let message = if user.is_active {
        "User activated"
    } else {
        "User deactivated"
    };
    Ok(Json(ApiResponse::with_message(message, user.into())))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    state.users.delete_user(&auth, id).await?;
    Ok(Json(ApiResponse::with_message("User deleted", ())))
}
