//! Role handlers.

use axum::Json;
use axum::extract::{Path, State};

use eventhub_core::types::RoleId;

use crate::dto::response::{ApiResponse, RoleDeletedResponse, RoleResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::path::parse_id;
use crate::state::AppState;

/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<RoleResponse>>>, ApiError> {
    let roles = state.roles.list(&auth).await?;
    Ok(Json(ApiResponse::ok(
        roles.into_iter().map(RoleResponse::from).collect(),
    )))
}

/// DELETE /api/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RoleDeletedResponse>>, ApiError> {
    let id = RoleId(parse_id(&id)?);
    let reassigned_users = state.roles.delete(&auth, id).await?;
    Ok(Json(ApiResponse::with_message(
        "Role deleted",
        RoleDeletedResponse {
            id,
            reassigned_users,
        },
    )))
}
