//! Auth handlers: signup, login, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use eventhub_service::SignupInput;

use crate::dto::request::{LoginRequest, validate_request};
use crate::dto::response::{ApiResponse, AuthResponse, MeResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupInput>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    let session = state.auth.signup(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Account created",
            AuthResponse::new(session.user, &session.principal, session.token),
        )),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    validate_request(&req)?;
    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse::new(
        session.user,
        &session.principal,
        session.token,
    ))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MeResponse>>, ApiError> {
    let user = state.auth.me(&auth).await?;

    Ok(Json(ApiResponse::ok(MeResponse {
        user: user.into(),
        role: auth.role_name.clone(),
        permissions: auth.permissions.to_tokens(),
    })))
}
