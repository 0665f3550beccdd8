//! `AuthUser` and `MaybeAuthUser` extractors: resolve the bearer token in
//! the `Authorization` header to a freshly loaded principal.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use eventhub_auth::Principal;
use eventhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated principal. Rejects the request without one.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// An optional principal for public reads.
///
/// A missing header yields `None`; a header that is present but invalid
/// still rejects the request.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Principal>);

impl MaybeAuthUser {
    /// The principal, if a bearer token was presented.
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

fn authorization_header(parts: &Parts) -> Result<Option<&str>, AppError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AppError::unauthenticated("Invalid Authorization header"))
        })
        .transpose()
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts)?
            .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;
        let principal = state.auth.authenticate_bearer(header).await?;
        Ok(AuthUser(principal))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authorization_header(parts)? {
            Some(header) => Ok(MaybeAuthUser(Some(
                state.auth.authenticate_bearer(header).await?,
            ))),
            None => Ok(MaybeAuthUser(None)),
        }
    }
}
