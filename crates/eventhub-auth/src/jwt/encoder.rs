//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use eventhub_core::config::AuthConfig;
use eventhub_core::error::AppError;

use super::claims::Claims;
use crate::principal::Principal;

/// Creates signed HS256 identity tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Issuer claim.
    issuer: String,
    /// Token TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// When the token stops verifying.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            ttl_minutes: i64::try_from(config.jwt_ttl_minutes).unwrap_or(i64::MAX),
        }
    }

    /// Signs a token for `principal` valid for the configured TTL.
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = chrono::Duration::try_minutes(self.ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Token lifetime of {} minutes is out of range",
                    self.ttl_minutes
                ))
            })?;
        self.issue_with_expiry(principal, now, expires_at)
    }

    /// Signs a token with explicit timestamps.
    pub fn issue_with_expiry(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let claims = Claims {
            sub: principal.id,
            email: principal.email.clone(),
            username: principal.username.clone(),
            role_id: principal.role_id,
            role_name: principal.role_name.clone(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
