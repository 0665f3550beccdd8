//! JWT token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use eventhub_core::config::AuthConfig;
use eventhub_core::error::AppError;

use super::claims::Claims;

/// Scheme prefix expected in the `Authorization` header.
const BEARER_PREFIX: &str = "Bearer ";

/// Why a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a well-formed bearer token.
    #[error("malformed token")]
    Malformed,
    /// The `exp` claim is in the past.
    #[error("token has expired")]
    Expired,
    /// The signature does not match.
    #[error("invalid token signature")]
    BadSignature,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::token_invalid(format!("Token rejected: {err}"))
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// Fails with [`TokenError::Malformed`] when the `Bearer ` prefix is absent
/// or nothing follows it.
pub fn parse_bearer(header: &str) -> Result<&str, TokenError> {
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(TokenError::Malformed)?
        .trim();
    if token.is_empty() {
        return Err(TokenError::Malformed);
    }
    Ok(token)
}

/// Validates HS256 identity tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.jwt_leeway_seconds;
        validation.set_issuer(&[config.jwt_issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                _ => TokenError::Malformed,
            })
    }
}
