//! Identity token issuance and verification.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::{JwtDecoder, TokenError, parse_bearer};
pub use encoder::{IssuedToken, JwtEncoder};

use eventhub_core::config::AuthConfig;
use eventhub_core::error::AppError;

use crate::principal::Principal;

/// Issues and verifies stateless identity tokens.
///
/// There is no revocation list; callers re-fetch the principal after
/// verification so deactivation takes effect on the next request.
#[derive(Debug, Clone)]
pub struct TokenService {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl TokenService {
    /// Build from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Sign a token carrying a snapshot of `principal`.
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, AppError> {
        self.encoder.issue(principal)
    }

    /// Verify a raw token string.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.decoder.verify(token)
    }

    /// Verify an `Authorization` header value of the form `Bearer <token>`.
    pub fn verify_bearer(&self, header: &str) -> Result<Claims, TokenError> {
        self.verify(parse_bearer(header)?)
    }
}
