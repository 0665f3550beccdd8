//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted token lifetime: one year.
pub const MAX_JWT_TTL_MINUTES: u64 = 365 * 24 * 60;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Issuer claim written into and required on every token.
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,
    /// Token lifetime in minutes, at most [`MAX_JWT_TTL_MINUTES`].
    #[serde(default = "default_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Clock skew tolerated when checking `exp`.
    #[serde(default)]
    pub jwt_leeway_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn score (0-4). Zero disables the strength check.
    #[serde(default)]
    pub password_min_strength: u8,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// How long a role's permission set stays cached in-process.
    #[serde(default = "default_role_cache_ttl")]
    pub role_cache_ttl_seconds: u64,
    /// Role assigned on signup and used as the fallback when a role is deleted.
    #[serde(default = "default_role")]
    pub default_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: default_issuer(),
            jwt_ttl_minutes: default_ttl(),
            jwt_leeway_seconds: 0,
            password_min_length: default_password_min(),
            password_min_strength: 0,
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            role_cache_ttl_seconds: default_role_cache_ttl(),
            default_role: default_role(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "eventhub".to_string()
}

fn default_ttl() -> u64 {
    60
}

fn default_password_min() -> usize {
    6
}

fn default_argon2_memory() -> u32 {
    19 * 1024
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_role_cache_ttl() -> u64 {
    60
}

fn default_role() -> String {
    "user".to_string()
}
