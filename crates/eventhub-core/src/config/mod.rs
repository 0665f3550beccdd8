//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files plus `EVENTHUB__*` environment variables. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, DatabaseProvider};
pub use self::logging::{LogFormat, LoggingConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// configuration (default.toml + environment overlay + env vars).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default`, an environment-specific overlay
    /// `config/{env}`, and environment variables prefixed with `EVENTHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EVENTHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let cfg: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the server cannot start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.server.port == 0 {
            return Err(AppError::configuration("server.port must be non-zero"));
        }
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.jwt_ttl_minutes == 0 {
            return Err(AppError::configuration("auth.jwt_ttl_minutes must be non-zero"));
        }
        if self.auth.jwt_ttl_minutes > auth::MAX_JWT_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_ttl_minutes must be at most {}",
                auth::MAX_JWT_TTL_MINUTES
            )));
        }
        if self.auth.password_min_strength > 4 {
            return Err(AppError::configuration(
                "auth.password_min_strength must be between 0 and 4",
            ));
        }
        if self.database.provider == DatabaseProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres provider",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.auth.password_min_length, 6);
        assert_eq!(cfg.auth.default_role, "user");
        assert_eq!(cfg.database.provider, DatabaseProvider::Memory);
    }

    #[test]
    fn test_rejects_empty_secret() {
        let mut cfg = AppConfig::default();
        cfg.auth.jwt_secret = "  ".into();
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Configuration);
    }

    #[test]
    fn test_token_lifetime_bounds() {
        let mut cfg = AppConfig::default();
        cfg.auth.jwt_ttl_minutes = 0;
        assert!(cfg.validate().is_err());

        cfg.auth.jwt_ttl_minutes = auth::MAX_JWT_TTL_MINUTES;
        assert!(cfg.validate().is_ok());

        cfg.auth.jwt_ttl_minutes = 1_000_000_000_000_000;
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Configuration);
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut cfg = AppConfig::default();
        cfg.database.provider = DatabaseProvider::Postgres;
        assert!(cfg.validate().is_err());
        cfg.database.url = "postgres://localhost/eventhub".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_unknown_provider_fails_to_deserialize() {
        let raw = serde_json::json!({ "database": { "provider": "mysql" } });
        assert!(serde_json::from_value::<AppConfig>(raw).is_err());
    }
}
