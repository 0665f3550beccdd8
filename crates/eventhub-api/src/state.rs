//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use eventhub_auth::rbac::RoleRegistry;
use eventhub_auth::{
    Authenticator, CredentialVerifier, PasswordHasher, PasswordValidator, TokenService,
};
use eventhub_core::config::AppConfig;
use eventhub_core::result::AppResult;
use eventhub_database::Stores;
use eventhub_service::{AdminUserService, AuthService, EventService, RoleService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Every field is
/// cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Record stores
    pub stores: Stores,

    // ── Services ─────────────────────────────────────────────
    /// Signup, login and bearer resolution
    pub auth: AuthService,
    /// Event workflow and reads
    pub events: EventService,
    /// User management
    pub users: AdminUserService,
    /// Role management
    pub roles: RoleService,
}

impl AppState {
    /// Wire every service over `stores`.
    pub fn new(config: AppConfig, stores: Stores) -> AppResult<Self> {
        let auth_config = &config.auth;
        let roles = RoleRegistry::new(stores.roles.clone(), auth_config);
        let hasher = Arc::new(PasswordHasher::new(auth_config)?);
        let validator = Arc::new(PasswordValidator::new(auth_config));

        let user_service = UserService::new(
            stores.users.clone(),
            roles.clone(),
            hasher.clone(),
            validator,
        );
        let verifier = CredentialVerifier::new(stores.users.clone(), roles.clone(), hasher);
        let authenticator = Authenticator::new(
            stores.users.clone(),
            roles.clone(),
            TokenService::new(auth_config),
            verifier,
        );

        Ok(Self {
            auth: AuthService::new(user_service.clone(), authenticator),
            events: EventService::new(stores.events.clone()),
            users: AdminUserService::new(user_service),
            roles: RoleService::new(roles),
            stores,
            config: Arc::new(config),
        })
    }
}
