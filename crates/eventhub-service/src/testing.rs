//! Shared fixtures for service tests.

use std::sync::Arc;

use chrono::{Duration, Utc};

use eventhub_auth::rbac::RoleRegistry;
use eventhub_auth::{PasswordHasher, PasswordValidator, Principal};
use eventhub_core::config::AuthConfig;
use eventhub_core::types::RoleId;
use eventhub_database::MemoryStore;
use eventhub_database::migration::seed_roles;
use eventhub_database::store::UserStore;
use eventhub_entity::user::NewUser;

use crate::event::EventInput;
use crate::user::UserService;

pub(crate) struct Fixture {
    pub store: Arc<MemoryStore>,
    pub config: AuthConfig,
    pub roles: RoleRegistry,
}

pub(crate) async fn fixture() -> Fixture {
    let config = AuthConfig {
        argon2_memory_kib: 64,
        argon2_iterations: 1,
        ..AuthConfig::default()
    };
    let store = Arc::new(MemoryStore::new());
    seed_roles(store.as_ref()).await.unwrap();
    let roles = RoleRegistry::new(store.clone(), &config);
    Fixture {
        store,
        config,
        roles,
    }
}

impl Fixture {
    /// Insert a user with `role` and resolve their principal.
    pub async fn principal(&self, username: &str, role: RoleId) -> Principal {
        let user = self
            .store
            .insert_user(NewUser {
                username: username.into(),
                email: format!("{username}@example.com"),
                password_hash: "unused".into(),
                role_id: role,
            })
            .await
            .unwrap();
        let role = self.roles.resolve_role(role).await.unwrap();
        Principal::from_parts(&user, &role)
    }

    pub fn users(&self) -> UserService {
        UserService::new(
            self.store.clone(),
            self.roles.clone(),
            Arc::new(PasswordHasher::new(&self.config).unwrap()),
            Arc::new(PasswordValidator::new(&self.config)),
        )
    }
}

/// Valid event fields dated a month ahead.
pub(crate) fn event_input(title: &str) -> EventInput {
    EventInput {
        title: title.into(),
        description: "An evening of talks and pizza".into(),
        date: (Utc::now() + Duration::days(30)).to_rfc3339(),
        address: "1 Main Street, Springfield".into(),
    }
}
