//! Role service.

use eventhub_auth::Principal;
use eventhub_auth::rbac::{RbacEnforcer, RoleRegistry};
use eventhub_core::result::AppResult;
use eventhub_core::types::RoleId;
use eventhub_entity::role::Role;

/// Exposes the role table to administrators and moderators.
#[derive(Debug, Clone)]
pub struct RoleService {
    registry: RoleRegistry,
    rbac: RbacEnforcer,
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(registry: RoleRegistry) -> Self {
        Self {
            registry,
            rbac: RbacEnforcer::new(),
        }
    }

    /// All roles, ordered by id.
    pub async fn list(&self, actor: &Principal) -> AppResult<Vec<Role>> {
        self.rbac.ensure_any_role(actor, &["admin", "moderator"])?;
        self.registry.list().await
    }

    /// Delete a role; its users fall back to the default role.
    ///
    /// Returns how many users were reassigned.
    pub async fn delete(&self, actor: &Principal, id: RoleId) -> AppResult<u64> {
        self.rbac.ensure_role(actor, "admin")?;
        self.registry.delete_role(id).await
    }
}
