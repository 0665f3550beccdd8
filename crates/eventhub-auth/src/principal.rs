//! The resolved identity making a request.

use serde::Serialize;

use eventhub_core::types::{RoleId, UserId};
use eventhub_entity::permission::{Permission, PermissionSet};
use eventhub_entity::role::Role;
use eventhub_entity::user::User;

/// An authenticated user together with their effective permissions.
///
/// Never persisted; rebuilt from a fresh user lookup on every request so
/// role changes and deactivation apply immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// User id.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Current role id.
    pub role_id: RoleId,
    /// Current role name.
    pub role_name: String,
    /// Permissions granted by the current role.
    pub permissions: PermissionSet,
    /// Account status at resolution time.
    pub is_active: bool,
}

impl Principal {
    /// Combine a user row with its role.
    pub fn from_parts(user: &User, role: &Role) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role_id: role.id,
            role_name: role.name.clone(),
            permissions: role.permissions.clone(),
            is_active: user.is_active,
        }
    }

    /// Whether the role grants `permission`, honouring the wildcard.
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.grants(permission)
    }
}
