//! Role entity model.

use eventhub_core::types::RoleId;
use serde::{Deserialize, Serialize};

use crate::permission::{Permission, PermissionSet};

/// A named bundle of permissions assigned to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable role identifier.
    pub id: RoleId,
    /// Unique role name (`admin`, `user`, `moderator`, ...).
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Permissions granted to holders of this role.
    pub permissions: PermissionSet,
}

impl Role {
    /// Whether this role grants `permission`.
    pub fn grants(&self, permission: &Permission) -> bool {
        self.permissions.grants(permission)
    }
}

/// A role inserted at bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct SeedRole {
    /// Fixed identifier.
    pub id: RoleId,
    /// Role name.
    pub name: &'static str,
    /// Description.
    pub description: &'static str,
    /// Permission tokens.
    pub permissions: &'static [&'static str],
}

impl SeedRole {
    /// Materialize as a [`Role`].
    pub fn to_role(&self) -> Role {
        Role {
            id: self.id,
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            permissions: PermissionSet::from(self.permissions),
        }
    }
}

/// Roles every deployment starts with.
pub const SEEDED_ROLES: [SeedRole; 3] = [
    SeedRole {
        id: RoleId::ADMIN,
        name: "admin",
        description: "Administrator with full access",
        permissions: &["all"],
    },
    SeedRole {
        id: RoleId::USER,
        name: "user",
        description: "Regular user who can manage their own events",
        permissions: &[
            "read_own_events",
            "create_own_events",
            "update_own_events",
            "delete_own_events",
        ],
    },
    SeedRole {
        id: RoleId::MODERATOR,
        name: "moderator",
        description: "Moderator who can review and manage all events",
        permissions: &[
            "read_all_events",
            "approve_events",
            "delete_any_event",
            "update_any_event",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_roles() {
        let admin = SEEDED_ROLES[0].to_role();
        assert!(admin.permissions.is_wildcard());

        let moderator = SEEDED_ROLES[2].to_role();
        assert!(moderator.grants(&Permission::ApproveEvents));
        assert!(!moderator.permissions.is_wildcard());

        let user = SEEDED_ROLES[1].to_role();
        assert!(!user.grants(&Permission::ReadAllEvents));
        assert_eq!(user.permissions.len(), 4);
    }
}
