//! Permission and role gates.

use tracing::warn;

use eventhub_core::error::AppError;
use eventhub_entity::permission::Permission;

use crate::principal::Principal;

/// Decides allow/deny for a principal.
///
/// The boolean `require*` checks are pure; the `ensure*` variants turn a
/// denial into a logged `Forbidden` error. Every gate honours the
/// wildcard, so a role holding `all` passes role gates too.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// True iff the principal holds `permission` or the wildcard.
    pub fn require(&self, principal: &Principal, permission: &Permission) -> bool {
        principal.permissions.grants(permission)
    }

    /// True iff the principal holds any of `permissions` or the wildcard.
    pub fn require_any(&self, principal: &Principal, permissions: &[Permission]) -> bool {
        principal.permissions.grants_any(permissions)
    }

    /// True iff the principal's role is exactly `role_name`, or it holds the wildcard.
    pub fn require_role(&self, principal: &Principal, role_name: &str) -> bool {
        principal.permissions.is_wildcard() || principal.role_name == role_name
    }

    /// True iff the principal's role is one of `role_names`, or it holds the wildcard.
    pub fn require_any_role(&self, principal: &Principal, role_names: &[&str]) -> bool {
        principal.permissions.is_wildcard()
            || role_names.iter().any(|name| principal.role_name == *name)
    }

    /// Fails with `Forbidden` unless [`Self::require`] holds.
    pub fn ensure(&self, principal: &Principal, permission: &Permission) -> Result<(), AppError> {
        if self.require(principal, permission) {
            return Ok(());
        }
        Err(deny(principal, &format!("permission '{permission}'")))
    }

    /// Fails with `Forbidden` unless [`Self::require_any`] holds.
    pub fn ensure_any(
        &self,
        principal: &Principal,
        permissions: &[Permission],
    ) -> Result<(), AppError> {
        if self.require_any(principal, permissions) {
            return Ok(());
        }
        let wanted: Vec<&str> = permissions.iter().map(Permission::as_str).collect();
        Err(deny(principal, &format!("one of [{}]", wanted.join(", "))))
    }

    /// Fails with `Forbidden` unless [`Self::require_role`] holds.
    pub fn ensure_role(&self, principal: &Principal, role_name: &str) -> Result<(), AppError> {
        if self.require_role(principal, role_name) {
            return Ok(());
        }
        Err(deny(principal, &format!("role '{role_name}'")))
    }

    /// Fails with `Forbidden` unless [`Self::require_any_role`] holds.
    pub fn ensure_any_role(
        &self,
        principal: &Principal,
        role_names: &[&str],
    ) -> Result<(), AppError> {
        if self.require_any_role(principal, role_names) {
            return Ok(());
        }
        Err(deny(principal, &format!("one of roles [{}]", role_names.join(", "))))
    }
}

fn deny(principal: &Principal, requirement: &str) -> AppError {
    warn!(
        user_id = %principal.id,
        role = %principal.role_name,
        requirement,
        "Authorization denied"
    );
    AppError::forbidden(format!("Insufficient permissions: requires {requirement}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_core::types::{RoleId, UserId};
    use eventhub_entity::permission::PermissionSet;
    use eventhub_entity::role::SEEDED_ROLES;

    fn principal_with(role_index: usize) -> Principal {
        let role = SEEDED_ROLES[role_index].to_role();
        Principal {
            id: UserId::new(),
            username: "p".into(),
            email: "p@example.com".into(),
            role_id: role.id,
            role_name: role.name,
            permissions: role.permissions,
            is_active: true,
        }
    }

    #[test]
    fn test_wildcard_passes_every_gate() {
        let e = RbacEnforcer::new();
        let admin = principal_with(0);
        for p in Permission::known() {
            assert!(e.require(&admin, &p));
        }
        assert!(e.require_role(&admin, "moderator"));
        assert!(e.require_any_role(&admin, &["nonexistent"]));
    }

    #[test]
    fn test_all_permissions_iff_wildcard() {
        let e = RbacEnforcer::new();
        for (i, seed) in SEEDED_ROLES.iter().enumerate() {
            let p = principal_with(i);
            let has_all = Permission::known().iter().all(|perm| e.require(&p, perm));
            assert_eq!(has_all, seed.permissions.contains(&"all"), "role {}", seed.name);
        }
    }

    #[test]
    fn test_require_any() {
        let e = RbacEnforcer::new();
        let moderator = principal_with(2);
        assert!(e.require_any(
            &moderator,
            &[Permission::CreateOwnEvents, Permission::ApproveEvents]
        ));
        let user = principal_with(1);
        assert!(!e.require_any(&user, &[Permission::ApproveEvents, Permission::ReadAllEvents]));
    }

    #[test]
    fn test_role_match_is_exact() {
        let e = RbacEnforcer::new();
        let user = principal_with(1);
        assert!(e.require_role(&user, "user"));
        assert!(!e.require_role(&user, "User"));
        assert!(!e.require_role(&user, "use"));
        assert!(e.require_any_role(&user, &["admin", "user"]));
    }

    #[test]
    fn test_ensure_is_forbidden() {
        let e = RbacEnforcer::new();
        let mut nobody = principal_with(1);
        nobody.permissions = PermissionSet::new();
        nobody.role_id = RoleId(9);
        let err = e.ensure(&nobody, &Permission::ApproveEvents).unwrap_err();
        assert_eq!(err.kind, eventhub_core::ErrorKind::Forbidden);
        assert!(e.ensure_role(&nobody, "admin").is_err());
    }
}
