//! Ownership-or-permission policies for event actions.

use eventhub_core::types::UserId;
use eventhub_entity::event::Visibility;
use eventhub_entity::permission::Permission;

use super::enforcer::RbacEnforcer;
use crate::principal::Principal;

/// A reusable gate: pass if the principal owns the resource (when the
/// bypass is enabled) or holds any of the listed permissions.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    /// Whether the resource owner passes without a permission.
    pub owner_bypass: bool,
    /// Permissions that grant access to anyone's resource.
    pub permissions: &'static [Permission],
}

impl AccessPolicy {
    /// Edit an event.
    pub const EDIT_EVENT: AccessPolicy = AccessPolicy {
        owner_bypass: true,
        permissions: &[Permission::UpdateAnyEvent, Permission::ApproveEvents],
    };

    /// Delete an event.
    pub const DELETE_EVENT: AccessPolicy = AccessPolicy {
        owner_bypass: true,
        permissions: &[Permission::DeleteAnyEvent, Permission::ApproveEvents],
    };

    /// Approve or reject an event. Owning it does not help.
    pub const MODERATE_EVENT: AccessPolicy = AccessPolicy {
        owner_bypass: false,
        permissions: &[Permission::ApproveEvents],
    };

    /// See events in every approval state.
    pub const READ_ALL_EVENTS: AccessPolicy = AccessPolicy {
        owner_bypass: false,
        permissions: &[Permission::ReadAllEvents, Permission::ApproveEvents],
    };

    /// Whether `principal` may act on a resource owned by `owner`.
    pub fn can_act_on(&self, principal: &Principal, owner: UserId) -> bool {
        (self.owner_bypass && is_owner(principal, owner)) || self.is_privileged(principal)
    }

    /// Whether `principal` passes on permissions alone.
    pub fn is_privileged(&self, principal: &Principal) -> bool {
        RbacEnforcer.require_any(principal, self.permissions)
    }
}

/// Whether `principal` owns a resource whose owner is `owner`.
pub fn is_owner(principal: &Principal, owner: UserId) -> bool {
    principal.id == owner
}

/// The read visibility for a principal, or for an anonymous reader.
///
/// This is the single predicate every event read path uses.
pub fn visibility_for(principal: Option<&Principal>) -> Visibility {
    match principal {
        Some(p) if AccessPolicy::READ_ALL_EVENTS.is_privileged(p) => Visibility::All,
        _ => Visibility::ApprovedOnly,
    }
}
