//! Gated user management: self-service profile access and admin operations.

use tracing::warn;

use eventhub_auth::Principal;
use eventhub_auth::rbac::RbacEnforcer;
use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;
use eventhub_core::types::{PageRequest, PageResponse, RoleId, UserId};
use eventhub_entity::user::User;

use super::service::{UpdateProfileInput, UserService};

/// Role name that unlocks user administration.
const ADMIN_ROLE: &str = "admin";

/// Applies the access rules in front of [`UserService`].
///
/// Reading and editing a profile is allowed to its owner and to admins;
/// everything else is admin-only.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    users: UserService,
    rbac: RbacEnforcer,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(users: UserService) -> Self {
        Self {
            users,
            rbac: RbacEnforcer::new(),
        }
    }

    /// Lists all users with pagination.
    pub async fn list_users(
        &self,
        actor: &Principal,
        page: PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.rbac.ensure_role(actor, ADMIN_ROLE)?;
        self.users.list(page).await
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, actor: &Principal, id: UserId) -> AppResult<User> {
        self.ensure_self_or_admin(actor, id)?;
        self.users.get(id).await
    }

    /// Updates a profile.
    pub async fn update_user(
        &self,
        actor: &Principal,
        id: UserId,
        input: UpdateProfileInput,
    ) -> AppResult<User> {
        self.ensure_self_or_admin(actor, id)?;
        self.users.update_profile(id, input).await
    }

    /// Assigns a role.
    pub async fn change_role(
        &self,
        actor: &Principal,
        id: UserId,
        role_id: RoleId,
    ) -> AppResult<User> {
        self.rbac.ensure_role(actor, ADMIN_ROLE)?;
        self.users.change_role(id, role_id).await
    }

    /// Activates or deactivates an account other than the caller's own.
    pub async fn toggle_active(&self, actor: &Principal, id: UserId) -> AppResult<User> {
        self.rbac.ensure_role(actor, ADMIN_ROLE)?;
        if actor.id == id {
            return Err(AppError::validation(
                "id",
                "You cannot change the status of your own account",
            ));
        }
        self.users.toggle_active(id).await
    }

    /// Deletes an account other than the caller's own.
    pub async fn delete_user(&self, actor: &Principal, id: UserId) -> AppResult<()> {
        self.rbac.ensure_role(actor, ADMIN_ROLE)?;
        if actor.id == id {
            return Err(AppError::validation("id", "You cannot delete your own account"));
        }
        self.users.delete(id).await
    }

    fn ensure_self_or_admin(&self, actor: &Principal, id: UserId) -> AppResult<()> {
        if actor.id == id || self.rbac.require_role(actor, ADMIN_ROLE) {
            return Ok(());
        }
        warn!(user_id = %actor.id, target = %id, "Profile access denied");
        Err(AppError::forbidden("You can only access your own profile"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_core::ErrorKind;

    use crate::testing::fixture;

    #[tokio::test]
    async fn test_profile_access() {
        let f = fixture().await;
        let admin = AdminUserService::new(f.users());
        let alice = f.principal("alice", RoleId::USER).await;
        let bob = f.principal("bob", RoleId::USER).await;
        let root = f.principal("root", RoleId::ADMIN).await;

        assert!(admin.get_user(&alice, alice.id).await.is_ok());
        assert!(admin.get_user(&root, alice.id).await.is_ok());
        let err = admin.get_user(&bob, alice.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let err = admin
            .update_user(&bob, alice.id, UpdateProfileInput::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_admin_only_operations() {
        let f = fixture().await;
        let admin = AdminUserService::new(f.users());
        let alice = f.principal("alice", RoleId::USER).await;
        let moderator = f.principal("mod", RoleId::MODERATOR).await;
        let root = f.principal("root", RoleId::ADMIN).await;

        for actor in [&alice, &moderator] {
            let err = admin
                .list_users(actor, PageRequest::default())
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Forbidden);
            let err = admin.delete_user(actor, alice.id).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Forbidden);
        }

        assert_eq!(
            admin.list_users(&root, PageRequest::default()).await.unwrap().total,
            3
        );
        let changed = admin
            .change_role(&root, alice.id, RoleId::MODERATOR)
            .await
            .unwrap();
        assert_eq!(changed.role_id, RoleId::MODERATOR);

        let err = admin.toggle_active(&root, root.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(!admin.toggle_active(&root, alice.id).await.unwrap().is_active);
        admin.delete_user(&root, alice.id).await.unwrap();
    }
}
