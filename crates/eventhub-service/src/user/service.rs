//! User lifecycle: account creation, profile edits, role and status changes.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use eventhub_auth::rbac::RoleRegistry;
use eventhub_auth::{PasswordHasher, PasswordValidator};
use eventhub_core::error::{AppError, ConflictKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::{PageRequest, PageResponse, RoleId, UserId};
use eventhub_database::store::UserStore;
use eventhub_entity::user::{NewUser, ProfileChanges, User};

use super::validation::{normalize_email, normalize_username};

/// Fields for a new account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    /// Username (unique, case-insensitive).
    pub username: String,
    /// Email (unique, case-insensitive).
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Role; the configured default role when absent.
    #[serde(default)]
    pub role_id: Option<RoleId>,
}

/// Profile fields to change; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Creates and maintains user accounts.
///
/// Uniqueness is checked before every write and enforced again by the
/// store, which reports a lost race as the same conflict.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    roles: RoleRegistry,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: RoleRegistry,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
            validator,
        }
    }

    /// The role registry this service resolves roles through.
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// Create an account.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<User> {
        let username = normalize_username(&input.username)?;
        let email = normalize_email(&input.email)?;
        self.validator
            .validate(&input.password, &[&username, &email])?;

        let role = match input.role_id {
            Some(id) => self.roles.ensure_assignable(id).await?,
            None => self.roles.default_role().await?,
        };
        self.ensure_unique(Some(&email), Some(&username), None)
            .await?;

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .insert_user(NewUser {
                username,
                email,
                password_hash,
                role_id: role.id,
            })
            .await?;

        info!(user_id = %user.id, role = %role.name, "User created");
        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn get(&self, id: UserId) -> AppResult<User> {
        self.users
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Lists users, oldest first.
    pub async fn list(&self, page: PageRequest) -> AppResult<PageResponse<User>> {
        self.users.list_users(page).await
    }

    /// Change username, email and/or password.
    pub async fn update_profile(&self, id: UserId, input: UpdateProfileInput) -> AppResult<User> {
        let username = input
            .username
            .as_deref()
            .map(normalize_username)
            .transpose()?;
        let email = input.email.as_deref().map(normalize_email).transpose()?;
        let current = self.get(id).await?;

        let password_hash = match input.password.as_deref() {
            Some(password) => {
                let name = username.as_deref().unwrap_or(&current.username);
                let mail = email.as_deref().unwrap_or(&current.email);
                self.validator.validate(password, &[name, mail])?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        self.ensure_unique(email.as_deref(), username.as_deref(), Some(id))
            .await?;

        let changes = ProfileChanges {
            username,
            email,
            password_hash,
        };
        if changes.is_empty() {
            return Ok(current);
        }

        let user = self
            .users
            .update_profile(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %id, "Profile updated");
        Ok(user)
    }

    /// Assign a different role.
    pub async fn change_role(&self, id: UserId, role_id: RoleId) -> AppResult<User> {
        let role = self.roles.ensure_assignable(role_id).await?;
        let user = self
            .users
            .update_role(id, role.id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %id, role = %role.name, "User role changed");
        Ok(user)
    }

    /// Flip the account between active and deactivated.
    pub async fn toggle_active(&self, id: UserId) -> AppResult<User> {
        let user = self
            .users
            .toggle_active(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %id, is_active = user.is_active, "User status toggled");
        Ok(user)
    }

    /// Delete an account together with the events it organizes.
    pub async fn delete(&self, id: UserId) -> AppResult<()> {
        if !self.users.delete_user(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn ensure_unique(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        exclude: Option<UserId>,
    ) -> AppResult<()> {
        if let Some(email) = email {
            if let Some(existing) = self.users.find_user_by_email(email).await? {
                if Some(existing.id) != exclude {
                    return Err(AppError::conflict(
                        ConflictKind::DuplicateEmail,
                        "Email already in use",
                    ));
                }
            }
        }
        if let Some(username) = username {
            if let Some(existing) = self.users.find_user_by_username(username).await? {
                if Some(existing.id) != exclude {
                    return Err(AppError::conflict(
                        ConflictKind::DuplicateUsername,
                        "Username already taken",
                    ));
                }
            }
        }
        Ok(())
    }
}
