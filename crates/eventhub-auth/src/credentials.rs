//! Email/password verification.

use std::sync::Arc;

use thiserror::Error;
use validator::ValidateEmail;

use eventhub_core::error::AppError;
use eventhub_database::store::UserStore;

use crate::password::PasswordHasher;
use crate::principal::Principal;
use crate::rbac::RoleRegistry;

/// Why a credential check failed.
#[derive(Debug, Error)]
pub enum AuthFailure {
    /// The email is not syntactically valid.
    #[error("malformed email address")]
    MalformedEmail,
    /// No account with that email.
    #[error("no account with that email")]
    NotFound,
    /// The account exists but is deactivated.
    #[error("account is deactivated")]
    Deactivated,
    /// The password does not match.
    #[error("wrong password")]
    WrongPassword,
    /// The store or hasher failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::MalformedEmail => AppError::validation("email", "Invalid email address"),
            // a missing account and a wrong password look the same to the caller
            AuthFailure::NotFound | AuthFailure::WrongPassword => {
                AppError::unauthenticated("Invalid email or password")
            }
            AuthFailure::Deactivated => AppError::account_deactivated("Account is deactivated"),
            AuthFailure::Store(err) => err,
        }
    }
}

/// Validates an email/password pair against the stored hash.
#[derive(Clone)]
pub struct CredentialVerifier {
    users: Arc<dyn UserStore>,
    roles: RoleRegistry,
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier").finish_non_exhaustive()
    }
}

impl CredentialVerifier {
    /// Creates a new verifier.
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: RoleRegistry,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
        }
    }

    /// Verify credentials, short-circuiting in order: email syntax, lookup,
    /// active status, then the password comparison. Read-only.
    pub async fn verify(&self, email: &str, password: &str) -> Result<Principal, AuthFailure> {
        let email = email.trim();
        if !email.validate_email() {
            return Err(AuthFailure::MalformedEmail);
        }

        let user = self
            .users
            .find_user_by_email(email)
            .await?
            .ok_or(AuthFailure::NotFound)?;

        if !user.is_active {
            return Err(AuthFailure::Deactivated);
        }

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AuthFailure::WrongPassword);
        }

        let role = self.roles.resolve_role(user.role_id).await?;
        Ok(Principal::from_parts(&user, &role))
    }
}
