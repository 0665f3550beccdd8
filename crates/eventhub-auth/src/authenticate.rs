//! Resolving a fresh principal for every request.

use std::sync::Arc;

use tracing::debug;

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;
use eventhub_core::types::UserId;
use eventhub_database::store::UserStore;
use eventhub_entity::user::User;

use crate::credentials::CredentialVerifier;
use crate::jwt::{TokenService, parse_bearer};
use crate::principal::Principal;
use crate::rbac::RoleRegistry;

/// What the caller presented.
#[derive(Debug, Clone, Copy)]
pub enum Credentials<'a> {
    /// A raw `Authorization` header value.
    Bearer(&'a str),
    /// An email/password pair.
    Password {
        /// Email address.
        email: &'a str,
        /// Plaintext password.
        password: &'a str,
    },
}

/// Turns tokens or credentials into a freshly loaded [`Principal`].
///
/// Token claims are only used to find the user; the user row and role are
/// re-read on every call so deactivation and role changes apply to the
/// very next request.
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    roles: RoleRegistry,
    tokens: TokenService,
    verifier: CredentialVerifier,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("roles", &self.roles)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Creates a new authenticator.
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: RoleRegistry,
        tokens: TokenService,
        verifier: CredentialVerifier,
    ) -> Self {
        Self {
            users,
            roles,
            tokens,
            verifier,
        }
    }

    /// The token service used for verification.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Resolve a principal from a bearer header or email/password.
    ///
    /// - missing/invalid `Bearer ` scheme: `Unauthenticated`
    /// - bad signature, expiry or garbage token: `TokenInvalid`
    /// - account deactivated since issuance: `AccountDeactivated`
    pub async fn authenticate(&self, credentials: Credentials<'_>) -> AppResult<Principal> {
        match credentials {
            Credentials::Bearer(header) => {
                let token = parse_bearer(header).map_err(|_| {
                    AppError::unauthenticated("Authorization header must be 'Bearer <token>'")
                })?;
                let claims = self.tokens.verify(token)?;
                self.refresh(claims.user_id()).await
            }
            Credentials::Password { email, password } => {
                Ok(self.verifier.verify(email, password).await?)
            }
        }
    }

    /// Re-load a principal by id, rejecting deleted or deactivated accounts.
    pub async fn refresh(&self, id: UserId) -> AppResult<Principal> {
        let user = self
            .users
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::token_invalid("Account no longer exists"))?;
        if !user.is_active {
            debug!(user_id = %id, "Rejecting token for deactivated account");
            return Err(AppError::account_deactivated("Account is deactivated"));
        }
        self.principal_for(&user).await
    }

    /// Build a principal for an already loaded user.
    pub async fn principal_for(&self, user: &User) -> AppResult<Principal> {
        let role = self.roles.resolve_role(user.role_id).await?;
        Ok(Principal::from_parts(user, &role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_core::ErrorKind;
    use eventhub_core::config::AuthConfig;
    use eventhub_core::types::RoleId;
    use eventhub_database::MemoryStore;
    use eventhub_database::migration::seed_roles;
    use eventhub_entity::user::NewUser;

    use crate::password::PasswordHasher;

    struct Fixture {
        store: Arc<MemoryStore>,
        auth: Authenticator,
        hasher: Arc<PasswordHasher>,
    }

    async fn fixture() -> Fixture {
        let config = AuthConfig {
            argon2_memory_kib: 64,
            argon2_iterations: 1,
            ..AuthConfig::default()
        };
        let store = Arc::new(MemoryStore::new());
        seed_roles(store.as_ref()).await.unwrap();
        let roles = RoleRegistry::new(store.clone(), &config);
        let hasher = Arc::new(PasswordHasher::new(&config).unwrap());
        let verifier = CredentialVerifier::new(store.clone(), roles.clone(), hasher.clone());
        let auth = Authenticator::new(store.clone(), roles, TokenService::new(&config), verifier);
        Fixture {
            store,
            auth,
            hasher,
        }
    }

    async fn add_user(f: &Fixture, name: &str, password: &str) -> User {
        f.store
            .insert_user(NewUser {
                username: name.into(),
                email: format!("{name}@example.com"),
                password_hash: f.hasher.hash_password(password).unwrap(),
                role_id: RoleId::USER,
            })
            .await
            .unwrap()
    }

    async fn login(f: &Fixture, email: &str, password: &str) -> AppResult<Principal> {
        f.auth
            .authenticate(Credentials::Password { email, password })
            .await
    }

    #[tokio::test]
    async fn test_password_failures_map_to_error_kinds() {
        let f = fixture().await;
        let alice = add_user(&f, "alice", "secret1").await;

        let err = login(&f, "not-an-email", "secret1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.field.as_deref(), Some("email"));

        let missing = login(&f, "nobody@example.com", "secret1").await.unwrap_err();
        let wrong = login(&f, "alice@example.com", "wrong!").await.unwrap_err();
        assert_eq!(missing.kind, ErrorKind::Unauthenticated);
        assert_eq!(missing.kind, wrong.kind);
        assert_eq!(missing.message, wrong.message);

        f.store.toggle_active(alice.id).await.unwrap();
        let err = login(&f, "alice@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AccountDeactivated);
    }

    #[tokio::test]
    async fn test_bearer_flow() {
        let f = fixture().await;
        add_user(&f, "bob", "secret1").await;
        let principal = f
            .auth
            .authenticate(Credentials::Password {
                email: "bob@example.com",
                password: "secret1",
            })
            .await
            .unwrap();
        let token = f.auth.tokens().issue(&principal).unwrap().token;

        let header = format!("Bearer {token}");
        let again = f.auth.authenticate(Credentials::Bearer(&header)).await.unwrap();
        assert_eq!(again, principal);

        let err = f
            .auth
            .authenticate(Credentials::Bearer(&token))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);

        let err = f
            .auth
            .authenticate(Credentials::Bearer("Bearer abc.def.ghi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }

    #[tokio::test]
    async fn test_deactivation_invalidates_live_token() {
        let f = fixture().await;
        let carol = add_user(&f, "carol", "secret1").await;
        let principal = f.auth.principal_for(&carol).await.unwrap();
        let header = format!("Bearer {}", f.auth.tokens().issue(&principal).unwrap().token);

        assert!(f.auth.authenticate(Credentials::Bearer(&header)).await.is_ok());
        f.store.toggle_active(carol.id).await.unwrap();
        let err = f
            .auth
            .authenticate(Credentials::Bearer(&header))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::AccountDeactivated);
    }

    #[tokio::test]
    async fn test_role_change_applies_without_new_token() {
        let f = fixture().await;
        let dave = add_user(&f, "dave", "secret1").await;
        let principal = f.auth.principal_for(&dave).await.unwrap();
        let header = format!("Bearer {}", f.auth.tokens().issue(&principal).unwrap().token);

        f.store.update_role(dave.id, RoleId::MODERATOR).await.unwrap();
        let fresh = f.auth.authenticate(Credentials::Bearer(&header)).await.unwrap();
        assert_eq!(fresh.role_name, "moderator");
    }
}
