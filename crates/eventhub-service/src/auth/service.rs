//! Authentication service.

use serde::Deserialize;
use tracing::info;

use eventhub_auth::jwt::IssuedToken;
use eventhub_auth::{Authenticator, Credentials, Principal};
use eventhub_core::result::AppResult;
use eventhub_entity::user::User;

use crate::user::{CreateUserInput, UserService};

/// Self-service registration fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A user together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The account.
    pub user: User,
    /// Its resolved principal.
    pub principal: Principal,
    /// Bearer token for subsequent requests.
    pub token: IssuedToken,
}

/// Handles signup, login and bearer resolution.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserService,
    authenticator: Authenticator,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(users: UserService, authenticator: Authenticator) -> Self {
        Self {
            users,
            authenticator,
        }
    }

    /// Register an account with the default role and sign it in.
    pub async fn signup(&self, input: SignupInput) -> AppResult<AuthSession> {
        let user = self
            .users
            .create(CreateUserInput {
                username: input.username,
                email: input.email,
                password: input.password,
                role_id: None,
            })
            .await?;
        let principal = self.authenticator.principal_for(&user).await?;
        let token = self.authenticator.tokens().issue(&principal)?;

        info!(user_id = %user.id, "User signed up");
        Ok(AuthSession {
            user,
            principal,
            token,
        })
    }

    /// Verify email and password and issue a token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let principal = self
            .authenticator
            .authenticate(Credentials::Password { email, password })
            .await?;
        let user = self.users.get(principal.id).await?;
        let token = self.authenticator.tokens().issue(&principal)?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthSession {
            user,
            principal,
            token,
        })
    }

    /// Resolve the principal behind an `Authorization` header value.
    pub async fn authenticate_bearer(&self, header: &str) -> AppResult<Principal> {
        self.authenticator
            .authenticate(Credentials::Bearer(header))
            .await
    }

    /// The account behind an authenticated principal.
    pub async fn me(&self, principal: &Principal) -> AppResult<User> {
        self.users.get(principal.id).await
    }
}
