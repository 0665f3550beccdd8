//! # eventhub-auth
//!
//! Authentication and authorization for EventHub.
//!
//! ## Modules
//!
//! - `jwt`: signed, time-bounded identity tokens
//! - `password`: Argon2id hashing and password policy
//! - `credentials`: email/password verification
//! - `rbac`: role registry, permission checks, and ownership policies
//! - `authenticate`: resolving a fresh [`Principal`] from a token or credentials

pub mod authenticate;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod rbac;

pub use authenticate::{Authenticator, Credentials};
pub use credentials::{AuthFailure, CredentialVerifier};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenError, TokenService};
pub use password::{PasswordHasher, PasswordValidator};
pub use principal::Principal;
pub use rbac::{AccessPolicy, RbacEnforcer, RoleRegistry};
