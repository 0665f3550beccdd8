//! # eventhub-service
//!
//! Business logic for EventHub. Each service owns one area of the domain,
//! takes the authenticated [`Principal`](eventhub_auth::Principal) where an
//! operation is gated, and talks to storage only through the store traits.

pub mod auth;
pub mod event;
pub mod role;
pub mod user;
mod validation;

pub use auth::{AuthService, AuthSession, SignupInput};
pub use event::{EventInput, EventService};
pub use role::RoleService;
pub use user::{AdminUserService, CreateUserInput, UpdateProfileInput, UserService};

#[cfg(test)]
pub(crate) mod testing;
