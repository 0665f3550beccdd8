//! User lifecycle and admin user management services.

pub mod admin;
pub mod service;
pub mod validation;

pub use admin::AdminUserService;
pub use service::{CreateUserInput, UpdateProfileInput, UserService};
