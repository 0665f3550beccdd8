//! Signup, login and current-user resolution.

pub mod service;

pub use service::{AuthService, AuthSession, SignupInput};
