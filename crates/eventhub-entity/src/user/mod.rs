//! User domain entities.

pub mod model;

pub use model::{NewUser, ProfileChanges, User};
