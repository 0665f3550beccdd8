//! Route handlers organized by domain.

pub mod auth;
pub mod events;
pub mod health;
pub mod roles;
pub mod users;
