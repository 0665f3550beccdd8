//! Permission tokens and permission sets.

pub mod action;
pub mod set;

pub use action::Permission;
pub use set::PermissionSet;
