//! Role listing and deletion.

pub mod service;

pub use service::RoleService;
