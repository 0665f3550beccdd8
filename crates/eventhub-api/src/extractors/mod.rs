//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod path;
pub mod rejection;

pub use auth::{AuthUser, MaybeAuthUser};
pub use pagination::PaginationParams;
pub use rejection::{ApiJson, ApiQuery};
