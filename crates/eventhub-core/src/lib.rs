//! # eventhub-core
//!
//! Core crate for EventHub. Contains configuration schemas, typed
//! identifiers, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other EventHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ConflictKind, ErrorKind};
pub use result::AppResult;
