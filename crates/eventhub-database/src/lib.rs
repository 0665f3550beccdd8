//! # eventhub-database
//!
//! Record store abstractions for EventHub. The service layer talks to the
//! [`UserStore`], [`RoleStore`], and [`EventStore`] traits; this crate
//! provides PostgreSQL repositories behind them plus a process-local
//! [`MemoryStore`] with the same uniqueness and conditional-update rules.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{EventStore, RoleStore, TransitionOutcome, UserStore};
pub use stores::Stores;
