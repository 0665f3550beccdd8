//! PostgreSQL repository implementations of the store traits.

pub mod event;
pub mod role;
pub mod user;

pub use event::EventRepository;
pub use role::RoleRepository;
pub use user::UserRepository;
