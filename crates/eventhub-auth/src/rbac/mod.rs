//! Role-based access control.
//!
//! - [`RoleRegistry`] resolves role ids and names to permission sets.
//! - [`RbacEnforcer`] answers permission and role gates for a principal.
//! - [`AccessPolicy`] combines an ownership bypass with a permission gate.

pub mod enforcer;
pub mod policy;
pub mod registry;

pub use enforcer::RbacEnforcer;
pub use policy::AccessPolicy;
pub use registry::RoleRegistry;
