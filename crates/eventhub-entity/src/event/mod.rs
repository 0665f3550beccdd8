//! Event domain entities.

pub mod model;
pub mod query;
pub mod status;

pub use model::{Event, EventChanges, EventListing, NewEvent};
pub use query::{EventFilter, EventQuery, Visibility};
pub use status::{ApprovalStatus, Transition};
