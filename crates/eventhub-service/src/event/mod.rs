//! Event workflow: creation, edits, moderation and visibility-filtered reads.

pub mod service;
pub mod validation;
pub mod workflow;

pub use service::EventService;
pub use validation::{EventInput, parse_event_date};
