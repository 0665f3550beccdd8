//! Event approval status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Moderation state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Submitted and never reviewed.
    Pending,
    /// Publicly visible.
    Approved,
    /// Reviewed and taken down.
    Rejected,
}

impl ApprovalStatus {
    /// Whether the event is publicly visible.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A moderation action on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Make the event publicly visible.
    Approve,
    /// Take a visible event down.
    Reject,
}

impl Transition {
    /// The state reached by applying this action in `from`, or `None` when
    /// the idempotence guard forbids it (approve while approved, reject
    /// while not approved).
    pub fn target(self, from: ApprovalStatus) -> Option<ApprovalStatus> {
        match (self, from) {
            (Self::Approve, ApprovalStatus::Approved) => None,
            (Self::Approve, _) => Some(ApprovalStatus::Approved),
            (Self::Reject, ApprovalStatus::Approved) => Some(ApprovalStatus::Rejected),
            (Self::Reject, _) => None,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}
