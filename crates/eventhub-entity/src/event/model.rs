//! Event entity model.

use chrono::{DateTime, Utc};
use eventhub_core::types::{EventId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::ApprovalStatus;

/// A submitted event listing.
///
/// `status == Approved` holds exactly when `approved_by` and `approved_at`
/// are set; every transition writes the three columns together.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// Title, 3-100 characters.
    pub title: String,
    /// Description, 10-1000 characters.
    pub description: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Venue address, 5-200 characters.
    pub address: String,
    /// The submitting user. Never changes after creation.
    pub organizer_id: UserId,
    /// Moderation state.
    pub status: ApprovalStatus,
    /// Moderator who approved the event.
    pub approved_by: Option<UserId>,
    /// When the event was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event is publicly visible.
    pub fn is_approved(&self) -> bool {
        self.status.is_approved()
    }

    /// Whether `user` organizes this event.
    pub fn is_organized_by(&self, user: UserId) -> bool {
        self.organizer_id == user
    }
}

/// An event joined with its organizer's public identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventListing {
    /// The event row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    /// Organizer's username.
    pub organizer_name: String,
    /// Organizer's email.
    pub organizer_email: String,
}

/// Validated fields for a new event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Future date.
    pub date: DateTime<Utc>,
    /// Trimmed address.
    pub address: String,
    /// Submitting user.
    pub organizer_id: UserId,
}

/// Validated replacement fields for an edit.
///
/// There is no organizer field: ownership is fixed at creation.
#[derive(Debug, Clone)]
pub struct EventChanges {
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Future date.
    pub date: DateTime<Utc>,
    /// Trimmed address.
    pub address: String,
}
