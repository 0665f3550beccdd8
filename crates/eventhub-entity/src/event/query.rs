//! Read-side query shapes and the visibility predicate.

use chrono::{DateTime, Utc};
use eventhub_core::types::{PageRequest, UserId};

use super::model::EventListing;
use super::status::ApprovalStatus;

/// Which events a reader may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every event regardless of moderation state.
    All,
    /// Only approved events.
    ApprovedOnly,
}

impl Visibility {
    /// Whether an event in `status` is visible.
    pub fn admits(&self, status: ApprovalStatus) -> bool {
        match self {
            Self::All => true,
            Self::ApprovedOnly => status.is_approved(),
        }
    }

    /// Whether only approved events are visible.
    pub fn approved_only(&self) -> bool {
        matches!(self, Self::ApprovedOnly)
    }
}

/// The shape of an event read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    /// Every event.
    All,
    /// Events organized by a user.
    ByOrganizer(UserId),
    /// Case-insensitive substring match on title or description.
    Search(String),
    /// Events strictly after the given instant.
    Upcoming(DateTime<Utc>),
    /// Events within an inclusive range.
    DateRange {
        /// Earliest date.
        start: DateTime<Utc>,
        /// Latest date.
        end: DateTime<Utc>,
    },
}

impl EventFilter {
    /// Whether `listing` matches this filter, ignoring visibility.
    pub fn matches(&self, listing: &EventListing) -> bool {
        let event = &listing.event;
        match self {
            Self::All => true,
            Self::ByOrganizer(id) => event.organizer_id == *id,
            Self::Search(term) => {
                let term = term.to_lowercase();
                event.title.to_lowercase().contains(&term)
                    || event.description.to_lowercase().contains(&term)
            }
            Self::Upcoming(now) => event.date > *now,
            Self::DateRange { start, end } => event.date >= *start && event.date <= *end,
        }
    }
}

/// A complete event read: shape, visibility, and window.
///
/// Results are always ordered by event date ascending.
#[derive(Debug, Clone)]
pub struct EventQuery {
    /// Query shape.
    pub filter: EventFilter,
    /// Visibility predicate applied by every store.
    pub visibility: Visibility,
    /// Result window.
    pub page: PageRequest,
}

impl EventQuery {
    /// Build a query.
    pub fn new(filter: EventFilter, visibility: Visibility, page: PageRequest) -> Self {
        Self {
            filter,
            visibility,
            page,
        }
    }

    /// Whether `listing` passes both the filter and the visibility predicate.
    pub fn admits(&self, listing: &EventListing) -> bool {
        self.visibility.admits(listing.event.status) && self.filter.matches(listing)
    }
}
