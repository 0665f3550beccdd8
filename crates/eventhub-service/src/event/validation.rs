//! Field rules shared by event creation and edits.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;

use crate::validation::check;

/// Naive timestamp layouts, interpreted as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Event fields as submitted on create or edit.
#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Start time, in one of the accepted date formats.
    pub date: String,
    /// Venue address.
    pub address: String,
}

/// Trimmed text fields, checked before the date.
#[derive(Debug, Validate)]
struct EventText {
    #[validate(length(min = 3, max = 100, message = "Title must be between 3 and 100 characters"))]
    title: String,
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description must be between 10 and 1000 characters"
    ))]
    description: String,
    #[validate(length(min = 5, max = 200, message = "Address must be between 5 and 200 characters"))]
    address: String,
}

/// Event fields after trimming and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub address: String,
}

impl EventInput {
    /// Validate every field, failing on the first offending one.
    ///
    /// The date must lie strictly after `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> AppResult<ValidEvent> {
        let text = EventText {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            address: self.address.trim().to_string(),
        };
        check(
            &text,
            &[
                ("title", "Title", text.title.as_str()),
                ("description", "Description", text.description.as_str()),
                ("address", "Address", text.address.as_str()),
            ],
        )?;

        let date = parse_event_date(&self.date)
            .ok_or_else(|| AppError::validation("date", "Invalid date format"))?;
        if date <= now {
            return Err(AppError::validation("date", "Event date must be in the future"));
        }

        Ok(ValidEvent {
            title: text.title,
            description: text.description,
            date,
            address: text.address,
        })
    }
}

/// Parse an event date.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]` and
/// bare `YYYY-MM-DD` (midnight). Naive values are taken as UTC.
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
