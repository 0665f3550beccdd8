//! Request DTOs with validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;
use eventhub_core::types::{RoleId, UserId};
use eventhub_entity::event::EventFilter;
use eventhub_service::event::parse_event_date;

use crate::extractors::path::parse_id;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Role change request (admin).
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    /// New role id.
    pub role_id: RoleId,
}

/// Query parameters of `GET /api/events`.
///
/// At most one filter applies, in this order: `organizer`, `q`,
/// `upcoming`, then the `from`/`to` range.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListParams {
    /// Case-insensitive text to find in title or description.
    pub q: Option<String>,
    /// Organizer user id.
    pub organizer: Option<String>,
    /// Only events that have not started yet.
    pub upcoming: Option<bool>,
    /// Inclusive range start.
    pub from: Option<String>,
    /// Inclusive range end. A bare `YYYY-MM-DD` covers that whole day.
    pub to: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl EventListParams {
    /// The query shape these parameters select.
    pub fn filter(&self) -> AppResult<EventFilter> {
        if let Some(organizer) = &self.organizer {
            let id: UserId = parse_id(organizer)
                .map_err(|_| AppError::validation("organizer", "Invalid organizer id"))?;
            return Ok(EventFilter::ByOrganizer(id));
        }
        if let Some(term) = &self.q {
            return Ok(EventFilter::Search(term.clone()));
        }
        if self.upcoming == Some(true) {
            return Ok(EventFilter::Upcoming(Utc::now()));
        }
        match (&self.from, &self.to) {
            (None, None) => Ok(EventFilter::All),
            (Some(from), Some(to)) => Ok(EventFilter::DateRange {
                start: parse_bound("from", from)?,
                end: parse_range_end(to)?,
            }),
            (None, Some(_)) => Err(AppError::validation("from", "Both from and to are required")),
            (Some(_), None) => Err(AppError::validation("to", "Both from and to are required")),
        }
    }
}

fn parse_bound(field: &str, raw: &str) -> AppResult<DateTime<Utc>> {
    parse_event_date(raw).ok_or_else(|| AppError::validation(field, "Invalid date format"))
}

fn parse_range_end(raw: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        if let Some(end_of_day) = day.and_hms_micro_opt(23, 59, 59, 999_999) {
            return Ok(end_of_day.and_utc());
        }
    }
    parse_bound("to", raw)
}

/// Run `validator` rules, reporting the first failing field.
pub fn validate_request<T: Validate>(req: &T) -> AppResult<()> {
    let Err(errors) = req.validate() else {
        return Ok(());
    };
    let field_errors = errors.field_errors();
    let Some((field, errs)) = field_errors.iter().min_by_key(|(field, _)| field.to_string()) else {
        return Err(AppError::validation("body", "Invalid request"));
    };
    let message = errs
        .first()
        .and_then(|e| e.message.as_ref())
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Invalid {field}"));
    Err(AppError::validation(field.to_string(), message))
}
