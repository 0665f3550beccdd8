//! Unified application error types for EventHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// No usable credentials were presented (missing or malformed bearer).
    Unauthenticated,
    /// A token was presented but its signature or expiry check failed.
    TokenInvalid,
    /// The principal exists but the account is deactivated.
    AccountDeactivated,
    /// The caller lacks the permission or role for the action.
    Forbidden,
    /// Input validation failed.
    Validation,
    /// A uniqueness or state-transition conflict.
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::TokenInvalid => write!(f, "TOKEN_INVALID"),
            Self::AccountDeactivated => write!(f, "ACCOUNT_DEACTIVATED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The specific reason behind an [`ErrorKind::Conflict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Another user already owns this email address.
    DuplicateEmail,
    /// Another user already owns this username.
    DuplicateUsername,
    /// The event is already approved.
    AlreadyApproved,
    /// The event is not currently approved.
    AlreadyUnapproved,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEmail => write!(f, "duplicate_email"),
            Self::DuplicateUsername => write!(f, "duplicate_username"),
            Self::AlreadyApproved => write!(f, "already_approved"),
            Self::AlreadyUnapproved => write!(f, "already_unapproved"),
        }
    }
}

/// The unified application error used throughout EventHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. Validation errors carry the offending
/// field name and conflicts carry a [`ConflictKind`] so callers can branch
/// without parsing the message.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Offending input field, for validation errors.
    pub field: Option<String>,
    /// Conflict reason, for conflict errors.
    pub conflict: Option<ConflictKind>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
            conflict: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(kind, message)
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create an invalid-token error.
    pub fn token_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenInvalid, message)
    }

    /// Create an account-deactivated error.
    pub fn account_deactivated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountDeactivated, message)
    }

    /// Create a forbidden (insufficient permissions) error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a validation error naming the offending field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::new(ErrorKind::Validation, message)
        }
    }

    /// Create a conflict error of the given kind.
    pub fn conflict(kind: ConflictKind, message: impl Into<String>) -> Self {
        Self {
            conflict: Some(kind),
            ..Self::new(ErrorKind::Conflict, message)
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Whether this is a conflict of the given kind.
    pub fn is_conflict(&self, kind: ConflictKind) -> bool {
        self.kind == ErrorKind::Conflict && self.conflict == Some(kind)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            field: self.field.clone(),
            conflict: self.conflict,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_carries_field() {
        let err = AppError::validation("title", "Title must be at least 3 characters");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.field.as_deref(), Some("title"));
        assert_eq!(
            err.to_string(),
            "VALIDATION: Title must be at least 3 characters"
        );
    }

    #[test]
    fn test_conflict_kind_matching() {
        let err = AppError::conflict(ConflictKind::AlreadyApproved, "Event is already approved");
        assert!(err.is_conflict(ConflictKind::AlreadyApproved));
        assert!(!err.is_conflict(ConflictKind::AlreadyUnapproved));
        assert!(!AppError::internal("boom").is_conflict(ConflictKind::AlreadyApproved));
    }

    #[test]
    fn test_clone_drops_source_keeps_detail() {
        let io = std::io::Error::other("disk");
        let err = AppError {
            conflict: Some(ConflictKind::DuplicateEmail),
            ..AppError::with_source(ErrorKind::Conflict, "dup", io)
        };
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.conflict, Some(ConflictKind::DuplicateEmail));
    }
}
