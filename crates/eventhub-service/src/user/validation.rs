//! Username and email normalization.

use validator::{Validate, ValidateEmail};

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;

use crate::validation::check;

#[derive(Debug, Validate)]
struct Username {
    #[validate(length(min = 3, max = 30, message = "Username must be between 3 and 30 characters"))]
    username: String,
}

/// Trim a username and check its length.
pub fn normalize_username(raw: &str) -> AppResult<String> {
    let candidate = Username {
        username: raw.trim().to_string(),
    };
    check(
        &candidate,
        &[("username", "Username", candidate.username.as_str())],
    )?;
    Ok(candidate.username)
}

/// Trim and lower-case an email address, then check its syntax.
pub fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::validation("email", "Email is required"));
    }
    if !email.validate_email() {
        return Err(AppError::validation("email", "Invalid email address"));
    }
    Ok(email)
}
