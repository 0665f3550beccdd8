//! Password policy enforcement for new passwords.

use zxcvbn::Score;

use eventhub_core::config::AuthConfig;
use eventhub_core::error::AppError;

/// Upper bound on accepted password length, in characters.
const MAX_LENGTH: usize = 128;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
    /// Minimum zxcvbn score; `None` disables the check.
    min_score: Option<Score>,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let min_score = match config.password_min_strength {
            0 => None,
            1 => Some(Score::One),
            2 => Some(Score::Two),
            3 => Some(Score::Three),
            _ => Some(Score::Four),
        };
        Self {
            min_length: config.password_min_length,
            min_score,
        }
    }

    /// Validates a password, returning the first violation found.
    ///
    /// `user_inputs` (username, email) are fed to zxcvbn so passwords
    /// derived from them score low.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        let length = password.chars().count();
        if password.trim().is_empty() {
            return Err(AppError::validation("password", "Password is required"));
        }
        if length < self.min_length {
            return Err(AppError::validation(
                "password",
                format!(
                    "Password must be at least {} characters long",
                    self.min_length
                ),
            ));
        }
        if length > MAX_LENGTH {
            return Err(AppError::validation(
                "password",
                format!("Password must be at most {MAX_LENGTH} characters long"),
            ));
        }

        if let Some(min_score) = self.min_score {
            let estimate = zxcvbn::zxcvbn(password, user_inputs);
            if estimate.score() < min_score {
                return Err(AppError::validation(
                    "password",
                    "Password is too weak. Please use a stronger password with more entropy.",
                ));
            }
        }

        Ok(())
    }
}
