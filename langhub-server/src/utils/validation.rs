//! Input validation helpers
//!
//! Structural checks shared by the handlers. All failures map to a 400
//! Validation error naming the field.

use shared::{AppError, AppResult};
use validator::ValidateEmail;

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_TEXT_LEN: usize = 4000;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Non-empty after trimming, within the length cap.
pub fn validate_required_text(field: &str, value: &str, max_len: usize) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if trimmed.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Same as [`validate_required_text`] but tolerates absence.
pub fn validate_optional_text(field: &str, value: Option<&str>, max_len: usize) -> AppResult<()> {
    match value {
        Some(v) => validate_required_text(field, v, max_len),
        None => Ok(()),
    }
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if !email.validate_email() {
        return Err(AppError::validation("email is not a valid address"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Canonical form for stored and queried emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
