//! Registration payload checks

use idgm_kit::{validation::is_valid_email, FieldError};

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_registration(email: &str, name: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "must be a valid email address"));
    }
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "must not be empty"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    errors
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
