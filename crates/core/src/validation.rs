//! Field-level validation shared by the API handlers.
//!
//! Every function returns [`CoreError::Validation`] with the offending field
//! named in the message, so the HTTP boundary can surface it verbatim as a
//! 400 response.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Minimum length for client names.
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum length for names (clients, services, packages).
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for free-text notes.
pub const MAX_NOTES_LENGTH: usize = 1000;

/// Accepted range of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

/// Validate a display name: trimmed, within [`MIN_NAME_LENGTH`]..=[`MAX_NAME_LENGTH`].
pub fn validate_name(field: &str, name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if len < MIN_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {MIN_NAME_LENGTH} characters"
        )));
    }
    if len > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a phone number: 10 to 15 digits, ignoring separators such as
/// `+`, spaces, parentheses, and dashes.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(CoreError::Validation(format!(
            "phone must contain {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits, got {digits}"
        )));
    }
    Ok(())
}

/// Validate an email address against a pragmatic pattern.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email_regex().is_match(email) {
        return Err(CoreError::Validation(format!(
            "email is not a valid address: {email}"
        )));
    }
    Ok(())
}

/// Validate optional free-text notes.
pub fn validate_notes(notes: &str) -> Result<(), CoreError> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(CoreError::Validation(format!(
            "notes must not exceed {MAX_NOTES_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a monetary amount: strictly positive.
pub fn validate_price(field: &str, price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(())
}

/// Validate a positive integer field (durations, session counts, validity days).
pub fn validate_positive(field: &str, value: i32) -> Result<(), CoreError> {
    if value < 1 {
        return Err(CoreError::Validation(format!(
            "{field} must be at least 1"
        )));
    }
    Ok(())
}

/// Validate an appointment window: the end must be after the start.
pub fn validate_time_window(starts_at: Timestamp, ends_at: Timestamp) -> Result<(), CoreError> {
    if ends_at <= starts_at {
        return Err(CoreError::Validation(
            "ends_at must be after starts_at".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn name_boundaries() {
        assert!(validate_name("name", "Jo").is_ok());
        assert!(validate_name("name", "J").is_err());
        assert!(validate_name("name", &"x".repeat(100)).is_ok());
        assert!(validate_name("name", &"x".repeat(101)).is_err());
    }

    #[test]
    fn phone_counts_digits_only() {
        // 13 digits behind a country-code prefix.
        assert!(validate_phone("+5511999990000").is_ok());
        assert!(validate_phone("(11) 99999-0000").is_ok());
        assert!(validate_phone("123456789").is_err()); // 9 digits
        assert!(validate_phone("1234567890123456").is_err()); // 16 digits
    }

    #[test]
    fn email_pattern() {
        assert!(validate_email("ana@x.com").is_ok());
        assert!(validate_email("ana.lima+tag@example.com.br").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn price_must_be_positive() {
        assert!(validate_price("price", 0.01).is_ok());
        assert!(validate_price("price", 0.0).is_err());
        assert!(validate_price("price", -5.0).is_err());
        assert!(validate_price("price", f64::NAN).is_err());
    }

    #[test]
    fn time_window_ordering() {
        let start = Utc::now();
        assert!(validate_time_window(start, start + Duration::minutes(30)).is_ok());
        assert!(validate_time_window(start, start).is_err());
        assert!(validate_time_window(start, start - Duration::minutes(1)).is_err());
    }
}
