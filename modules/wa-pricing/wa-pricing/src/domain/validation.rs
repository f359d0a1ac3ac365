//! Field rules shared by the service operations.
//!
//! Limits mirror the column widths of the persisted tables so a value that
//! passes here never fails on storage width.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::error::DomainError;

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_PHONE_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 320;
pub const MAX_COUNTRY_LEN: usize = 100;
pub const MAX_OPEN_ID_LEN: usize = 64;
pub const MAX_LOGIN_METHOD_LEN: usize = 64;
pub const MAX_AMOUNT_LEN: usize = 50;
pub const MAX_RATE_LEN: usize = 20;

/// Largest volume storable in a signed 64-bit column.
pub const MAX_VOLUME: u64 = i64::MAX.unsigned_abs();

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Non-empty after trimming and within `max` characters. Returns the trimmed value.
///
/// # Errors
/// [`DomainError::Validation`] naming `field`.
pub fn required(field: &str, value: &str, max: usize) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    max_len(field, value, max)?;
    Ok(value.to_owned())
}

/// Trimmed and within `max` characters; blank is allowed.
///
/// # Errors
/// [`DomainError::Validation`] naming `field`.
pub fn bounded(field: &str, value: &str, max: usize) -> Result<String, DomainError> {
    let value = value.trim();
    max_len(field, value, max)?;
    Ok(value.to_owned())
}

/// Like [`required`], but absent and blank values both become `None`.
///
/// # Errors
/// [`DomainError::Validation`] naming `field`.
pub fn optional(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => {
            max_len(field, v, max)?;
            Ok(Some(v.to_owned()))
        }
    }
}

/// # Errors
/// [`DomainError::Validation`] when `value` is longer than `max` characters.
pub fn max_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("exceeds maximum length of {max}"),
        ));
    }
    Ok(())
}

/// # Errors
/// [`DomainError::Validation`] for blank, over-long or malformed addresses.
pub fn email(field: &str, value: &str) -> Result<String, DomainError> {
    let value = required(field, value, MAX_EMAIL_LEN)?;
    if !EMAIL_RE.is_match(&value) {
        return Err(DomainError::validation(field, "must be a valid email address"));
    }
    Ok(value)
}

/// # Errors
/// [`DomainError::Validation`] for zero or values beyond [`MAX_VOLUME`].
pub fn volume(field: &str, value: u64) -> Result<u64, DomainError> {
    if value == 0 {
        return Err(DomainError::validation(field, "must be a positive integer"));
    }
    if value > MAX_VOLUME {
        return Err(DomainError::validation(
            field,
            format!("must not exceed {MAX_VOLUME}"),
        ));
    }
    Ok(value)
}

/// A plain decimal number such as `428.00`. Returns the trimmed value.
///
/// # Errors
/// [`DomainError::Validation`] naming `field`.
pub fn decimal_string(field: &str, value: &str, max: usize) -> Result<String, DomainError> {
    let value = required(field, value, max)?;
    if value.parse::<Decimal>().is_err() {
        return Err(DomainError::validation(field, "must be a decimal number"));
    }
    Ok(value)
}
