//! Input validation helpers
//!
//! Centralized text length constants and validation functions for the
//! CRUD handlers.

use rust_decimal::Decimal;

use crate::utils::AppError;

// ── Limits ──────────────────────────────────────────────────────────

/// Entity names: menu items, restaurant name
pub const MAX_NAME_LEN: usize = 200;

/// Category labels
pub const MAX_CATEGORY_LEN: usize = 60;

/// Payment method labels (Cash, Card, UPI, ...)
pub const MAX_PAYMENT_METHOD_LEN: usize = 50;

/// Image URLs / embedded data URLs
pub const MAX_IMAGE_LEN: usize = 2 * 1024 * 1024;

/// Maximum allowed price per item
pub const MAX_PRICE: i64 = 1_000_000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a price: non-negative and within the sane upper bound.
pub fn validate_price(price: Decimal, field: &str) -> Result<(), AppError> {
    if price.is_sign_negative() {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {price}"
        )));
    }
    if price > Decimal::from(MAX_PRICE) {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE}), got {price}"
        )));
    }
    Ok(())
}
