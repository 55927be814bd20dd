//! Validation helpers for request inputs
//!
//! Field-level rules are declared with `validator` derives on the input types;
//! the functions here cover what the built-in validators do not.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Reject strings that are empty or whitespace only
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Expected harvest may not precede planting
pub fn validate_growing_window(
    planting_date: DateTime<Utc>,
    expected_harvest: DateTime<Utc>,
) -> Result<(), &'static str> {
    if expected_harvest < planting_date {
        return Err("Expected harvest date must not be before the planting date");
    }
    Ok(())
}

/// Normalise a crop name for table lookups
pub fn normalize_crop_name(name: &str) -> String {
    name.trim().to_lowercase()
}
