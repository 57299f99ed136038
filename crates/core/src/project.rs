//! Write-time validation for project fields.
//!
//! Listing never validates; these rules guard create and update.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Minimum length of a project or client name, in characters.
pub const MIN_NAME_LEN: usize = 2;

/// Maximum length of a project or client name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Message returned when a create request omits a required field.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: name, client, startDate, endDate";

/// Message returned when the end date does not follow the start date.
pub const DATE_ORDER_MESSAGE: &str = "End date must be after start date";

fn validate_length(label: &str, value: &str) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if len < MIN_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{label} must be at least {MIN_NAME_LEN} characters"
        )));
    }
    if len > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{label} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a project name (trimmed, 2-100 characters).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    validate_length("Name", name)
}

/// Validate a client name (trimmed, 2-100 characters).
pub fn validate_client(client: &str) -> Result<(), CoreError> {
    validate_length("Client", client)
}

/// Require `end` to fall strictly after `start`.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(DATE_ORDER_MESSAGE.into()));
    }
    Ok(())
}

/// Parse a calendar date submitted by a client.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CoreError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| {
            CoreError::Validation(format!(
                "{field} must be a date in YYYY-MM-DD format, got '{value}'"
            ))
        })
}
