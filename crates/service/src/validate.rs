//! Input validation shared by the product services.
//! Every check runs before the first mutating statement, so a rejected
//! request leaves no observable database side effects.

use chrono::NaiveDate;

use crate::errors::ServiceError;

pub fn non_empty(value: &str, field: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date, requiring the formatted value to round-trip
/// to the exact input string. Rejects overflow dates like `2024-02-30`
/// and unpadded forms like `2024-2-3`.
pub fn parse_date(input: &str) -> Result<NaiveDate, ServiceError> {
    let parsed = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ServiceError::Validation("Invalid date format. Use YYYY-MM-DD".into()))?;
    if parsed.format("%Y-%m-%d").to_string() != input {
        return Err(ServiceError::Validation("Invalid date format. Use YYYY-MM-DD".into()));
    }
    Ok(parsed)
}

pub fn non_negative_quantity(quantity: i32) -> Result<(), ServiceError> {
    if quantity < 0 {
        return Err(ServiceError::Validation("Quantity must be a non-negative integer".into()));
    }
    Ok(())
}
