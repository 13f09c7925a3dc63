//! Input checks shared by the accessors.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};

/// Amounts spent must be finite and above zero.
pub fn positive_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount { amount })
    }
}

/// Balances and income may be zero but not negative.
pub fn non_negative_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount { amount })
    }
}

/// Trims `value` and rejects it if nothing is left.
pub fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// First day of the month and first day of the following month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::invalid(format!("{year}-{month} is not a valid month")))?;
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| Error::invalid(format!("{year}-{month} is out of range")))?;
    Ok((start, end))
}

/// Rejects months outside 1..=12 and returns the value as stored.
pub fn month_number(month: u32) -> Result<i32> {
    if (1..=12).contains(&month) {
        Ok(i32::try_from(month).unwrap_or_default())
    } else {
        Err(Error::invalid(format!("month {month} must be between 1 and 12")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_amount_checks() {
        assert!(positive_amount(12.5).is_ok());
        assert!(positive_amount(0.0).is_err());
        assert!(positive_amount(-1.0).is_err());
        assert!(positive_amount(f64::NAN).is_err());
        assert!(non_negative_amount(0.0).is_ok());
        assert!(non_negative_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_month_bounds_wraps_december() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert!(month_bounds(2024, 13).is_err());
        assert!(month_bounds(2024, 0).is_err());
    }

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("name", "  Rent ").unwrap(), "Rent");
        assert!(matches!(
            required_text("name", "   "),
            Err(Error::InvalidInput { .. })
        ));
    }
}
