//! Billing period selector model.
//!
//! This module contains the [`BillingPeriod`] type: the `(month, year)` pair that selects
//! which billing cycle an attendance sheet or submission refers to. The concrete dates of
//! the cycle depend on the vendor's start day and are resolved in
//! [`crate::calculation::billing_window`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Earliest year accepted for attendance records unless configured otherwise.
pub const DEFAULT_MIN_YEAR: i32 = 2000;

/// Represents the billing period selected by `(month, year)`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::BillingPeriod;
///
/// let period = BillingPeriod::new(2, 2026).unwrap();
/// assert_eq!(period.month, 2);
/// assert_eq!(period.to_string(), "2/2026");
/// assert!(BillingPeriod::new(13, 2026).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// The calendar year the cycle starts in.
    pub year: i32,
    /// The calendar month the cycle starts in (1-12).
    pub month: u32,
}

impl BillingPeriod {
    /// Creates a billing period, validating the month and the default minimum year.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        Self::with_min_year(month, year, DEFAULT_MIN_YEAR)
    }

    /// Creates a billing period, validating the month and a configured minimum year.
    pub fn with_min_year(month: u32, year: i32, min_year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_field(
                "billing period",
                "month",
                format!("must be between 1 and 12, got {}", month),
            ));
        }
        if year < min_year {
            return Err(EngineError::invalid_field(
                "billing period",
                "year",
                format!("must be {} or later, got {}", min_year, year),
            ));
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_period() {
        let period = BillingPeriod::new(12, 2026).unwrap();
        assert_eq!(period.month, 12);
        assert_eq!(period.year, 2026);
    }

    #[test]
    fn test_new_rejects_month_zero() {
        let result = BillingPeriod::new(0, 2026);
        assert!(matches!(
            result,
            Err(EngineError::InvalidField { field, .. }) if field == "month"
        ));
    }

    #[test]
    fn test_new_rejects_month_thirteen() {
        assert!(BillingPeriod::new(13, 2026).is_err());
    }

    #[test]
    fn test_new_rejects_year_before_minimum() {
        let result = BillingPeriod::new(1, 1999);
        assert!(matches!(
            result,
            Err(EngineError::InvalidField { field, .. }) if field == "year"
        ));
    }

    #[test]
    fn test_with_min_year_uses_configured_floor() {
        assert!(BillingPeriod::with_min_year(1, 2019, 2020).is_err());
        assert!(BillingPeriod::with_min_year(1, 2020, 2020).is_ok());
    }

    #[test]
    fn test_periods_order_by_year_then_month() {
        let dec_2025 = BillingPeriod::new(12, 2025).unwrap();
        let jan_2026 = BillingPeriod::new(1, 2026).unwrap();
        assert!(dec_2025 < jan_2026);
    }
}
