//! Billing-cycle rule model.
//!
//! A billing-cycle rule fixes the day of month on which a vendor's billing period begins.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a vendor's billing-cycle rule.
///
/// # Example
///
/// ```
/// use attendance_engine::models::BillingCycleRule;
///
/// let rule = BillingCycleRule {
///     rule_id: "BR2".to_string(),
///     start_day: 15,
///     vendor_name: "Globex Inc".to_string(),
/// };
/// assert!(rule.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycleRule {
    /// Unique identifier for the rule.
    pub rule_id: String,
    /// The day of month (1-31) the billing cycle begins.
    pub start_day: u32,
    /// The vendor the rule belongs to.
    pub vendor_name: String,
}

impl BillingCycleRule {
    /// Validates the rule identifier and the start day range.
    pub fn validate(&self) -> EngineResult<()> {
        if self.rule_id.trim().is_empty() || self.vendor_name.trim().is_empty() {
            return Err(EngineError::invalid_field(
                "billing rule",
                if self.rule_id.trim().is_empty() {
                    "rule_id"
                } else {
                    "vendor_name"
                },
                "rule_id, start_day, and vendor_name are required",
            ));
        }

        if !(1..=31).contains(&self.start_day) {
            return Err(EngineError::invalid_field(
                "billing rule",
                "start_day",
                format!("must be between 1 and 31, got {}", self.start_day),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(start_day: u32) -> BillingCycleRule {
        BillingCycleRule {
            rule_id: "BR1".to_string(),
            start_day,
            vendor_name: "Acme Corp".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_boundaries() {
        assert!(rule(1).validate().is_ok());
        assert!(rule(31).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_start_day() {
        match rule(0).validate() {
            Err(EngineError::InvalidField { field, .. }) => assert_eq!(field, "start_day"),
            other => panic!("Expected InvalidField error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_start_day_32() {
        assert!(rule(32).validate().is_err());
    }

    #[test]
    fn test_deserialize_rule() {
        let json = r#"{"rule_id": "BR2", "start_day": 15, "vendor_name": "Globex Inc"}"#;
        let rule: BillingCycleRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.start_day, 15);
    }
}
