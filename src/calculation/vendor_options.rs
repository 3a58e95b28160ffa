//! Vendor-dependent option lists.
//!
//! Employee forms pick a billing rule and a designation from the options belonging to the
//! selected vendor. The options are derived from the vendor alone, so they are computed
//! here as a pure function instead of being tracked alongside the selection.

use serde::{Deserialize, Serialize};

use crate::models::{BillingCycleRule, Designation};

/// The billing rules and designations available for one vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOptions {
    /// The vendor the options belong to.
    pub vendor_name: String,
    /// Billing rules of the vendor, ordered by rule ID.
    pub billing_rules: Vec<BillingCycleRule>,
    /// Designations of the vendor, ordered by title.
    pub designations: Vec<Designation>,
}

/// Derives the options for `vendor_name` from the full rule and designation lists.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::vendor_options;
/// use attendance_engine::models::{BillingCycleRule, Designation};
///
/// let rules = vec![
///     BillingCycleRule { rule_id: "BR1".into(), start_day: 1, vendor_name: "Acme Corp".into() },
///     BillingCycleRule { rule_id: "BR2".into(), start_day: 15, vendor_name: "Globex Inc".into() },
/// ];
/// let designations = vec![
///     Designation { designation_id: 1, designation: "Engineer".into(), vendor_name: "Acme Corp".into() },
/// ];
///
/// let options = vendor_options("Acme Corp", &rules, &designations);
/// assert_eq!(options.billing_rules.len(), 1);
/// assert_eq!(options.designations[0].designation, "Engineer");
/// ```
pub fn vendor_options<'a>(
    vendor_name: &str,
    rules: impl IntoIterator<Item = &'a BillingCycleRule>,
    designations: impl IntoIterator<Item = &'a Designation>,
) -> VendorOptions {
    let mut billing_rules: Vec<BillingCycleRule> = rules
        .into_iter()
        .filter(|r| r.vendor_name == vendor_name)
        .cloned()
        .collect();
    billing_rules.sort_by(|a, b| a.rule_id.cmp(&b.rule_id));

    let mut designations: Vec<Designation> = designations
        .into_iter()
        .filter(|d| d.vendor_name == vendor_name)
        .cloned()
        .collect();
    designations.sort_by(|a, b| {
        a.designation
            .cmp(&b.designation)
            .then(a.designation_id.cmp(&b.designation_id))
    });

    VendorOptions {
        vendor_name: vendor_name.to_string(),
        billing_rules,
        designations,
    }
}
