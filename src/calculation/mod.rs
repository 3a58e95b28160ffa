//! Calculation logic for the Attendance Engine.
//!
//! This module contains the pure functions behind the attendance workflow: resolving a
//! vendor's billing window for a `(month, year)` period, intersecting it with an
//! employee's tenure to get payable days, deciding submission eligibility, computing
//! loss of pay from leaves taken, and deriving the per-vendor option lists.

mod billing_window;
mod eligibility;
mod loss_of_pay;
mod payable_days;
mod vendor_options;

pub use billing_window::{BillingWindow, billing_window, normalized_date};
pub use eligibility::{Eligibility, check_eligibility, window_overlaps_tenure};
pub use loss_of_pay::{DEFAULT_FREE_LEAVES_PER_MONTH, calculate_loss_of_pay};
pub use payable_days::{PayableDaysResult, Tenure, calculate_payable_days};
pub use vendor_options::{VendorOptions, vendor_options};
