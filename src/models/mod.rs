//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod approver;
mod attendance;
mod audit;
mod billing_period;
mod billing_rule;
mod designation;
mod employee;
mod vendor;

pub use approver::Approver;
pub use attendance::{AttendanceFilter, AttendanceView, MonthlyAttendance, SheetRow};
pub use audit::{AuditStep, AuditWarning, WarningSeverity};
pub use billing_period::{BillingPeriod, DEFAULT_MIN_YEAR};
pub use billing_rule::BillingCycleRule;
pub use designation::Designation;
pub use employee::Employee;
pub use vendor::{Location, Vendor};
