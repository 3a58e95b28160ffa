//! In-memory registry of master data and attendance records.
//!
//! The [`Registry`] owns every collection behind a single `parking_lot::RwLock` and
//! enforces referential integrity on each mutation: employees must point at an existing
//! location, vendor, approver and billing rule, and nothing can be deleted while other
//! records still reference it.
//!
//! Master-data operations live in `master_data.rs`, the attendance workflow in
//! `attendance.rs`.

mod attendance;
mod master_data;

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::info;

use crate::config::{AttendanceConfig, ConfigLoader};
use crate::error::EngineResult;
use crate::models::{
    Approver, BillingCycleRule, BillingPeriod, Designation, Employee, Location, MonthlyAttendance,
    Vendor,
};

pub use attendance::{AttendanceEntry, AttendanceSheet, SheetScope, SubmissionOutcome};
pub use master_data::{ApproverUpdate, NewApprover, NewDesignation};

/// All collections, guarded together so that cross-table checks are consistent.
#[derive(Debug, Default)]
struct Tables {
    vendors: BTreeMap<String, Vendor>,
    locations: BTreeMap<String, Location>,
    approvers: BTreeMap<String, Approver>,
    billing_rules: BTreeMap<String, BillingCycleRule>,
    designations: BTreeMap<u64, Designation>,
    employees: BTreeMap<String, Employee>,
    attendance: BTreeMap<u64, MonthlyAttendance>,
    attendance_by_period: BTreeMap<(String, BillingPeriod), u64>,
    last_designation_id: u64,
    last_attendance_id: u64,
}

/// The master-data and attendance registry.
#[derive(Debug, Default)]
pub struct Registry {
    rules: AttendanceConfig,
    tables: RwLock<Tables>,
}

impl Registry {
    /// Creates an empty registry applying the given attendance rules.
    pub fn new(rules: AttendanceConfig) -> Self {
        Self {
            rules,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Creates a registry populated from the configuration's seed data.
    ///
    /// Seed records go through the same validation as API requests, so a seed file with
    /// a dangling reference fails startup.
    pub fn from_config(config: &ConfigLoader) -> EngineResult<Self> {
        let registry = Self::new(config.attendance().clone());
        let seed = config.seed();

        for vendor in &seed.vendors {
            registry.create_vendor(vendor.clone())?;
        }
        for location in &seed.locations {
            registry.create_location(location.clone())?;
        }
        for approver in &seed.approvers {
            registry.create_approver(NewApprover {
                emp_id: approver.emp_id.clone(),
                name: approver.name.clone(),
                email: approver.email.clone(),
                password: approver.password.clone(),
                manager_emp_id: approver.manager_emp_id.clone(),
                manager_name: approver.manager_name.clone(),
                manager_email: approver.manager_email.clone(),
            })?;
        }
        for rule in &seed.billing_rules {
            registry.create_billing_rule(rule.clone())?;
        }
        for designation in &seed.designations {
            registry.create_designation(NewDesignation {
                designation: designation.designation.clone(),
                vendor_name: designation.vendor_name.clone(),
            })?;
        }
        for employee in &seed.employees {
            registry.create_employee(employee.clone())?;
        }

        info!(
            vendors = seed.vendors.len(),
            approvers = seed.approvers.len(),
            employees = seed.employees.len(),
            "Registry seeded"
        );

        Ok(registry)
    }

    /// Returns the attendance rules in force.
    pub fn rules(&self) -> &AttendanceConfig {
        &self.rules
    }
}
