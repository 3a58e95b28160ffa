//! Configuration types for the attendance service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::calculation::DEFAULT_FREE_LEAVES_PER_MONTH;
use crate::models::{BillingCycleRule, DEFAULT_MIN_YEAR, Employee, Location, Vendor};

/// Service configuration from `service.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// The administrator account.
    pub admin: AdminConfig,
    /// Attendance rules.
    #[serde(default)]
    pub attendance: AttendanceConfig,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

/// Session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Minutes a session stays valid after login.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,
}

fn default_ttl_minutes() -> i64 {
    120
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

/// The administrator account.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Login name of the administrator.
    pub username: String,
    /// Argon2 PHC string of the administrator password.
    pub password_hash: String,
}

/// Attendance rules.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceConfig {
    /// Leaves per period that do not count towards loss of pay.
    #[serde(default = "default_free_leaves")]
    pub free_leaves_per_month: u32,
    /// Earliest billing year accepted.
    #[serde(default = "default_min_year")]
    pub min_year: i32,
}

fn default_free_leaves() -> u32 {
    DEFAULT_FREE_LEAVES_PER_MONTH
}

fn default_min_year() -> i32 {
    DEFAULT_MIN_YEAR
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            free_leaves_per_month: default_free_leaves(),
            min_year: default_min_year(),
        }
    }
}

/// An approver as written in `seed.yaml`, with a plaintext password.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedApprover {
    /// The approver's employee ID.
    pub emp_id: String,
    /// The approver's name.
    pub name: String,
    /// The approver's email address.
    pub email: String,
    /// Plaintext password; hashed when the registry is seeded.
    pub password: String,
    /// The approver's manager's employee ID.
    #[serde(default)]
    pub manager_emp_id: Option<String>,
    /// The approver's manager's name.
    #[serde(default)]
    pub manager_name: Option<String>,
    /// The approver's manager's email address.
    #[serde(default)]
    pub manager_email: Option<String>,
}

/// A designation as written in `seed.yaml`; IDs are assigned on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDesignation {
    /// The designation title.
    pub designation: String,
    /// The vendor the designation belongs to.
    pub vendor_name: String,
}

/// Initial master data from `seed.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Vendors.
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    /// Locations.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Approvers.
    #[serde(default)]
    pub approvers: Vec<SeedApprover>,
    /// Billing-cycle rules.
    #[serde(default)]
    pub billing_rules: Vec<BillingCycleRule>,
    /// Designations.
    #[serde(default)]
    pub designations: Vec<SeedDesignation>,
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
}
