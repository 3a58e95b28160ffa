//! Configuration loading and management for the Attendance Engine.
//!
//! This module provides functionality to load the service configuration from YAML files,
//! including the bind address, session lifetime, administrator account, attendance rules
//! and optional seed data for the master-data registry.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Session TTL: {} minutes", config.service().session.ttl_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AdminConfig, AttendanceConfig, SeedApprover, SeedData, SeedDesignation, ServiceConfig,
    SessionConfig,
};
