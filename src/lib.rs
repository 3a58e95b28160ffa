//! Attendance Engine
//!
//! This crate provides the backend for an HR attendance administration service:
//! master data for employees, vendors, approvers, locations, billing-cycle rules and
//! designations, plus the monthly attendance workflow built around the payable-days
//! calculation for a vendor's billing cycle.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod store;
