//! Vendor and location models.
//!
//! Both are simple lookup tables keyed by their display name, referenced by
//! employees, billing-cycle rules and designations.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A vendor through which employees are placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// The vendor's unique name.
    pub vendor_name: String,
}

/// A work location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// The location's unique name (e.g. "NYC").
    pub location: String,
    /// The state the location belongs to.
    pub state: String,
}

impl Vendor {
    /// Validates the vendor name.
    pub fn validate(&self) -> EngineResult<()> {
        if self.vendor_name.trim().is_empty() {
            return Err(EngineError::invalid_field(
                "vendor",
                "vendor_name",
                "vendor_name is required",
            ));
        }
        Ok(())
    }
}

impl Location {
    /// Validates the location name and state.
    pub fn validate(&self) -> EngineResult<()> {
        if self.location.trim().is_empty() || self.state.trim().is_empty() {
            return Err(EngineError::invalid_field(
                "location",
                if self.location.trim().is_empty() {
                    "location"
                } else {
                    "state"
                },
                "location and state are required",
            ));
        }
        Ok(())
    }
}
