//! Designation model.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A job title offered by a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designation {
    /// Server-assigned identifier.
    pub designation_id: u64,
    /// The designation title (e.g. "Engineer").
    pub designation: String,
    /// The vendor the designation belongs to.
    pub vendor_name: String,
}

impl Designation {
    /// Validates the title and vendor.
    pub fn validate(&self) -> EngineResult<()> {
        if self.designation.trim().is_empty() {
            return Err(EngineError::invalid_field(
                "designation",
                "designation",
                "designation is required",
            ));
        }
        if self.vendor_name.trim().is_empty() {
            return Err(EngineError::invalid_field(
                "designation",
                "vendor_name",
                "vendor_name is required",
            ));
        }
        Ok(())
    }
}
