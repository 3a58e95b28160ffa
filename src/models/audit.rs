//! Audit models shared by the calculation and attendance workflows.
//!
//! Every payable-days decision carries an [`AuditStep`] so that the numbers shown on an
//! attendance sheet can be traced back to the dates that produced them. Conditions that do
//! not stop processing but deserve attention are reported as [`AuditWarning`]s.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Severity attached to an [`AuditWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; the result is still authoritative.
    Low,
    /// The result was adjusted or defaulted.
    Medium,
    /// The result is probably wrong and needs manual review.
    High,
}

/// A warning generated during calculation or submission.
///
/// Warnings indicate potential issues that don't prevent processing
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
    /// The employee the warning concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emp_id: Option<String>,
}

impl AuditWarning {
    /// Creates a warning about a specific employee.
    pub fn for_employee(
        code: impl Into<String>,
        severity: WarningSeverity,
        emp_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
            emp_id: Some(emp_id.into()),
        }
    }
}
