// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use toposcan_model::{ConfigIr, DiffResult, InvariantViolation};

/// Result of a single analyze request. `ir` is present iff `errors` is
/// empty: callers never receive a partial IR alongside errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AnalyzeOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ir: Option<ConfigIr>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub violations: Vec<InvariantViolation>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
}

impl AnalyzeOutcome {
    #[must_use]
    pub fn success(ir: ConfigIr, violations: Vec<InvariantViolation>) -> Self {
        Self {
            ir: Some(ir),
            violations,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            ir: None,
            violations: Vec::new(),
            errors,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.ir.is_some()
    }
}

/// Result of a two-sided diff request. If either side fails to parse the
/// diff is skipped entirely and only the combined error list is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct DiffOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffResult>,
    #[serde(rename = "oldIr", skip_serializing_if = "Option::is_none")]
    pub old_ir: Option<ConfigIr>,
    #[serde(rename = "newIr", skip_serializing_if = "Option::is_none")]
    pub new_ir: Option<ConfigIr>,
    #[serde(rename = "oldViolations", skip_serializing_if = "Vec::is_empty", default)]
    pub old_violations: Vec<InvariantViolation>,
    #[serde(rename = "newViolations", skip_serializing_if = "Vec::is_empty", default)]
    pub new_violations: Vec<InvariantViolation>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
}

impl DiffOutcome {
    #[must_use]
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            diff: None,
            old_ir: None,
            new_ir: None,
            old_violations: Vec::new(),
            new_violations: Vec::new(),
            errors,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.diff.is_some()
    }
}
