//! Employee and efficiency models.
//!
//! Efficiency ratios come from an external prediction service keyed on
//! employee, operation, duration, machine and production line. The solver
//! only ever sees the resulting `(employee, operation) → ratio` table.
//!
//! | Ratio | Meaning |
//! |-------|---------|
//! | 1.0 | Nominal speed |
//! | < 1.0 | Slower: execution time = duration / ratio grows |
//! | > 1.0 | Faster than nominal |
//! | ≤ 0.0 | Cannot perform the operation |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An employee that can receive operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
}

impl Employee {
    /// Creates a new employee.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A predicted efficiency for one employee on one base operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyEstimate {
    /// Employee identifier.
    pub employee_id: String,
    /// Base operation identifier (never a chunk id).
    pub operation_id: String,
    /// Productivity multiplier.
    pub ratio: f64,
}

impl EfficiencyEstimate {
    /// Creates a new estimate.
    pub fn new(employee_id: impl Into<String>, operation_id: impl Into<String>, ratio: f64) -> Self {
        Self {
            employee_id: employee_id.into(),
            operation_id: operation_id.into(),
            ratio,
        }
    }
}

/// Lookup table over efficiency estimates.
///
/// Later estimates for the same pair replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct EfficiencyTable {
    ratios: HashMap<(String, String), f64>,
}

impl EfficiencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a list of estimates.
    pub fn from_estimates(estimates: &[EfficiencyEstimate]) -> Self {
        let mut table = Self::new();
        for est in estimates {
            table.insert(&est.employee_id, &est.operation_id, est.ratio);
        }
        table
    }

    /// Sets the ratio for a pair.
    pub fn insert(&mut self, employee_id: &str, operation_id: &str, ratio: f64) {
        self.ratios
            .insert((employee_id.to_string(), operation_id.to_string()), ratio);
    }

    /// Sets the ratio for a pair (builder form).
    pub fn with_ratio(mut self, employee_id: &str, operation_id: &str, ratio: f64) -> Self {
        self.insert(employee_id, operation_id, ratio);
        self
    }

    /// Returns the ratio for a pair, if the predictor supplied one.
    pub fn get(&self, employee_id: &str, operation_id: &str) -> Option<f64> {
        self.ratios
            .get(&(employee_id.to_string(), operation_id.to_string()))
            .copied()
    }

    /// Number of known pairs.
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}
