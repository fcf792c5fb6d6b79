//! Effective execution-time matrix.
//!
//! `time(op, emp) = chunk_duration / efficiency`, or `+∞` when the
//! efficiency is not positive. The matrix is dense: every expanded
//! operation has a value for every employee. Infinite cells mark pairings
//! the solver must never choose when a finite alternative exists.
//!
//! Rows follow the expanded routing order; columns follow the request's
//! employee order. Both orders double as the deterministic tie-breakers of
//! the greedy assigner and the local search.

use crate::expansion::EfficiencyGrid;
use crate::models::{Employee, ExpandedOperation};

/// Dense row-major (operation × employee) execution times.
#[derive(Debug, Clone)]
pub struct TimeMatrix {
    operations: Vec<ExpandedOperation>,
    employees: Vec<String>,
    times: Vec<f64>,
}

impl TimeMatrix {
    /// Builds the matrix from expanded operations and their efficiencies.
    ///
    /// `efficiency` must have one row per operation and one column per employee.
    pub fn build(
        operations: Vec<ExpandedOperation>,
        employees: &[Employee],
        efficiency: &EfficiencyGrid,
    ) -> Self {
        debug_assert_eq!(efficiency.employee_count(), employees.len());

        let mut times = Vec::with_capacity(operations.len() * employees.len());
        for (i, op) in operations.iter().enumerate() {
            for j in 0..employees.len() {
                times.push(execution_time(op.duration, efficiency.get(i, j)));
            }
        }

        Self {
            operations,
            employees: employees.iter().map(|e| e.id.clone()).collect(),
            times,
        }
    }

    /// Builds a matrix directly from raw times (row-major).
    #[cfg(test)]
    pub(crate) fn from_times(
        operations: Vec<ExpandedOperation>,
        employees: Vec<String>,
        times: Vec<f64>,
    ) -> Self {
        assert_eq!(
            times.len(),
            operations.len() * employees.len(),
            "time matrix must be dense"
        );
        Self {
            operations,
            employees,
            times,
        }
    }

    /// Execution time of `op` by `emp`.
    #[inline]
    pub fn time(&self, op: usize, emp: usize) -> f64 {
        self.times[op * self.employees.len() + emp]
    }

    /// All employee times for `op`.
    #[inline]
    pub fn row(&self, op: usize) -> &[f64] {
        let n = self.employees.len();
        &self.times[op * n..(op + 1) * n]
    }

    /// Largest time of `op` over all employees.
    pub fn worst_case(&self, op: usize) -> f64 {
        self.row(op)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Whether `emp` can perform `op` in finite time.
    #[inline]
    pub fn is_usable(&self, op: usize, emp: usize) -> bool {
        self.time(op, emp).is_finite()
    }

    /// Whether at least one employee can perform `op`.
    pub fn has_usable_employee(&self, op: usize) -> bool {
        self.row(op).iter().any(|t| t.is_finite())
    }

    /// Employee indices ordered by ascending time on `op`.
    ///
    /// Stable: equal times keep employee order.
    pub fn employees_by_time(&self, op: usize) -> Vec<usize> {
        let row = self.row(op);
        let mut order: Vec<usize> = (0..row.len()).collect();
        order.sort_by(|&a, &b| row[a].total_cmp(&row[b]));
        order
    }

    /// Expanded operation at row `op`.
    pub fn operation(&self, op: usize) -> &ExpandedOperation {
        &self.operations[op]
    }

    /// All expanded operations, in row order.
    pub fn operations(&self) -> &[ExpandedOperation] {
        &self.operations
    }

    /// Employee id at column `emp`.
    pub fn employee_id(&self, emp: usize) -> &str {
        &self.employees[emp]
    }

    /// All employee ids, in column order.
    pub fn employee_ids(&self) -> &[String] {
        &self.employees
    }

    /// Number of expanded operations.
    pub fn op_count(&self) -> usize {
        self.operations.len()
    }

    /// Number of employees.
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }
}

/// `duration / efficiency`, infinite for non-positive efficiency.
#[inline]
pub fn execution_time(duration: f64, efficiency: f64) -> f64 {
    if efficiency > 0.0 {
        duration / efficiency
    } else {
        f64::INFINITY
    }
}
