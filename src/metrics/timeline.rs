//! Per-employee timeline and workload pivot.
//!
//! The timeline lays each employee's operations back to back from time 0, in
//! the order they were committed. The workload pivot sums execution time per
//! employee and base operation, so the chunks of a split operation collapse
//! into one column.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::matrix::TimeMatrix;
use crate::models::Assignment;

/// One operation placed on an employee's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub employee_id: String,
    pub operation_id: String,
    pub duration: f64,
    pub start: f64,
    pub end: f64,
}

/// Builds the sequential timeline of every employee.
///
/// Entries are grouped by employee in column order; idle employees
/// contribute nothing.
pub fn build_timeline(matrix: &TimeMatrix, assignment: &Assignment) -> Vec<TimelineEntry> {
    let mut entries = Vec::with_capacity(assignment.len());
    for emp in 0..matrix.employee_count() {
        let mut clock = 0.0;
        for op in assignment.operations_of(emp) {
            let duration = matrix.time(op, emp);
            entries.push(TimelineEntry {
                employee_id: matrix.employee_id(emp).to_string(),
                operation_id: matrix.operation(op).id.clone(),
                duration,
                start: clock,
                end: clock + duration,
            });
            clock += duration;
        }
    }
    entries
}

/// Workload of one employee, broken down by base operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadRow {
    pub employee_id: String,
    pub per_operation: BTreeMap<String, f64>,
    pub total: f64,
}

/// Workload pivot over used employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSummary {
    pub rows: Vec<WorkloadRow>,
    pub max_total: f64,
    pub min_total: f64,
    /// `max_total - min_total`.
    pub spread: f64,
}

impl WorkloadSummary {
    /// Pivots `assignment` by employee and base operation id.
    pub fn summarize(matrix: &TimeMatrix, assignment: &Assignment) -> Self {
        let mut rows = Vec::new();
        for emp in 0..matrix.employee_count() {
            let ops = assignment.operations_of(emp);
            if ops.is_empty() {
                continue;
            }
            let mut per_operation = BTreeMap::new();
            let mut total = 0.0;
            for op in ops {
                let t = matrix.time(op, emp);
                *per_operation
                    .entry(matrix.operation(op).base_id.clone())
                    .or_insert(0.0) += t;
                total += t;
            }
            rows.push(WorkloadRow {
                employee_id: matrix.employee_id(emp).to_string(),
                per_operation,
                total,
            });
        }

        let (max_total, min_total) = if rows.is_empty() {
            (0.0, 0.0)
        } else {
            rows.iter().fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), r| {
                (hi.max(r.total), lo.min(r.total))
            })
        };

        Self {
            rows,
            max_total,
            min_total,
            spread: max_total - min_total,
        }
    }
}
