//! Load metrics (KPIs).
//!
//! Computes line balancing indicators from a final assignment.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Largest employee load |
//! | Avg Load | Mean load over employees holding at least one operation |
//! | Balance Index | min / max load over those employees (1.0 if max = 0) |
//! | Used Employees | Employees holding at least one operation |
//!
//! Per-employee loads cover every employee of the request, idle ones at 0.
//! Per-employee operation lists keep the assignment's insertion order.
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::matrix::TimeMatrix;
use crate::models::Assignment;
use crate::solver::tally;

/// Line balancing indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadMetrics {
    /// Largest employee load.
    pub makespan: f64,
    /// Mean load over used employees.
    pub avg_load: f64,
    /// Least over most loaded used employee (0.0..1.0).
    pub balance_index: f64,
    /// Employees with at least one operation.
    pub used_employees: usize,
    /// Total load per employee id.
    pub per_employee_loads: BTreeMap<String, f64>,
    /// `(operation id, time)` per employee id, in insertion order.
    pub per_employee_operations: BTreeMap<String, Vec<(String, f64)>>,
}

impl LoadMetrics {
    /// Computes metrics for `assignment` over `matrix`.
    pub fn calculate(matrix: &TimeMatrix, assignment: &Assignment) -> Self {
        let (loads, counts) = tally(matrix, assignment);

        let mut per_employee_operations: BTreeMap<String, Vec<(String, f64)>> = matrix
            .employee_ids()
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect();
        for (op, emp) in assignment.iter() {
            if let Some(list) = per_employee_operations.get_mut(matrix.employee_id(emp)) {
                list.push((matrix.operation(op).id.clone(), matrix.time(op, emp)));
            }
        }

        let per_employee_loads = matrix
            .employee_ids()
            .iter()
            .cloned()
            .zip(loads.iter().copied())
            .collect();

        let used: Vec<f64> = loads
            .iter()
            .zip(&counts)
            .filter(|(_, &c)| c > 0)
            .map(|(&l, _)| l)
            .collect();

        let makespan = loads.iter().copied().fold(0.0_f64, f64::max);
        let avg_load = if used.is_empty() {
            0.0
        } else {
            used.iter().sum::<f64>() / used.len() as f64
        };
        let used_max = used.iter().copied().fold(0.0_f64, f64::max);
        let used_min = used.iter().copied().fold(f64::INFINITY, f64::min);
        let balance_index = if used_max > 0.0 {
            used_min / used_max
        } else {
            1.0
        };

        Self {
            makespan,
            avg_load,
            balance_index,
            used_employees: used.len(),
            per_employee_loads,
            per_employee_operations,
        }
    }
}
