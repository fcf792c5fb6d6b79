//! Greedy seed assignment.
//!
//! # Algorithm
//!
//! 1. Order operations by descending worst-case time (max over employees),
//!    so the hardest-to-place operations are committed first.
//! 2. For each operation, rank employees by `(time, current load)` ascending.
//! 3. Take the first ranked employee that can perform the operation and is
//!    below the operation cap.
//! 4. If every such employee is at cap, take the top-ranked employee anyway.
//!    The cap is soft: it yields only to guarantee a total assignment.
//!
//! Both sorts are stable, so ties fall back to routing order and employee
//! order respectively.
//!
//! # Complexity
//! O(n log n + n · m log m) where n = operations, m = employees.

use tracing::{debug, warn};

use crate::matrix::TimeMatrix;
use crate::models::Assignment;

/// Greedy assigner honouring a soft per-employee operation cap.
#[derive(Debug, Clone)]
pub struct GreedyAssigner {
    cap: usize,
}

impl GreedyAssigner {
    /// Creates an assigner with the given operation cap.
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    /// Builds a total assignment over `matrix`.
    pub fn assign(&self, matrix: &TimeMatrix) -> Assignment {
        let n_ops = matrix.op_count();
        let n_emps = matrix.employee_count();
        if n_emps == 0 {
            debug_assert_eq!(n_ops, 0, "operations cannot be assigned without employees");
            return Assignment::default();
        }

        let worst: Vec<f64> = (0..n_ops).map(|op| matrix.worst_case(op)).collect();
        let mut order: Vec<usize> = (0..n_ops).collect();
        order.sort_by(|&a, &b| worst[b].total_cmp(&worst[a]));

        let mut loads = vec![0.0_f64; n_emps];
        let mut counts = vec![0_usize; n_emps];
        let mut commits = Vec::with_capacity(n_ops);
        let mut forced = 0;

        for op in order {
            let row = matrix.row(op);
            let mut ranked: Vec<usize> = (0..n_emps).collect();
            ranked.sort_by(|&a, &b| {
                row[a]
                    .total_cmp(&row[b])
                    .then_with(|| loads[a].total_cmp(&loads[b]))
            });

            let chosen = match ranked
                .iter()
                .copied()
                .find(|&e| counts[e] < self.cap && row[e].is_finite())
            {
                Some(e) => e,
                None => {
                    forced += 1;
                    ranked[0]
                }
            };

            loads[chosen] += row[chosen];
            counts[chosen] += 1;
            commits.push((op, chosen));
        }

        if forced > 0 {
            warn!(
                forced,
                cap = self.cap,
                "operation cap exceeded to keep the assignment complete"
            );
        }
        debug!(operations = n_ops, employees = n_emps, "greedy seed built");

        match Assignment::from_commits(n_ops, &commits) {
            Some(assignment) => assignment,
            None => unreachable!("greedy commits every operation exactly once"),
        }
    }
}
