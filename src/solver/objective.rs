//! Objective scorer.
//!
//! # Terms
//!
//! | Term | Definition | Degenerate case |
//! |------|-----------|-----------------|
//! | makespan_norm | max(load) / Σ load | 1 when Σ load = 0 |
//! | imbalance_norm | (max − min) / max | 0 when max = 0 |
//! | overload_penalty | Σ max(0, count − cap) / Σ count | 0 with no operations |
//! | employee_count_penalty | used / total employees | 0 with no employees |
//!
//! `score = w1·makespan + w2·imbalance + w3·overload + w4·employee_count`.
//! Lower is better. Each term lies in `[0, 1]` for finite loads.
//!
//! Loads and counts cover every employee of the request, idle ones
//! included, so an idle employee drives `min(load)` to zero.

use serde::{Deserialize, Serialize};

use crate::models::{ObjectiveWeights, SolverConfig};

/// Per-term values of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveBreakdown {
    pub makespan_norm: f64,
    pub imbalance_norm: f64,
    pub overload_penalty: f64,
    pub employee_count_penalty: f64,
    /// Weighted sum of the terms above.
    pub score: f64,
}

/// Weighted multi-term fitness function.
#[derive(Debug, Clone)]
pub struct Objective {
    weights: ObjectiveWeights,
    cap: usize,
    employee_count_term: bool,
}

impl Objective {
    /// Creates an objective with the employee-count term enabled.
    pub fn new(weights: ObjectiveWeights, cap: usize) -> Self {
        Self {
            weights,
            cap,
            employee_count_term: true,
        }
    }

    /// Builds the objective described by a solver config.
    pub fn from_config(config: &SolverConfig, op_count: usize) -> Self {
        Self::new(config.effective_weights(), config.cap_for(op_count))
            .with_employee_count_term(config.minimize_employee_count)
    }

    /// Enables or disables the used-employee term.
    pub fn with_employee_count_term(mut self, enabled: bool) -> Self {
        self.employee_count_term = enabled;
        self
    }

    /// Operation cap used by the overload term.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Scores per-employee loads and operation counts.
    #[inline]
    pub fn score(&self, loads: &[f64], counts: &[usize]) -> f64 {
        self.breakdown(loads, counts).score
    }

    /// Computes every term and the weighted score.
    pub fn breakdown(&self, loads: &[f64], counts: &[usize]) -> ObjectiveBreakdown {
        debug_assert_eq!(loads.len(), counts.len());

        let total: f64 = loads.iter().sum();
        let max = loads.iter().copied().fold(0.0_f64, f64::max);
        let min = loads.iter().copied().fold(f64::INFINITY, f64::min);

        let makespan_norm = if total > 0.0 { max / total } else { 1.0 };
        let imbalance_norm = if max > 0.0 { (max - min) / max } else { 0.0 };

        let total_ops: usize = counts.iter().sum();
        let overload: usize = counts.iter().map(|&c| c.saturating_sub(self.cap)).sum();
        let overload_penalty = if total_ops > 0 {
            overload as f64 / total_ops as f64
        } else {
            0.0
        };

        let employee_count_penalty = if counts.is_empty() {
            0.0
        } else {
            counts.iter().filter(|&&c| c > 0).count() as f64 / counts.len() as f64
        };

        let w = &self.weights;
        let mut score = w.makespan * makespan_norm
            + w.imbalance * imbalance_norm
            + w.overload * overload_penalty;
        if self.employee_count_term {
            score += w.employee_count * employee_count_penalty;
        }

        ObjectiveBreakdown {
            makespan_norm,
            imbalance_norm,
            overload_penalty,
            employee_count_penalty,
            score,
        }
    }
}
