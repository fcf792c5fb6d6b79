//! Relocate/swap hill climber.
//!
//! # Algorithm
//!
//! Starting from the greedy seed, each iteration:
//! 1. Picks a uniformly random operation `op` held by `cur`.
//! 2. **Relocate**: tries every other employee in ascending time order on
//!    `op`, skipping employees at cap or unable to perform it. The first
//!    move with a strictly lower score is kept (first improvement).
//! 3. **Swap**: otherwise picks a random other operation held by a different
//!    employee and exchanges owners; kept if strictly better. Swaps never
//!    change operation counts, so the cap is preserved.
//! 4. Otherwise counts a non-improving iteration.
//!
//! The search stops after `max_iterations`, or once `patience` consecutive
//! iterations accepted nothing.
//!
//! This is a stochastic hill climber: it may stop at a local optimum and
//! gives no optimality guarantee. The score of the retained assignment
//! never increases.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matrix::TimeMatrix;
use crate::models::Assignment;

use super::objective::Objective;
use super::state::{Move, SolverState};

/// Statistics of one local search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Iterations executed.
    pub iterations: usize,
    /// Accepted relocate moves.
    pub relocations: usize,
    /// Accepted swap moves.
    pub swaps: usize,
    /// Whether the run ended on patience rather than the iteration budget.
    pub stopped_early: bool,
    /// Score of the seed assignment.
    pub initial_score: f64,
    /// Score of the returned assignment.
    pub final_score: f64,
    /// Score after each accepted move.
    pub score_history: Vec<f64>,
}

/// Local search optimizer over a fixed time matrix.
#[derive(Debug, Clone)]
pub struct LocalSearch<'a> {
    matrix: &'a TimeMatrix,
    objective: &'a Objective,
    max_iterations: usize,
    patience: usize,
    ranked: Vec<Vec<usize>>,
}

impl<'a> LocalSearch<'a> {
    /// Creates a search with the default budget (2000 iterations, patience 200).
    pub fn new(matrix: &'a TimeMatrix, objective: &'a Objective) -> Self {
        let ranked = (0..matrix.op_count())
            .map(|op| matrix.employees_by_time(op))
            .collect();
        Self {
            matrix,
            objective,
            max_iterations: 2000,
            patience: 200,
            ranked,
        }
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the patience.
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Improves `seed` and returns the best assignment found.
    pub fn run<R: Rng>(&self, seed: Assignment, rng: &mut R) -> (Assignment, SearchStats) {
        let mut state = SolverState::new(self.matrix, seed);
        let mut best = state.score(self.objective);
        let mut stats = SearchStats {
            iterations: 0,
            relocations: 0,
            swaps: 0,
            stopped_early: false,
            initial_score: best,
            final_score: best,
            score_history: Vec::new(),
        };

        let n_ops = self.matrix.op_count();
        if n_ops == 0 {
            return (state.into_assignment(), stats);
        }

        let mut no_improve = 0;
        while stats.iterations < self.max_iterations {
            if no_improve >= self.patience {
                stats.stopped_early = true;
                break;
            }
            stats.iterations += 1;

            let op = rng.random_range(0..n_ops);

            if let Some(score) = self.try_relocate(&mut state, op, best) {
                best = score;
                stats.relocations += 1;
                stats.score_history.push(score);
                no_improve = 0;
                continue;
            }

            if n_ops > 1 {
                let mut other = rng.random_range(0..n_ops - 1);
                if other >= op {
                    other += 1;
                }
                if let Some(score) = self.try_swap(&mut state, op, other, best) {
                    best = score;
                    stats.swaps += 1;
                    stats.score_history.push(score);
                    no_improve = 0;
                    continue;
                }
            }

            no_improve += 1;
        }

        stats.final_score = best;
        debug!(
            iterations = stats.iterations,
            relocations = stats.relocations,
            swaps = stats.swaps,
            initial_score = stats.initial_score,
            final_score = stats.final_score,
            "local search finished"
        );
        (state.into_assignment(), stats)
    }

    /// First-improvement relocate of `op`. Commits and returns the new score.
    fn try_relocate(&self, state: &mut SolverState, op: usize, best: f64) -> Option<f64> {
        let cur = state.owner_of(op);
        let cap = self.objective.cap();

        for &cand in &self.ranked[op] {
            if cand == cur || state.counts()[cand] >= cap || !self.matrix.is_usable(op, cand) {
                continue;
            }
            let applied = state.apply(self.matrix, Move::Relocate { op, to: cand });
            let score = state.score(self.objective);
            if score < best {
                return Some(score);
            }
            state.undo(applied);
        }
        None
    }

    /// Swap of `op` and `other` when held by different employees.
    fn try_swap(&self, state: &mut SolverState, op: usize, other: usize, best: f64) -> Option<f64> {
        let e1 = state.owner_of(op);
        let e2 = state.owner_of(other);
        if e1 == e2 || !self.matrix.is_usable(op, e2) || !self.matrix.is_usable(other, e1) {
            return None;
        }

        let applied = state.apply(self.matrix, Move::Swap { a: op, b: other });
        let score = state.score(self.objective);
        if score < best {
            return Some(score);
        }
        state.undo(applied);
        None
    }
}
