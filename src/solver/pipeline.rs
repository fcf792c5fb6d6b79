//! End-to-end solve.
//!
//! ```text
//! validate → split → expand efficiencies → time matrix
//!          → greedy seed → local search (× restarts) → best assignment
//! ```
//!
//! Restarts share the greedy seed and the read-only time matrix; restart
//! `i` draws from its own `SmallRng` seeded with `seed + i`. They run on
//! scoped threads and the lowest final score wins, ties going to the
//! lowest restart index. Restart 0 always uses the base seed, so adding
//! restarts never makes the result worse.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::error::{SolverError, SolverResult};
use crate::expansion::{expand_efficiencies, expand_operations, mean_duration};
use crate::matrix::TimeMatrix;
use crate::models::{
    Assignment, EfficiencyEstimate, EfficiencyTable, Employee, Operation, SolverConfig,
};
use crate::validation::{check_request, validate_expansion, validate_matrix};

use super::greedy::GreedyAssigner;
use super::local_search::{LocalSearch, SearchStats};
use super::objective::Objective;

/// Everything a solve produces, before reporting.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Splitting target that was used.
    pub target_duration: f64,
    /// Time matrix over the expanded routing.
    pub matrix: TimeMatrix,
    /// Objective the search minimized.
    pub objective: Objective,
    /// Greedy seed assignment.
    pub initial: Assignment,
    /// Best assignment found.
    pub assignment: Assignment,
    /// Statistics of the winning restart.
    pub stats: SearchStats,
    /// Index of the winning restart.
    pub restart: usize,
    /// Base RNG seed.
    pub seed: u64,
}

/// Line balancing solver.
///
/// # Example
///
/// ```
/// use u_assign::models::{EfficiencyEstimate, Employee, Operation, SolverConfig};
/// use u_assign::solver::Solver;
///
/// let operations = vec![
///     Operation::new("A", 0, 10.0),
///     Operation::new("B", 1, 10.0),
///     Operation::new("C", 2, 40.0),
/// ];
/// let employees = vec![Employee::new("E1"), Employee::new("E2")];
/// let estimates = vec![EfficiencyEstimate::new("E1", "C", 0.8)];
///
/// let solver = Solver::new(SolverConfig::default().with_seed(42));
/// let outcome = solver.solve(&operations, &employees, &estimates).unwrap();
/// assert_eq!(outcome.assignment.len(), 4); // C is split in two
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solves one assignment problem.
    pub fn solve(
        &self,
        operations: &[Operation],
        employees: &[Employee],
        estimates: &[EfficiencyEstimate],
    ) -> SolverResult<SolveOutcome> {
        let config = &self.config;
        check_request(operations, employees, estimates, config)?;

        let target = config
            .target_duration
            .unwrap_or_else(|| mean_duration(operations));
        let expanded = expand_operations(operations, target);
        validate_expansion(&expanded).map_err(SolverError::Validation)?;
        debug!(
            operations = operations.len(),
            expanded = expanded.len(),
            target,
            "routing expanded"
        );

        let ignored = unmatched_estimates(operations, employees, estimates);
        if ignored > 0 {
            warn!(ignored, "efficiency estimates reference unknown employees or operations");
        }
        let table = EfficiencyTable::from_estimates(estimates);
        let grid = expand_efficiencies(&expanded, employees, &table, config.default_efficiency);
        if grid.defaulted_count() > 0 {
            debug!(
                defaulted = grid.defaulted_count(),
                default_efficiency = config.default_efficiency,
                "efficiency estimates missing for some pairs"
            );
        }
        let matrix = TimeMatrix::build(expanded, employees, &grid);
        validate_matrix(&matrix).map_err(SolverError::Validation)?;

        let objective = Objective::from_config(config, matrix.op_count());
        let initial = GreedyAssigner::new(objective.cap()).assign(&matrix);

        let seed = config.seed.unwrap_or_else(rand::random);
        let search = LocalSearch::new(&matrix, &objective)
            .with_max_iterations(config.max_iterations)
            .with_patience(config.patience);
        let (restart, assignment, stats) = run_restarts(&search, &initial, seed, config.restarts);

        info!(
            operations = matrix.op_count(),
            employees = matrix.employee_count(),
            seed,
            restart,
            initial_score = stats.initial_score,
            final_score = stats.final_score,
            "assignment solved"
        );

        Ok(SolveOutcome {
            target_duration: target,
            matrix,
            objective,
            initial,
            assignment,
            stats,
            restart,
            seed,
        })
    }
}

/// Estimates whose employee or base operation is not part of the request.
fn unmatched_estimates(
    operations: &[Operation],
    employees: &[Employee],
    estimates: &[EfficiencyEstimate],
) -> usize {
    let op_ids: HashSet<&str> = operations.iter().map(|o| o.id.as_str()).collect();
    let emp_ids: HashSet<&str> = employees.iter().map(|e| e.id.as_str()).collect();
    estimates
        .iter()
        .filter(|e| {
            !op_ids.contains(e.operation_id.as_str()) || !emp_ids.contains(e.employee_id.as_str())
        })
        .count()
}

/// Runs `restarts` independent searches and keeps the best.
///
/// Restart indices are dealt round-robin to at most
/// `available_parallelism` scoped workers.
fn run_restarts(
    search: &LocalSearch<'_>,
    initial: &Assignment,
    seed: u64,
    restarts: usize,
) -> (usize, Assignment, SearchStats) {
    let run = |i: usize| {
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
        let (assignment, stats) = search.run(initial.clone(), &mut rng);
        (i, assignment, stats)
    };

    let workers = restart_workers(restarts);
    let mut results: Vec<(usize, Assignment, SearchStats)> = if workers <= 1 {
        (0..restarts.max(1)).map(run).collect()
    } else {
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|w| {
                    s.spawn(move || {
                        (w..restarts)
                            .step_by(workers)
                            .map(run)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    };
    results.sort_by_key(|(i, _, _)| *i);

    let mut best: Option<(usize, Assignment, SearchStats)> = None;
    for (i, assignment, stats) in results {
        debug!(restart = i, final_score = stats.final_score, "restart finished");
        let better = match &best {
            None => true,
            Some((_, _, b)) => stats.final_score < b.final_score,
        };
        if better {
            best = Some((i, assignment, stats));
        }
    }

    match best {
        Some(best) => best,
        None => unreachable!("at least one restart always runs"),
    }
}

/// Worker threads used for `restarts` runs.
fn restart_workers(restarts: usize) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    restarts.min(cores)
}
