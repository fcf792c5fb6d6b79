//! Assignment solver: greedy seeding and local search.
//!
//! # Algorithm
//!
//! `GreedyAssigner` commits the hardest operations first to the fastest
//! employee below the operation cap. `LocalSearch` then refines that seed
//! with first-improvement relocate moves and random swaps, scored by the
//! weighted `Objective`. Neither stage guarantees a global optimum; the
//! search only guarantees it never returns something worse than its seed.
//!
//! `Solver` wires the whole pipeline together, from raw operations to the
//! best assignment over one or more restarts.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5 (parallel machines)
//! - Aarts & Lenstra (2003), "Local Search in Combinatorial Optimization"

mod greedy;
mod local_search;
mod objective;
mod pipeline;
mod state;

pub use greedy::GreedyAssigner;
pub use local_search::{LocalSearch, SearchStats};
pub use objective::{Objective, ObjectiveBreakdown};
pub use pipeline::{SolveOutcome, Solver};
pub use state::{tally, AppliedMove, Move, SolverState};
