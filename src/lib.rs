//! Production line assignment and load balancing.
//!
//! Assigns the operations of a production routing to employees with
//! individual efficiencies, then balances their workloads.
//!
//! # Pipeline
//!
//! ```text
//! operations ──► split (target duration) ──► expanded operations
//! estimates  ──► efficiency grid ──┐
//!                                  ├──► time matrix ──► greedy seed
//! employees  ──────────────────────┘                       │
//!                                  local search (restarts) ◄┘
//!                                          │
//!                                          ▼
//!                              metrics · timeline · workload
//! ```
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Operation`, `ExpandedOperation`, `Employee`,
//!   `EfficiencyTable`, `Assignment`, `SolverConfig`
//! - **`expansion`**: Duration splitting and efficiency expansion
//! - **`matrix`**: Operation × employee execution time matrix
//! - **`solver`**: Objective, greedy seed, local search, end-to-end solve
//! - **`metrics`**: Load KPIs, timeline, workload pivot
//! - **`validation`**: Input integrity checks (duplicate IDs, durations, config)
//! - **`api`**: JSON request/response payloads
//! - **`logging`**: Tracing subscriber setup for the binary
//!
//! # References
//!
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"
//! - Boysen, Fliedner & Scholl (2007), "A classification of assembly line
//!   balancing problems"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod api;
pub mod error;
pub mod expansion;
pub mod logging;
pub mod matrix;
pub mod metrics;
pub mod models;
pub mod solver;
pub mod validation;

pub use error::{SolverError, SolverResult};
