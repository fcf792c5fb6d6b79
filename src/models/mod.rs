//! Line balancing domain models.
//!
//! Provides the data types for describing an assignment problem
//! and its solution.
//!
//! # Domain Mappings
//!
//! | u-assign | Production floor |
//! |----------|------------------|
//! | Operation | Routing step (gamme line) |
//! | ExpandedOperation | Chunk of a long routing step |
//! | Employee | Operator on the line |
//! | EfficiencyEstimate | Predicted rendement |
//! | Assignment | Line balancing plan |

mod assignment;
mod config;
mod employee;
mod operation;

pub use assignment::Assignment;
pub use config::{ObjectivePreset, ObjectiveWeights, SolverConfig};
pub use employee::{EfficiencyEstimate, EfficiencyTable, Employee};
pub use operation::{ExpandedOperation, Operation};
