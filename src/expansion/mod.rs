//! Routing expansion: duration splitting and efficiency propagation.
//!
//! Long operations dominate a balancing plan because a single employee must
//! absorb them whole. Splitting them into chunks close to a target duration
//! (the mean base duration by default) gives the assigner pieces it can
//! spread across the line. Efficiency estimates are then copied from each
//! base operation onto all of its chunks.
//!
//! # Pipeline
//!
//! ```text
//! Operation[] ──split──▶ ExpandedOperation[] ──expand──▶ EfficiencyGrid
//! ```

mod efficiency;
mod split;

pub use efficiency::{expand_efficiencies, EfficiencyGrid};
pub use split::{
    chunk_count, expand_operations, expanded_len_bound, mean_duration, split_duration,
    MAX_EXPANDED_OPERATIONS,
};
