//! Duration splitter.
//!
//! # Algorithm
//!
//! For an operation of duration `d` and a target `t`:
//! 1. `d ≤ t` → keep the operation whole.
//! 2. Otherwise try every chunk count `k ∈ [2, max(2, ⌊d/t⌋ + 3)]` and keep
//!    the `k` whose chunk `d/k` is closest to `t`. The first `k` wins ties.
//! 3. Emit `k` chunks of `d/k`.
//!
//! This is a bounded local search over a small window of `k`, not a
//! bin-packing split.

use crate::models::{ExpandedOperation, Operation};

/// Upper limit on the expanded routing produced by an overridden target.
pub const MAX_EXPANDED_OPERATIONS: usize = 100_000;

/// Upper bound on the number of expanded operations for `target`.
///
/// Counts `⌊d/t⌋ + 3` per oversized operation, the widest window
/// [`chunk_count`] may pick from. Returned as `f64` so a tiny target
/// cannot overflow.
pub fn expanded_len_bound(operations: &[Operation], target: f64) -> f64 {
    operations
        .iter()
        .map(|op| {
            let d = op.base_duration;
            if d <= target || !(target > 0.0) {
                1.0
            } else {
                (d / target).floor() + 3.0
            }
        })
        .sum()
}

/// Mean base duration of the routing (0.0 when empty).
pub fn mean_duration(operations: &[Operation]) -> f64 {
    if operations.is_empty() {
        return 0.0;
    }
    let total: f64 = operations.iter().map(|op| op.base_duration).sum();
    total / operations.len() as f64
}

/// Number of chunks a duration is split into for the given target.
pub fn chunk_count(duration: f64, target: f64) -> usize {
    if duration <= target || !(target > 0.0) {
        return 1;
    }

    let max_k = ((duration / target).floor() as usize + 3).max(2);
    let mut best_k = 2;
    let mut best_diff = f64::INFINITY;

    for k in 2..=max_k {
        let diff = (duration / k as f64 - target).abs();
        if diff < best_diff {
            best_diff = diff;
            best_k = k;
        }
    }

    best_k
}

/// Splits a duration into near-uniform chunks close to `target`.
pub fn split_duration(duration: f64, target: f64) -> Vec<f64> {
    let k = chunk_count(duration, target);
    if k == 1 {
        return vec![duration];
    }
    vec![duration / k as f64; k]
}

/// Expands a routing into chunks.
///
/// Unsplit operations keep their id; split ones become `id_1 … id_k`.
/// Output order follows input order, chunks of one operation adjacent.
pub fn expand_operations(operations: &[Operation], target: f64) -> Vec<ExpandedOperation> {
    let mut expanded = Vec::with_capacity(operations.len());

    for op in operations {
        let parts = split_duration(op.base_duration, target);
        if parts.len() == 1 {
            expanded.push(ExpandedOperation::whole(op));
            continue;
        }
        let count = parts.len();
        for (i, part) in parts.into_iter().enumerate() {
            expanded.push(ExpandedOperation::chunk(op, i + 1, count, part));
        }
    }

    expanded
}
