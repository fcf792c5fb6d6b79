//! Operation models.
//!
//! An [`Operation`] is one step of a production routing (gamme) with a base
//! duration. Oversized operations are split into [`ExpandedOperation`]
//! chunks before assignment; an operation that is not split expands to a
//! single chunk carrying its original id.
//!
//! # Identifier Scheme
//!
//! | Case | Expanded id | `base_id` |
//! |------|-------------|-----------|
//! | Not split | `OP10` | `OP10` |
//! | Split in k | `OP10_1` … `OP10_k` | `OP10` |
//!
//! The base id is stored explicitly so efficiency lookups never have to
//! parse the chunk suffix back out of the id.

use serde::{Deserialize, Serialize};

/// A production operation as supplied by the request.
///
/// Durations are plain real numbers in the consumer's time unit
/// (minutes in the original production data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier.
    pub id: String,
    /// Position in the routing.
    pub sequence_order: i32,
    /// Nominal execution time at efficiency 1.0.
    pub base_duration: f64,
}

impl Operation {
    /// Creates a new operation.
    pub fn new(id: impl Into<String>, sequence_order: i32, base_duration: f64) -> Self {
        Self {
            id: id.into(),
            sequence_order,
            base_duration,
        }
    }
}

/// A chunk of an operation produced by the duration splitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedOperation {
    /// Chunk identifier (`base_id` or `base_id_index`).
    pub id: String,
    /// Identifier of the operation this chunk was cut from.
    pub base_id: String,
    /// 1-based chunk position.
    pub chunk_index: usize,
    /// Number of chunks the base operation was split into.
    pub chunk_count: usize,
    /// Routing position inherited from the base operation.
    pub sequence_order: i32,
    /// Chunk duration at efficiency 1.0.
    pub duration: f64,
}

impl ExpandedOperation {
    /// Wraps an operation that did not need splitting.
    pub fn whole(op: &Operation) -> Self {
        Self {
            id: op.id.clone(),
            base_id: op.id.clone(),
            chunk_index: 1,
            chunk_count: 1,
            sequence_order: op.sequence_order,
            duration: op.base_duration,
        }
    }

    /// Creates chunk `index` (1-based) of `count` equal chunks of `op`.
    pub fn chunk(op: &Operation, index: usize, count: usize, duration: f64) -> Self {
        Self {
            id: format!("{}_{}", op.id, index),
            base_id: op.id.clone(),
            chunk_index: index,
            chunk_count: count,
            sequence_order: op.sequence_order,
            duration,
        }
    }
}
