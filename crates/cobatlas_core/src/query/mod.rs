//! Aggregation and query operations over the record store.
//!
//! # Responsibility
//! - Expose the fixed set of filtering, grouping, pivoting, ranking and
//!   summary operations consumed by the serving layer.
//! - Keep result shaping in plain, serializable row types.
//!
//! # Invariants
//! - Operations never mutate the record store; each call derives an
//!   independent result collection.
//! - Result ordering is deterministic: grouping keys ascending, rankings
//!   in the requested direction with stable ties.

pub mod engine;
pub mod stats;
