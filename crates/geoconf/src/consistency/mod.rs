//! Consistency coordination across pictures.
//!
//! Purpose
//! - Cross-check every construction and predicate in all pictures, repair a
//!   disagreeing picture by reconstructing it from a fresh seed, and escalate to
//!   an unresolvable inconsistency when repair does not converge.
//!
//! Model
//! - `reconcile` is a pure majority vote over per-picture values.
//! - `Coordinator` runs the Evaluate / Agree / Disagree / Reconstruct loop with
//!   counters held in `PictureHealth` and `ConsistencyStats`.
//! - `FailureTracer` observes the loop; the default `NoopTracer` does nothing.
//!
//! Invariants
//! - A picture is reconstructed at most `max_reconstructions` times per
//!   configuration; the next disagreement drops it.
//! - Fewer than `min_pictures` surviving pictures is always terminal.

mod coordinator;
mod reconcile;
mod report;
mod tracer;

pub use coordinator::{Agreement, Coordinator};
pub use reconcile::{reconcile, Verdict};
pub use report::{ConsistencyStats, InconsistencyReport, UnresolvableReason};
pub use tracer::{FailureTracer, NoopTracer, Subject, TracingTracer};

#[cfg(test)]
mod tests;
