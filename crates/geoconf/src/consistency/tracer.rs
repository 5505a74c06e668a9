use std::fmt;

use tracing::{debug, warn};

use super::InconsistencyReport;
use crate::config::{ObjectId, Predicate};
use crate::construct::ConstructionFailure;
use crate::picture::ReplayError;

/// What the pictures were asked about when they disagreed.
#[derive(Clone, Copy, Debug)]
pub enum Subject<'a> {
    Object(ObjectId),
    Predicate(&'a Predicate),
}

impl fmt::Display for Subject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(id) => write!(f, "object {id}"),
            Self::Predicate(p) => write!(f, "predicate {p}"),
        }
    }
}

/// Diagnostic hooks. Implementations must not influence the outcome.
pub trait FailureTracer: Send + Sync {
    fn construction_failed(&self, _object: ObjectId, _picture: usize, _failure: &ConstructionFailure) {}
    fn inconsistency(&self, _subject: Subject<'_>, _suspects: &[usize]) {}
    fn reconstructing(&self, _picture: usize, _attempt: usize) {}
    fn replay_failed(&self, _picture: usize, _error: &ReplayError) {}
    fn picture_dropped(&self, _picture: usize, _remaining: usize) {}
    fn unresolvable(&self, _report: &InconsistencyReport) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl FailureTracer for NoopTracer {}

/// Forwards every event to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTracer;

impl FailureTracer for TracingTracer {
    fn construction_failed(&self, object: ObjectId, picture: usize, failure: &ConstructionFailure) {
        warn!(%object, picture, %failure, "construction failed");
    }

    fn inconsistency(&self, subject: Subject<'_>, suspects: &[usize]) {
        debug!(%subject, ?suspects, "pictures disagree");
    }

    fn reconstructing(&self, picture: usize, attempt: usize) {
        debug!(picture, attempt, "reconstructing picture");
    }

    fn replay_failed(&self, picture: usize, error: &ReplayError) {
        debug!(picture, %error, "reconstruction attempt failed");
    }

    fn picture_dropped(&self, picture: usize, remaining: usize) {
        warn!(picture, remaining, "picture dropped");
    }

    fn unresolvable(&self, report: &InconsistencyReport) {
        warn!(%report, "unresolvable inconsistency");
    }
}
