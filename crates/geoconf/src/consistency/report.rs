use std::fmt;

use crate::canon::CanonError;
use crate::config::{ObjectId, Predicate};
use crate::construct::ConstructionFailure;
use crate::picture::{PlacementError, PredicateError};

/// Counters of one registration or predicate evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsistencyStats {
    /// Reconciliations that ended in disagreement.
    pub inconsistencies: usize,
    pub reconstructions: usize,
    pub dropped_pictures: usize,
    /// Reconciliations that ended in agreement.
    pub agreements: usize,
}

impl ConsistencyStats {
    pub fn absorb(&mut self, other: ConsistencyStats) {
        self.inconsistencies += other.inconsistencies;
        self.reconstructions += other.reconstructions;
        self.dropped_pictures += other.dropped_pictures;
        self.agreements += other.agreements;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UnresolvableReason {
    /// Fewer than `min_pictures` pictures survived.
    TooFewPictures { min: usize },
    /// Every picture hit a fatal construction failure.
    ConstructionFailure(ConstructionFailure),
    Placement(PlacementError),
    MalformedPredicate(PredicateError),
    Canonicalization(CanonError),
}

impl fmt::Display for UnresolvableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPictures { min } => write!(f, "fewer than {min} consistent pictures"),
            Self::ConstructionFailure(e) => write!(f, "construction failure: {e}"),
            Self::Placement(e) => write!(f, "placement: {e}"),
            Self::MalformedPredicate(e) => write!(f, "malformed predicate: {e}"),
            Self::Canonicalization(e) => write!(f, "canonicalization: {e}"),
        }
    }
}

/// Terminal failure of a configuration or predicate evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct InconsistencyReport {
    pub reason: UnresolvableReason,
    /// Object under construction when the failure occurred.
    pub object: Option<ObjectId>,
    /// Predicate under evaluation when the failure occurred.
    pub predicate: Option<Predicate>,
    pub surviving: usize,
    pub stats: ConsistencyStats,
}

impl fmt::Display for InconsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)?;
        if let Some(object) = self.object {
            write!(f, " at {object}")?;
        }
        if let Some(predicate) = &self.predicate {
            write!(f, " evaluating {predicate}")?;
        }
        write!(
            f,
            " ({} pictures left, {} reconstructions)",
            self.surviving, self.stats.reconstructions
        )
    }
}
