use crate::analytic::AnalyticObject;
use crate::config::{ConfigurationObjectType, ObjectId};

/// Fatal construction defect (never an expected geometric outcome).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstructionFailure {
    #[error("{construction} expects {expected} inputs, got {got}")]
    Arity {
        construction: String,
        expected: usize,
        got: usize,
    },

    #[error("{construction}: input {index} is not a {expected}")]
    InputType {
        construction: String,
        index: usize,
        expected: ConfigurationObjectType,
    },

    #[error("object {0} has no analytic value in this picture")]
    MissingInput(ObjectId),

    #[error("{0} produced a non-finite result")]
    NonFinite(String),

    #[error("batch mixes constructions {0} and {1}")]
    MixedBatch(String, String),
}

/// Per-object, per-picture construction result.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionOutcome {
    Constructed(AnalyticObject),
    /// A predicate required by the construction fails (e.g. parallel lines).
    Inconstructible,
    /// The result coincides with an existing object of the picture.
    Duplicate(ObjectId),
    Failed(ConstructionFailure),
}

impl ConstructionOutcome {
    pub fn class(&self) -> OutcomeClass {
        match self {
            Self::Constructed(_) => OutcomeClass::Constructed,
            Self::Inconstructible => OutcomeClass::Inconstructible,
            Self::Duplicate(id) => OutcomeClass::Duplicate(*id),
            Self::Failed(_) => OutcomeClass::Failed,
        }
    }
}

/// Outcome without numeric payload; compared across pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutcomeClass {
    Constructed,
    Inconstructible,
    Duplicate(ObjectId),
    Failed,
}
