use super::{ConfigurationObjectType, ObjectId};

/// Structural problems detected while building configuration objects.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("layout {layout} expects loose objects {expected:?}, got {got:?}")]
    LayoutMismatch {
        layout: &'static str,
        expected: Vec<ConfigurationObjectType>,
        got: Vec<ConfigurationObjectType>,
    },

    #[error("object {object} references {missing}, which does not appear before it")]
    ForwardReference { object: ObjectId, missing: ObjectId },

    #[error("object {0} appears more than once")]
    DuplicateObject(ObjectId),

    #[error("object {0} is not a {1} object")]
    WrongObjectKind(ObjectId, &'static str),

    #[error("arguments of {construction} do not match its signature: {reason}")]
    ArgumentShape {
        construction: String,
        reason: String,
    },

    #[error("composed construction {name} is invalid: {reason}")]
    InvalidComposition { name: String, reason: String },
}

impl ConfigurationError {
    pub(crate) fn shape(construction: &str, reason: impl Into<String>) -> Self {
        Self::ArgumentShape {
            construction: construction.to_string(),
            reason: reason.into(),
        }
    }
}
