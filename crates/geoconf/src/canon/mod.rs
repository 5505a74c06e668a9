//! Canonical string keys and duplicate detection.
//!
//! Purpose
//! - Render configuration objects, argument lists and whole configurations as
//!   strings under a pluggable id-resolution scheme.
//! - Find the least string of a configuration over all relabelings of its
//!   same-typed loose objects, so symmetric variants share one key.
//! - Store one representative per key (`StringBasedContainer`, `SharedContainer`).
//!
//! Enumeration order (tie-break)
//! - Type groups are visited in the order Point, Line, Circle.
//! - Within a group, permutations run in lexicographic order starting from identity.
//! - Groups combine like an odometer: the last non-empty group varies fastest.
//! - The first relabeling that reaches the minimal string wins.
//!
//! Code cross-refs: `config::Configuration`, `registry::GeometryCore`

mod container;
mod converter;
mod keyers;
mod least;
mod resolver;

use std::fmt;

use crate::config::ObjectId;

pub use container::{KeyConverter, SharedContainer, StringBasedContainer};
pub use converter::{FullObjectConverter, ObjectConverter};
pub use keyers::{
    ArgumentsContainer, ArgumentsKeyer, ConfigurationKeyer, ConfigurationsContainer,
    ObjectKeyer, ObjectsContainer,
};
pub use least::{LeastConfiguration, LeastConfigurationFinder, Relabelings};
pub use resolver::{DefaultIdResolver, DictionaryIdResolver, IdResolver};

/// Canonical string identifying an item up to the container's equivalence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(pub String);

impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    #[error("object {0} has no id under the current resolver")]
    UnresolvedId(ObjectId),
}
