use std::collections::HashMap;

use super::CanonError;
use crate::config::ObjectId;

/// Maps loose-object ids to the numbers written into canonical strings.
pub trait IdResolver {
    fn resolve(&self, id: ObjectId) -> Result<u64, CanonError>;
}

/// Writes the raw process-unique id.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultIdResolver;

impl IdResolver for DefaultIdResolver {
    #[inline]
    fn resolve(&self, id: ObjectId) -> Result<u64, CanonError> {
        Ok(id.0)
    }
}

/// Writes an assigned label; unknown ids fail.
#[derive(Clone, Debug, Default)]
pub struct DictionaryIdResolver {
    labels: HashMap<ObjectId, u64>,
}

impl DictionaryIdResolver {
    pub fn new(labels: HashMap<ObjectId, u64>) -> Self {
        Self { labels }
    }

    /// `ids[i]` receives label `labels[i]`.
    pub fn from_labeling(ids: &[ObjectId], labels: &[usize]) -> Self {
        Self {
            labels: ids
                .iter()
                .zip(labels.iter())
                .map(|(&id, &label)| (id, label as u64))
                .collect(),
        }
    }
}

impl IdResolver for DictionaryIdResolver {
    fn resolve(&self, id: ObjectId) -> Result<u64, CanonError> {
        self.labels
            .get(&id)
            .copied()
            .ok_or(CanonError::UnresolvedId(id))
    }
}
