//! Canonical string containers.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{CanonError, CanonicalKey};

/// Produces the canonical key of an item.
pub trait KeyConverter<T> {
    fn key(&self, item: &T) -> Result<CanonicalKey, CanonError>;
}

/// One representative per canonical key. Not synchronized.
#[derive(Clone, Debug)]
pub struct StringBasedContainer<T, K> {
    converter: K,
    items: HashMap<CanonicalKey, T>,
}

impl<T, K: KeyConverter<T>> StringBasedContainer<T, K> {
    pub fn new(converter: K) -> Self {
        Self {
            converter,
            items: HashMap::new(),
        }
    }

    pub fn converter(&self) -> &K {
        &self.converter
    }

    pub fn contains(&self, item: &T) -> Result<bool, CanonError> {
        Ok(self.items.contains_key(&self.converter.key(item)?))
    }

    /// Insert unless an equivalent item is present. Returns `true` iff inserted.
    pub fn add(&mut self, item: T) -> Result<bool, CanonError> {
        let key = self.converter.key(&item)?;
        Ok(self.add_keyed(key, item))
    }

    pub fn contains_key(&self, key: &CanonicalKey) -> bool {
        self.items.contains_key(key)
    }

    /// Insert under a precomputed key.
    pub fn add_keyed(&mut self, key: CanonicalKey, item: T) -> bool {
        if self.items.contains_key(&key) {
            return false;
        }
        self.items.insert(key, item);
        true
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<&T> {
        self.items.get(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalKey, &T)> {
        self.items.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (CanonicalKey, T)> {
        self.items.into_iter()
    }
}

/// Mutex-guarded container; keys are computed outside the lock and
/// check-then-insert happens under it.
#[derive(Debug)]
pub struct SharedContainer<T, K> {
    converter: K,
    items: Mutex<HashMap<CanonicalKey, T>>,
}

impl<T: Clone, K: KeyConverter<T>> SharedContainer<T, K> {
    pub fn new(converter: K) -> Self {
        Self {
            converter,
            items: Mutex::new(HashMap::new()),
        }
    }

    pub fn key(&self, item: &T) -> Result<CanonicalKey, CanonError> {
        self.converter.key(item)
    }

    pub fn contains(&self, item: &T) -> Result<bool, CanonError> {
        let key = self.converter.key(item)?;
        Ok(self.contains_key(&key))
    }

    pub fn add(&self, item: T) -> Result<bool, CanonError> {
        let key = self.converter.key(&item)?;
        Ok(self.add_keyed(key, item))
    }

    pub fn contains_key(&self, key: &CanonicalKey) -> bool {
        self.items.lock().contains_key(key)
    }

    pub fn add_keyed(&self, key: CanonicalKey, item: T) -> bool {
        let mut items = self.items.lock();
        if items.contains_key(&key) {
            return false;
        }
        items.insert(key, item);
        true
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<T> {
        self.items.lock().get(key).cloned()
    }

    /// Merge a per-worker container; returns the number of new keys.
    ///
    /// Items are re-keyed with this container's converter, so a worker keyed
    /// under another scheme cannot introduce foreign keys.
    pub fn merge<K2>(&self, other: StringBasedContainer<T, K2>) -> Result<usize, CanonError>
    where
        K2: KeyConverter<T>,
    {
        let keyed = other
            .into_entries()
            .map(|(_, item)| Ok((self.converter.key(&item)?, item)))
            .collect::<Result<Vec<_>, CanonError>>()?;
        let mut items = self.items.lock();
        let mut added = 0;
        for (key, item) in keyed {
            if let std::collections::hash_map::Entry::Vacant(e) = items.entry(key) {
                e.insert(item);
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn keys(&self) -> Vec<CanonicalKey> {
        self.items.lock().keys().cloned().collect()
    }
}
