//! Least canonical string over relabelings of same-typed loose objects.

use super::{CanonError, CanonicalKey, DictionaryIdResolver, FullObjectConverter, ObjectConverter};
use crate::config::{Configuration, ConfigurationObjectType, ObjectId};

/// Winning key plus the loose objects in label order (`labeling[label] = id`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeastConfiguration {
    pub key: CanonicalKey,
    pub labeling: Vec<ObjectId>,
}

/// Finds the lexicographically least configuration string.
#[derive(Clone, Debug, Default)]
pub struct LeastConfigurationFinder<C = FullObjectConverter> {
    converter: C,
}

impl<C: ObjectConverter> LeastConfigurationFinder<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn find(&self, configuration: &Configuration) -> Result<LeastConfiguration, CanonError> {
        let ids: Vec<ObjectId> = configuration.loose_objects().iter().map(|o| o.id()).collect();
        let types: Vec<ConfigurationObjectType> = configuration
            .loose_objects()
            .iter()
            .map(|o| o.object_type())
            .collect();
        let mut best: Option<(String, Vec<usize>)> = None;
        for labels in Relabelings::new(&types) {
            let resolver = DictionaryIdResolver::from_labeling(&ids, &labels);
            let candidate = self.converter.configuration_string(configuration, &resolver)?;
            // Strict comparison keeps the first enumerated minimum.
            if best.as_ref().map_or(true, |(s, _)| candidate < *s) {
                best = Some((candidate, labels));
            }
        }
        let (key, labels) = best.unwrap_or_default();
        let mut labeling = ids.clone();
        for (i, &label) in labels.iter().enumerate() {
            labeling[label] = ids[i];
        }
        Ok(LeastConfiguration {
            key: CanonicalKey(key),
            labeling,
        })
    }
}

/// Iterator over relabelings permuting loose objects within their type group.
///
/// Each item maps loose index → label; labels are the indices of the group's
/// own positions, so types stay where the layout puts them.
#[derive(Clone, Debug)]
pub struct Relabelings {
    groups: Vec<Vec<usize>>,
    perms: Vec<Vec<usize>>,
    len: usize,
    done: bool,
}

impl Relabelings {
    pub fn new(types: &[ConfigurationObjectType]) -> Self {
        let groups: Vec<Vec<usize>> = ConfigurationObjectType::ALL
            .iter()
            .map(|t| (0..types.len()).filter(|&i| types[i] == *t).collect::<Vec<_>>())
            .filter(|g| !g.is_empty())
            .collect();
        let perms = groups.iter().map(|g| (0..g.len()).collect()).collect();
        Self {
            groups,
            perms,
            len: types.len(),
            done: false,
        }
    }
}

impl Iterator for Relabelings {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let mut labels = vec![0; self.len];
        for (positions, perm) in self.groups.iter().zip(self.perms.iter()) {
            for (j, &p) in perm.iter().enumerate() {
                labels[positions[p]] = positions[j];
            }
        }
        let mut g = self.perms.len();
        loop {
            if g == 0 {
                self.done = true;
                break;
            }
            g -= 1;
            if next_permutation(&mut self.perms[g]) {
                break;
            }
        }
        Some(labels)
    }
}

/// Advance to the next lexicographic permutation; on the last one, reset to the
/// first and return `false`.
fn next_permutation(v: &mut [usize]) -> bool {
    if v.len() < 2 {
        return false;
    }
    let mut i = v.len() - 1;
    while i > 0 && v[i - 1] >= v[i] {
        i -= 1;
    }
    if i == 0 {
        v.reverse();
        return false;
    }
    let mut j = v.len() - 1;
    while v[j] <= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConfigurationObjectType::{Line, Point};

    #[test]
    fn permutations_are_lexicographic() {
        let mut v = vec![0, 1, 2];
        let mut seen = vec![v.clone()];
        while next_permutation(&mut v) {
            seen.push(v.clone());
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[1], vec![0, 2, 1]);
        assert_eq!(seen[5], vec![2, 1, 0]);
        // Wrapped back to identity.
        assert_eq!(v, vec![0, 1, 2]);
    }

    #[test]
    fn relabelings_respect_types() {
        let types = [Line, Point, Point];
        let all: Vec<_> = Relabelings::new(&types).collect();
        assert_eq!(all, vec![vec![0, 1, 2], vec![0, 2, 1]]);
        assert_eq!(Relabelings::new(&[Point; 4]).count(), 24);
        // No loose objects: one empty relabeling.
        assert_eq!(Relabelings::new(&[]).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
    }
}
