//! Configurations: loose objects followed by constructed objects in dependency order.

use std::collections::HashSet;

use super::{
    ConfigurationError, ConfigurationObject, ConfigurationObjectType, LooseObjectLayout, ObjectId,
    ObjectRef,
};

/// Validated configuration.
///
/// Invariants:
/// - `loose` holds exactly the layout's loose objects, in layout order.
/// - `constructed` holds constructed objects whose arguments all appear earlier.
/// - Ids are unique across the whole configuration.
#[derive(Clone, Debug)]
pub struct Configuration {
    layout: LooseObjectLayout,
    loose: Vec<ObjectRef>,
    constructed: Vec<ObjectRef>,
}

impl Configuration {
    pub fn new(
        layout: LooseObjectLayout,
        loose: Vec<ObjectRef>,
        constructed: Vec<ObjectRef>,
    ) -> Result<Self, ConfigurationError> {
        let got: Vec<ConfigurationObjectType> = loose.iter().map(|o| o.object_type()).collect();
        if got != layout.object_types() {
            return Err(ConfigurationError::LayoutMismatch {
                layout: layout.name(),
                expected: layout.object_types().to_vec(),
                got,
            });
        }
        let mut seen: HashSet<ObjectId> = HashSet::with_capacity(loose.len() + constructed.len());
        for object in &loose {
            if !matches!(object.as_ref(), ConfigurationObject::Loose(_)) {
                return Err(ConfigurationError::WrongObjectKind(object.id(), "loose"));
            }
            if !seen.insert(object.id()) {
                return Err(ConfigurationError::DuplicateObject(object.id()));
            }
        }
        for object in &constructed {
            let Some(c) = object.as_constructed() else {
                return Err(ConfigurationError::WrongObjectKind(object.id(), "constructed"));
            };
            if let Some(missing) = c
                .arguments()
                .flattened()
                .iter()
                .map(|a| a.id())
                .find(|id| !seen.contains(id))
            {
                return Err(ConfigurationError::ForwardReference {
                    object: object.id(),
                    missing,
                });
            }
            if !seen.insert(object.id()) {
                return Err(ConfigurationError::DuplicateObject(object.id()));
            }
        }
        Ok(Self {
            layout,
            loose,
            constructed,
        })
    }

    /// Fresh loose objects for `layout` and no constructed objects.
    pub fn from_layout(layout: LooseObjectLayout) -> Self {
        let loose = layout
            .object_types()
            .iter()
            .map(|&t| ConfigurationObject::loose(t))
            .collect();
        Self {
            layout,
            loose,
            constructed: Vec::new(),
        }
    }

    /// Derive a configuration with `objects` appended.
    pub fn extend(&self, objects: Vec<ObjectRef>) -> Result<Self, ConfigurationError> {
        let mut constructed = self.constructed.clone();
        constructed.extend(objects);
        Self::new(self.layout, self.loose.clone(), constructed)
    }

    pub fn layout(&self) -> LooseObjectLayout {
        self.layout
    }

    pub fn loose_objects(&self) -> &[ObjectRef] {
        &self.loose
    }

    pub fn constructed_objects(&self) -> &[ObjectRef] {
        &self.constructed
    }

    /// Loose objects followed by constructed objects.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectRef> {
        self.loose.iter().chain(self.constructed.iter())
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectRef> {
        self.objects().find(|o| o.id() == id)
    }

    pub fn len(&self) -> usize {
        self.loose.len() + self.constructed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `prefix`'s objects are the leading objects of `self`.
    pub fn starts_with(&self, prefix: &Configuration) -> bool {
        self.layout == prefix.layout
            && prefix.len() <= self.len()
            && self
                .objects()
                .zip(prefix.objects())
                .all(|(a, b)| a.id() == b.id())
    }
}
