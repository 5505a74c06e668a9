//! Loose and constructed configuration objects.

use std::sync::Arc;

use super::{Arguments, ConfigurationError, ConfigurationObjectType, Construction, ObjectId};

/// Shared, immutable handle to a configuration object.
pub type ObjectRef = Arc<ConfigurationObject>;

/// Free base object without a defining construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LooseObject {
    pub id: ObjectId,
    pub object_type: ConfigurationObjectType,
}

impl LooseObject {
    pub fn new(object_type: ConfigurationObjectType) -> Self {
        Self {
            id: ObjectId::fresh(),
            object_type,
        }
    }
}

/// Result of applying a construction to arguments.
#[derive(Clone, Debug)]
pub struct ConstructedObject {
    id: ObjectId,
    construction: Construction,
    arguments: Arguments,
}

impl ConstructedObject {
    /// Validate `arguments` against the construction's signature and assign a fresh id.
    pub fn new(construction: Construction, arguments: Arguments) -> Result<Self, ConfigurationError> {
        arguments.check(&construction)?;
        Ok(Self {
            id: ObjectId::fresh(),
            construction,
            arguments,
        })
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn construction(&self) -> &Construction {
        &self.construction
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn object_type(&self) -> ConfigurationObjectType {
        self.construction.output_type()
    }
}

#[derive(Clone, Debug)]
pub enum ConfigurationObject {
    Loose(LooseObject),
    Constructed(ConstructedObject),
}

impl ConfigurationObject {
    pub fn loose(object_type: ConfigurationObjectType) -> ObjectRef {
        Arc::new(Self::Loose(LooseObject::new(object_type)))
    }

    /// Build a constructed object from a flat list of argument objects.
    pub fn construct(
        construction: impl Into<Construction>,
        objects: &[ObjectRef],
    ) -> Result<ObjectRef, ConfigurationError> {
        let construction = construction.into();
        let arguments = Arguments::pack(&construction, objects)?;
        Ok(Arc::new(Self::Constructed(ConstructedObject::new(
            construction,
            arguments,
        )?)))
    }

    pub fn id(&self) -> ObjectId {
        match self {
            Self::Loose(l) => l.id,
            Self::Constructed(c) => c.id(),
        }
    }

    pub fn object_type(&self) -> ConfigurationObjectType {
        match self {
            Self::Loose(l) => l.object_type,
            Self::Constructed(c) => c.object_type(),
        }
    }

    pub fn as_constructed(&self) -> Option<&ConstructedObject> {
        match self {
            Self::Constructed(c) => Some(c),
            Self::Loose(_) => None,
        }
    }
}
