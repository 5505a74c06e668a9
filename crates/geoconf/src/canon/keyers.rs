//! Key converters for objects, argument lists and configurations.

use super::{
    CanonError, CanonicalKey, DefaultIdResolver, FullObjectConverter, KeyConverter,
    LeastConfigurationFinder, ObjectConverter, StringBasedContainer,
};
use crate::config::{Arguments, Configuration, ObjectRef};

/// Objects keyed by their full string under raw ids.
#[derive(Clone, Debug, Default)]
pub struct ObjectKeyer<C = FullObjectConverter> {
    pub converter: C,
}

impl<C: ObjectConverter> KeyConverter<ObjectRef> for ObjectKeyer<C> {
    fn key(&self, item: &ObjectRef) -> Result<CanonicalKey, CanonError> {
        self.converter
            .object_string(item, &DefaultIdResolver)
            .map(CanonicalKey)
    }
}

/// Argument lists keyed by their string under raw ids.
#[derive(Clone, Debug, Default)]
pub struct ArgumentsKeyer<C = FullObjectConverter> {
    pub converter: C,
}

impl<C: ObjectConverter> KeyConverter<Arguments> for ArgumentsKeyer<C> {
    fn key(&self, item: &Arguments) -> Result<CanonicalKey, CanonError> {
        self.converter
            .arguments_string(item, &DefaultIdResolver)
            .map(CanonicalKey)
    }
}

/// Configurations keyed by their least string over loose relabelings.
#[derive(Clone, Debug, Default)]
pub struct ConfigurationKeyer<C = FullObjectConverter> {
    pub finder: LeastConfigurationFinder<C>,
}

impl<C: ObjectConverter> KeyConverter<Configuration> for ConfigurationKeyer<C> {
    fn key(&self, item: &Configuration) -> Result<CanonicalKey, CanonError> {
        self.finder.find(item).map(|least| least.key)
    }
}

pub type ObjectsContainer = StringBasedContainer<ObjectRef, ObjectKeyer>;
pub type ArgumentsContainer = StringBasedContainer<Arguments, ArgumentsKeyer>;
pub type ConfigurationsContainer = StringBasedContainer<Configuration, ConfigurationKeyer>;
