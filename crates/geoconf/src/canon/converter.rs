//! Full object-to-string conversion.
//!
//! - Loose object: type letter + resolved id (`P0`, `L3`).
//! - Constructed object: `Name(arg,...)`, argument objects rendered recursively.
//! - Set argument: element strings sorted and wrapped in `{}`.
//! - Configuration: `Layout|<sorted loose strings>|<sorted constructed strings>`.

use std::collections::HashMap;

use super::{CanonError, IdResolver};
use crate::config::{
    Arguments, Configuration, ConfigurationObject, ConstructionArgument, ObjectId,
};

/// Pluggable converter from configuration objects to strings.
pub trait ObjectConverter: Send + Sync {
    fn object_string(
        &self,
        object: &ConfigurationObject,
        resolver: &dyn IdResolver,
    ) -> Result<String, CanonError>;

    fn arguments_string(
        &self,
        arguments: &Arguments,
        resolver: &dyn IdResolver,
    ) -> Result<String, CanonError>;

    fn configuration_string(
        &self,
        configuration: &Configuration,
        resolver: &dyn IdResolver,
    ) -> Result<String, CanonError> {
        let mut loose = configuration
            .loose_objects()
            .iter()
            .map(|o| self.object_string(o, resolver))
            .collect::<Result<Vec<_>, _>>()?;
        loose.sort();
        let mut constructed = configuration
            .constructed_objects()
            .iter()
            .map(|o| self.object_string(o, resolver))
            .collect::<Result<Vec<_>, _>>()?;
        constructed.sort();
        Ok(format!(
            "{}|{}|{}",
            configuration.layout().name(),
            loose.join(","),
            constructed.join(",")
        ))
    }
}

/// Default converter; memoizes shared sub-objects within one call.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullObjectConverter;

struct Rendering<'r> {
    resolver: &'r dyn IdResolver,
    cache: HashMap<ObjectId, String>,
}

impl<'r> Rendering<'r> {
    fn new(resolver: &'r dyn IdResolver) -> Self {
        Self {
            resolver,
            cache: HashMap::new(),
        }
    }

    fn object(&mut self, object: &ConfigurationObject) -> Result<String, CanonError> {
        if let Some(s) = self.cache.get(&object.id()) {
            return Ok(s.clone());
        }
        let s = match object {
            ConfigurationObject::Loose(l) => {
                format!("{}{}", l.object_type.letter(), self.resolver.resolve(l.id)?)
            }
            ConfigurationObject::Constructed(c) => format!(
                "{}({})",
                c.construction().name(),
                self.arguments(c.arguments())?
            ),
        };
        self.cache.insert(object.id(), s.clone());
        Ok(s)
    }

    fn argument(&mut self, argument: &ConstructionArgument) -> Result<String, CanonError> {
        match argument {
            ConstructionArgument::Object(o) => self.object(o),
            ConstructionArgument::Set(items) => {
                let mut parts = items
                    .iter()
                    .map(|a| self.argument(a))
                    .collect::<Result<Vec<_>, _>>()?;
                parts.sort();
                Ok(format!("{{{}}}", parts.join(",")))
            }
        }
    }

    fn arguments(&mut self, arguments: &Arguments) -> Result<String, CanonError> {
        let parts = arguments
            .as_slice()
            .iter()
            .map(|a| self.argument(a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(","))
    }
}

impl ObjectConverter for FullObjectConverter {
    fn object_string(
        &self,
        object: &ConfigurationObject,
        resolver: &dyn IdResolver,
    ) -> Result<String, CanonError> {
        Rendering::new(resolver).object(object)
    }

    fn arguments_string(
        &self,
        arguments: &Arguments,
        resolver: &dyn IdResolver,
    ) -> Result<String, CanonError> {
        Rendering::new(resolver).arguments(arguments)
    }

    fn configuration_string(
        &self,
        configuration: &Configuration,
        resolver: &dyn IdResolver,
    ) -> Result<String, CanonError> {
        let mut rendering = Rendering::new(resolver);
        let mut loose = configuration
            .loose_objects()
            .iter()
            .map(|o| rendering.object(o))
            .collect::<Result<Vec<_>, _>>()?;
        loose.sort();
        let mut constructed = configuration
            .constructed_objects()
            .iter()
            .map(|o| rendering.object(o))
            .collect::<Result<Vec<_>, _>>()?;
        constructed.sort();
        Ok(format!(
            "{}|{}|{}",
            configuration.layout().name(),
            loose.join(","),
            constructed.join(",")
        ))
    }
}
