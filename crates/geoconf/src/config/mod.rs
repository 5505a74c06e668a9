//! Abstract configuration model.
//!
//! Purpose
//! - Describe configurations symbolically: loose objects placed by a layout,
//!   followed by constructed objects that apply a construction to earlier objects.
//! - Validate structure once at creation (layout shape, signatures, dependency
//!   order) so downstream code can rely on it.
//!
//! Invariants
//! - Every object carries a process-unique `ObjectId`, never reused.
//! - Objects are immutable after creation and shared via `ObjectRef` (`Arc`).
//! - A configuration never references an object that appears later in it.
//!
//! Code cross-refs: `canon` (string keys), `construct` (realization), `picture`

mod arguments;
mod configuration;
mod construction;
mod error;
mod ids;
mod layout;
mod objects;
mod predicate;

pub use arguments::{Arguments, ConstructionArgument};
pub use configuration::Configuration;
pub use construction::{
    ComposedConstruction, Construction, ConstructionParameter, PredefinedConstructionType,
    Signature,
};
pub use error::ConfigurationError;
pub use ids::{ConfigurationObjectType, ObjectId};
pub use layout::LooseObjectLayout;
pub use objects::{ConfigurationObject, ConstructedObject, LooseObject, ObjectRef};
pub use predicate::Predicate;
