//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is a convenience surface for the CLI and benches, not a stable public API.
//! - Prefer these re-exports over reaching into submodules.

// Objects and configurations
pub use crate::config::{
    Configuration, ConfigurationError, ConfigurationObject, ConfigurationObjectType, Construction,
    LooseObjectLayout, ObjectId, ObjectRef, Predicate, PredefinedConstructionType,
};
// Canonical keys
pub use crate::canon::{CanonicalKey, ConfigurationKeyer, LeastConfigurationFinder};
// Composed constructions
pub use crate::construct::composed::{by_name as composed_by_name, library as composed_library};
// Pictures and placement
pub use crate::picture::{FixedPlacer, LoosePlacer, PlacementCfg, Pictures, RandomPlacer};
// Registration
pub use crate::consistency::{ConsistencyStats, InconsistencyReport, TracingTracer};
pub use crate::registry::{AcceptedConfiguration, GeometryCore, PredicateVerdict, Registration};
pub use crate::{CoreCfg, RoundingCfg};
