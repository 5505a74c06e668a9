//! Robust construction and canonicalization of geometric configurations.
//!
//! A configuration is a set of loose objects (points, lines, circles) plus objects
//! constructed from them. This crate
//! - canonicalizes configurations up to relabeling of interchangeable loose
//!   objects so each equivalence class is registered once (`canon`);
//! - realizes configurations numerically in several independent pictures and
//!   cross-checks constructions and predicates between them, repairing pictures
//!   that disagree (`picture`, `consistency`, `registry`).
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - `api` collects the re-exports the CLI relies on.

pub mod analytic;
pub mod api;
pub mod canon;
mod cfg;
pub mod config;
pub mod consistency;
pub mod construct;
pub mod picture;
pub mod registry;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use analytic::RoundingCfg;
pub use cfg::CoreCfg;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::analytic::{AnalyticObject, Circle, Line, RoundingCfg};
    pub use crate::config::{
        Configuration, ConfigurationObject, ConfigurationObjectType, LooseObjectLayout, ObjectId,
        ObjectRef, Predicate, PredefinedConstructionType,
    };
    pub use crate::registry::{GeometryCore, PredicateVerdict, Registration};
    pub use crate::CoreCfg;
    pub use nalgebra::Vector2 as Vec2;
}
