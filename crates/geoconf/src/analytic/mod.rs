//! Analytic primitives: floating-point points, lines and circles.
//!
//! Purpose
//! - Realize abstract configuration objects numerically inside one picture.
//! - Provide the tolerance-based predicates (collinear, concyclic, incidence, ...)
//!   evaluated by pictures and by the constructors' degeneracy checks.
//!
//! Conventions
//! - Points are `Vector2<f64>`.
//! - Lines are `n·x = c` with a unit normal `n` in the sign-normalized half-plane.
//! - Every comparison goes through `RoundingCfg`; no predicate uses a bare epsilon.
//!
//! Code cross-refs: `picture::Picture`, `construct::atomic`

mod predicates;
mod rounding;
mod types;

pub use predicates::{
    are_collinear, are_concurrent, are_concyclic, are_parallel, are_perpendicular, are_tangent,
    equal_distances, lies_on,
};
pub use rounding::RoundingCfg;
pub use types::{AnalyticObject, Circle, Line};

#[cfg(test)]
mod tests;
