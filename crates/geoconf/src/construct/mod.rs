//! Construction resolver and constructors.
//!
//! Purpose
//! - Map an abstract construction to a constructor once (`ConstructorResolver`)
//!   and evaluate it on a picture's analytic objects.
//! - Report per object: constructed, inconstructible (a required predicate fails),
//!   duplicate of an existing object, or a fatal construction failure.
//!
//! Model
//! - Atomic constructors are closed-form functions over the flattened inputs.
//! - Composed constructors replay an internal configuration, binding its loose
//!   objects to the inputs and resolving each internal construction recursively.
//!
//! Code cross-refs: `config::{Construction, ComposedConstruction}`, `picture::Picture`

mod atomic;
pub mod composed;
mod outcome;
mod resolver;

pub use atomic::{atomic_constructor, AtomicConstructor};
pub use outcome::{ConstructionFailure, ConstructionOutcome, OutcomeClass};
pub use resolver::{Constructor, ConstructorResolver};
