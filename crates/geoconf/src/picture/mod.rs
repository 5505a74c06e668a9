//! Realizations ("pictures") of a configuration.
//!
//! Purpose
//! - Hold several independent numeric realizations of one configuration so that
//!   constructions and predicates can be cross-checked between them.
//!
//! Model
//! - Loose objects are placed by a `LoosePlacer` from a `PictureSeed`
//!   `(seed, slot, attempt)`; the same seed always yields the same picture.
//! - Constructed objects are added through the construction resolver; only
//!   objects realized in every picture are kept (structural parity).
//! - Predicates are tolerance-based and evaluated per picture.
//!
//! Invariants
//! - All pictures of a `Pictures` realize the same object ids.
//! - Reconstruction replaces a picture wholesale; it never patches single objects.
//!
//! Code cross-refs: `consistency::Coordinator`, `construct::ConstructorResolver`

mod picture;
mod pictures;
mod placement;
mod seed;

pub use picture::{Picture, PredicateError};
pub use pictures::{PictureHealth, Pictures, ReplayError};
pub use placement::{FixedPlacer, LoosePlacer, PlacementCfg, PlacementError, RandomPlacer};
pub use seed::PictureSeed;
