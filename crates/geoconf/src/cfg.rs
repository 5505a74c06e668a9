//! Core configuration.

use crate::analytic::RoundingCfg;
use crate::picture::PlacementCfg;

/// Knobs of the consistency engine.
///
/// - `pictures`: realizations built per configuration.
/// - `min_pictures`: below this many surviving pictures a verdict is not trusted.
/// - `max_reconstructions`: per-picture reconstruction budget for one configuration.
/// - `parallel`: construct and evaluate pictures on the rayon pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoreCfg {
    pub pictures: usize,
    pub min_pictures: usize,
    pub max_reconstructions: usize,
    pub seed: u64,
    pub rounding: RoundingCfg,
    pub parallel: bool,
    pub max_placement_draws: usize,
}

impl Default for CoreCfg {
    fn default() -> Self {
        Self {
            pictures: 5,
            min_pictures: 2,
            max_reconstructions: 4,
            seed: 0x5eed,
            rounding: RoundingCfg::default(),
            parallel: true,
            max_placement_draws: 1000,
        }
    }
}

impl CoreCfg {
    pub fn placement(&self) -> PlacementCfg {
        PlacementCfg {
            max_draws: self.max_placement_draws,
            ..PlacementCfg::default()
        }
    }
}
