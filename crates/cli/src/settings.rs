//! Engine settings file (JSON) and command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geoconf::{CoreCfg, RoundingCfg};
use serde::{Deserialize, Serialize};

/// Serializable mirror of `CoreCfg`; missing fields take the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub pictures: usize,
    pub min_pictures: usize,
    pub max_reconstructions: usize,
    pub seed: u64,
    pub significant_bits: u32,
    pub parallel: bool,
    pub max_placement_draws: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let cfg = CoreCfg::default();
        Self {
            pictures: cfg.pictures,
            min_pictures: cfg.min_pictures,
            max_reconstructions: cfg.max_reconstructions,
            seed: cfg.seed,
            significant_bits: cfg.rounding.significant_bits,
            parallel: cfg.parallel,
            max_placement_draws: cfg.max_placement_draws,
        }
    }
}

impl Settings {
    /// Read `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let bytes = fs::read(path).with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing settings {}", path.display()))
    }

    pub fn with_overrides(mut self, seed: Option<u64>, pictures: Option<usize>) -> Self {
        if let Some(seed) = seed {
            self.seed = seed;
        }
        if let Some(pictures) = pictures {
            self.pictures = pictures;
        }
        self
    }

    pub fn core_cfg(&self) -> CoreCfg {
        CoreCfg {
            pictures: self.pictures,
            min_pictures: self.min_pictures,
            max_reconstructions: self.max_reconstructions,
            seed: self.seed,
            rounding: RoundingCfg::new(self.significant_bits),
            parallel: self.parallel,
            max_placement_draws: self.max_placement_draws,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"pictures": 7, "significant_bits": 24}"#).unwrap();
        let s = Settings::load(Some(&path)).unwrap();
        assert_eq!(s.pictures, 7);
        assert_eq!(s.min_pictures, CoreCfg::default().min_pictures);
        let cfg = s.with_overrides(Some(9), None).core_cfg();
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.pictures, 7);
        assert_eq!(cfg.rounding.significant_bits, 24);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"picturez": 7}"#).unwrap();
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn defaults_round_trip_to_core_cfg() {
        assert_eq!(Settings::default().core_cfg(), CoreCfg::default());
    }
}
