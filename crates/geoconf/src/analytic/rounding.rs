//! Significant-bits comparison policy shared by every predicate.

/// Numeric comparison policy.
///
/// Two values are considered equal when they agree to `significant_bits` bits of
/// relative precision: `|a - b| <= 2^-bits * max(1, |a|, |b|)`. Quantities that are
/// compared against zero carry an explicit scale (e.g. a cross product is scaled
/// by the product of the two vector lengths).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundingCfg {
    pub significant_bits: u32,
}

impl Default for RoundingCfg {
    fn default() -> Self {
        Self {
            significant_bits: 32,
        }
    }
}

impl RoundingCfg {
    pub fn new(significant_bits: u32) -> Self {
        Self {
            significant_bits: significant_bits.clamp(1, 52),
        }
    }

    /// Relative tolerance `2^-bits`.
    #[inline]
    pub fn eps(&self) -> f64 {
        (-(self.significant_bits.clamp(1, 52) as f64)).exp2()
    }

    #[inline]
    pub fn eq(&self, a: f64, b: f64) -> bool {
        let scale = 1.0f64.max(a.abs()).max(b.abs());
        (a - b).abs() <= self.eps() * scale
    }

    /// `x ≈ 0` relative to `scale` (the natural magnitude of the terms that produced `x`).
    #[inline]
    pub fn is_zero(&self, x: f64, scale: f64) -> bool {
        x.abs() <= self.eps() * scale.abs().max(f64::MIN_POSITIVE)
    }
}
