use rand::rngs::StdRng;
use rand::SeedableRng;

/// Replay key of one picture draw: base seed, picture slot and attempt.
///
/// Reconstruction bumps `attempt`; slot and seed stay fixed so every draw can be
/// replayed from the seed alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PictureSeed {
    pub seed: u64,
    pub slot: u64,
    pub attempt: u64,
}

impl PictureSeed {
    pub fn new(seed: u64, slot: usize) -> Self {
        Self {
            seed,
            slot: slot as u64,
            attempt: 0,
        }
    }

    /// Same slot, next attempt.
    #[inline]
    pub fn next_attempt(self) -> Self {
        Self {
            attempt: self.attempt + 1,
            ..self
        }
    }

    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let slot = mix(self.slot.wrapping_add(0x9e3779b97f4a7c15));
        let attempt = mix(self.attempt.wrapping_add(0xd1b54a32d192ed03));
        StdRng::seed_from_u64(mix(self.seed ^ slot ^ attempt.rotate_left(17)))
    }
}
