//! Injectable random source for the few randomized mechanics.
//!
//! Randomness enters a battle in exactly three places: status-chance rolls on
//! hit, Lag stutter rolls, and actions whose description is random (dodge).
//! All three go through [`BattleRng`], so a battle seeded the same way replays
//! identically.

/// Random source consulted by the engine and by randomized actions.
///
/// Implementations must be deterministic: the same seed produces the same
/// sequence.
pub trait BattleRng {
    /// Generate a random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_f32(&mut self) -> f32 {
        // 24 high bits fit exactly in an f32 mantissa.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns true with probability `p` (clamped to `0.0..=1.0`).
    ///
    /// `p <= 0` never consumes a value and never succeeds; `p >= 1` always
    /// succeeds without consuming a value.
    fn chance(&mut self, p: f32) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.next_f32() < p
    }

    /// Random index in `[0, len)`. Returns 0 for an empty range.
    fn gen_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit state, 32-bit output. Simple operations only, so the
/// sequence is identical on every host.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a generator from a 64-bit seed.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::seed_from_u64(0)
    }
}

impl BattleRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// SplitMix64-style avalanche so nearby seeds diverge immediately.
fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}

/// Replays a fixed list of floats, cycling when exhausted.
///
/// Useful for pinning rolls in tests and replays: `next_f32` returns the
/// scripted values in order.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedRng {
    rolls: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(rolls: Vec<f32>) -> Self {
        Self { rolls, cursor: 0 }
    }

    /// Every roll returns `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    fn next_roll(&mut self) -> f32 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}

impl BattleRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_roll().clamp(0.0, 1.0) * u32::MAX as f32) as u32
    }

    fn next_f32(&mut self) -> f32 {
        self.next_roll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let mut a = PcgRng::seed_from_u64(12345);
        let mut b = PcgRng::seed_from_u64(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::seed_from_u64(1);
        let mut b = PcgRng::seed_from_u64(2);
        assert_ne!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn floats_stay_in_unit_range() {
        let mut rng = PcgRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn certain_chances_do_not_consume_rolls() {
        let mut rng = ScriptedRng::new(vec![0.9, 0.1]);
        assert!(rng.chance(1.0));
        assert!(!rng.chance(0.0));
        assert!(!rng.chance(0.5));
        assert!(rng.chance(0.5));
    }

    #[test]
    fn gen_index_handles_empty_range() {
        let mut rng = PcgRng::seed_from_u64(7);
        assert_eq!(rng.gen_index(0), 0);
        for _ in 0..100 {
            assert!(rng.gen_index(4) < 4);
        }
    }
}
