//! Injectable randomness for the tie-break between equally loaded players.
//!
//! The scheduler never touches a global random generator: it draws from a
//! [`RandomSource`] handed to the [`Game`](crate::game::Game) at
//! construction. Tests pass a seeded source to pin assignments down
//! exactly; the console uses an entropy-backed one unless
//! `PINASSIGN_SEED` is set.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Strategy interface for the scheduler's uniform tie-break pick.
pub trait RandomSource {
    /// Returns an index in `0..len`. Called with `len >= 1` only.
    fn pick(&mut self, len: usize) -> usize;
}

/// [`RandomSource`] backed by a small, seedable PRNG.
#[derive(Debug)]
pub struct SmallRngSource(SmallRng);

impl SmallRngSource {
    /// Creates a source seeded from OS entropy.
    pub fn new() -> SmallRngSource {
        SmallRngSource(SmallRng::from_rng(&mut rand::rng()))
    }

    /// Creates a deterministic source. Same seed, same picks.
    pub fn seeded(seed: u64) -> SmallRngSource {
        SmallRngSource(SmallRng::seed_from_u64(seed))
    }
}

impl Default for SmallRngSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SmallRngSource {
    fn pick(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

#[cfg(test)]
mod random_source_tests {
    use super::*;

    #[test]
    fn picks_stay_in_bounds() {
        let mut source = SmallRngSource::new();
        for len in 1..50 {
            assert!(source.pick(len) < len);
        }
    }

    #[test]
    fn seeded_sources_are_reproducible() {
        let mut a = SmallRngSource::seeded(42);
        let mut b = SmallRngSource::seeded(42);
        let picks_a: Vec<usize> = (0..20).map(|_| a.pick(7)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.pick(7)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn single_candidate_is_always_picked() {
        let mut source = SmallRngSource::seeded(0);
        assert_eq!(source.pick(1), 0);
    }
}
