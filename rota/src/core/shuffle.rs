//! Randomness seam for the rotation engine.
//!
//! The draw is deterministic given a permutation; the only nondeterministic
//! input is supplied through [`Shuffle`]. Tests use scripted orders
//! (see `test_support::ScriptedShuffle`).

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::types::Player;

/// Source of uniformly random permutations.
pub trait Shuffle {
    /// Reorder `players` in place. Every permutation must be equally likely.
    fn permute(&mut self, players: &mut [Player]);
}

/// Fisher-Yates shuffle backed by a `StdRng`.
pub struct RandomShuffle {
    rng: StdRng,
}

impl RandomShuffle {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of permutations for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Shuffle for RandomShuffle {
    fn permute(&mut self, players: &mut [Player]) {
        players.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<Player> {
        ["Ana", "Ben", "Cem", "Dora", "Eli", "Fay"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut first = names();
        let mut second = names();
        RandomShuffle::seeded(7).permute(&mut first);
        RandomShuffle::seeded(7).permute(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut shuffled = names();
        RandomShuffle::seeded(42).permute(&mut shuffled);
        shuffled.sort();
        let mut expected = names();
        expected.sort();
        assert_eq!(shuffled, expected);
    }
}
