//! Shuffle selection
//!
//! `next()` with shuffle enabled picks a uniformly random index, which may
//! be the current one. The randomness source is pluggable so playback
//! sequences can be reproduced.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of shuffle picks
pub trait ShuffleSource {
    /// Pick an index in `0..len` (`len` is always >= 1)
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random picks backed by `StdRng`
#[derive(Debug, Clone)]
pub struct RandomShuffle {
    rng: StdRng,
}

impl RandomShuffle {
    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl ShuffleSource for RandomShuffle {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed list of picks, cycling when exhausted
///
/// Picks are reduced modulo `len`.
#[derive(Debug, Clone)]
pub struct ScriptedShuffle {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedShuffle {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }
}

impl ShuffleSource for ScriptedShuffle {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        pick % len
    }
}
