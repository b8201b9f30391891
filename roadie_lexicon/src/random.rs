//! Random choice - the single seam through which replies become non-deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Something that can pick an index out of a table.
pub trait RandomSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Pick one entry from a non-empty static table.
pub fn pick(source: &mut dyn RandomSource, items: &[&'static str]) -> &'static str {
    items[source.pick_index(items.len()) % items.len()]
}

/// Thread-local RNG, the default for live sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible RNG seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Always picks the same index (wrapped to the table length).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedChoice(pub usize);

impl RandomSource for FixedChoice {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0 % len
    }
}
