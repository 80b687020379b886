use std::collections::VecDeque;

use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_xoshiro::Xoshiro256StarStar;

/// Single pseudo-random stream shared by every stage of a batch.
///
/// Call order matters: the batch consumes draws in a fixed sequence, so swapping two calls changes
/// every record that follows.
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]` (inclusive).
    fn int_in(&mut self, lo: u32, hi: u32) -> u32;

    /// Random permutation of `0..len`.
    fn permutation(&mut self, len: usize) -> Vec<usize>;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Seedable production source backed by xoshiro256**.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: Xoshiro256StarStar,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_in(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut out: Vec<usize> = (0..len).collect();
        out.shuffle(&mut self.rng);
        out
    }

    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays fixed draws, for reproducing exact decision paths in tests.
///
/// Integer draws are clamped into the requested range; an exhausted script yields `lo`.
/// Permutations are the identity, and floats cycle through `units` (or `0.0` when empty).
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<u32>,
    units: Vec<f64>,
    unit_cursor: usize,
    drawn: usize,
}

impl ScriptedRandom {
    pub fn new(ints: impl IntoIterator<Item = u32>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units = units.into_iter().collect();
        self
    }

    /// Number of integer draws served so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Scripted integer draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.ints.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn int_in(&mut self, lo: u32, hi: u32) -> u32 {
        self.drawn += 1;
        self.ints
            .pop_front()
            .map(|v| v.clamp(lo, hi.max(lo)))
            .unwrap_or(lo)
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    fn unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let v = self.units[self.unit_cursor % self.units.len()];
        self.unit_cursor += 1;
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/random.rs"]
mod tests;
