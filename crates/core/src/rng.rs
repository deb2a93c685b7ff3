//! RNG module - randomness sources for piece selection
//!
//! Piece selection is uniform over the seven templates (no bag). The source is
//! injected so tests and replays can pin the sequence:
//!
//! - [`SimpleRng`]: seeded LCG, the deterministic default
//! - [`ScriptedRng`]: replays a fixed list of indices, for tests

use std::fmt::Debug;

/// A source of uniform indices
pub trait RandomSource: Debug + Send {
    /// Return a value in `[0, bound)`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.next_range(bound as u32) as usize
    }
}

/// Cycles through a fixed list of indices (each reduced modulo the bound)
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    script: Vec<usize>,
    pos: usize,
}

impl ScriptedRng {
    /// # Panics
    ///
    /// Panics if `script` is empty.
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        let script = script.into();
        assert!(!script.is_empty(), "scripted rng needs at least one value");
        Self { script, pos: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn next_index(&mut self, bound: usize) -> usize {
        let value = self.script[self.pos % self.script.len()];
        self.pos += 1;
        value % bound
    }
}
