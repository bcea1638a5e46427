//! Deterministic PRNG based on the Xorshift64 algorithm.
//!
//! Every random draw in the sketch (spawn positions, velocities, sizes,
//! lifespans, jitter directions) goes through one of these, so a run is
//! reproducible from its seed.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced
/// with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` for full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }

    /// Returns a unit vector with a uniformly distributed heading.
    pub fn next_unit_vec2(&mut self) -> DVec2 {
        let theta = self.next_f64() * TAU;
        DVec2::new(theta.cos(), theta.sin())
    }
}
