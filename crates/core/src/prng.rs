//! Injectable randomness for generation engines and transforms.
//!
//! Engines, variations, and the visibility safeguard all draw entropy through
//! the [`RandomSource`] trait instead of an ambient global, so a seeded
//! [`Xorshift64`] makes a whole generation run reproducible while production
//! callers use [`Xorshift64::from_entropy`].

use serde::{Deserialize, Serialize};

/// A source of uniform random floats in [0, 1).
///
/// Object-safe: generation code takes `&mut dyn RandomSource`. The provided
/// helpers cover the ranges and choices engines actually need.
pub trait RandomSource {
    /// Returns a uniformly distributed f64 in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Returns a uniformly distributed f64 in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    fn next_usize(&mut self, max: usize) -> usize {
        assert!(max > 0, "next_usize requires max > 0");
        let v = (self.next_f64() * max as f64) as usize;
        v.min(max - 1)
    }

    /// Returns true with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Picks a uniformly random element of `items`.
///
/// # Panics
///
/// Panics if `items` is empty.
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    &items[rng.next_usize(items.len())]
}

/// Returns `val` offset by a uniform amount in [-amount/2, amount/2).
pub fn jitter(rng: &mut dyn RandomSource, val: f64, amount: f64) -> f64 {
    val + (rng.next_f64() * amount - amount / 2.0)
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17) for good statistical
/// properties across the full 64-bit state space. Seed of 0 is automatically
/// replaced with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0, which is a fixed point
    /// of the xorshift algorithm.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    ///
    /// If `seed` is 0, uses `0x5EED_DEAD_BEEF_CAFE` as a fallback to avoid
    /// the xorshift all-zeros fixed point.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Creates a PRNG seeded from wall-clock time and the process id.
    ///
    /// Not cryptographic; good enough to make two consecutive runs diverge.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(Self::FALLBACK_SEED);
        Self::new(nanos ^ (u64::from(std::process::id()) << 32))
    }

    /// Advances the state and returns the next 64-bit value.
    ///
    /// Implements xorshift64 with shifts (13, 7, 17).
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Xorshift64 {
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
