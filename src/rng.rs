//! Injectable random number capability.
//!
//! The engine never reads from a global random source. Every call that needs
//! randomness receives a [`TurnRng`], which is either seeded (replayable) or
//! the fixed mid-point source used for deterministic cost estimates. All
//! helpers consume exactly one uniform draw per call so that replays from the
//! same seed visit the stream in the same documented order.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Random number capability handed to the turn pipeline.
///
/// Construct with [`TurnRng::seeded`] for normal play or [`TurnRng::midrand`]
/// for the fixed 0.5 source the contract engine uses when estimating ship
/// commission costs.
#[derive(Debug)]
pub enum TurnRng {
    /// Replayable generator seeded from a `u64`
    Seeded(StdRng),
    /// Always yields 0.5; used for deterministic estimates
    Mid,
}

impl TurnRng {
    /// Creates a seeded, replayable random source.
    pub fn seeded(seed: u64) -> Self {
        TurnRng::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Creates the fixed mid-point source (every draw is exactly 0.5).
    pub fn midrand() -> Self {
        TurnRng::Mid
    }

    /// Returns a uniform draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        match self {
            TurnRng::Seeded(rng) => rng.random::<f64>(),
            TurnRng::Mid => 0.5,
        }
    }

    /// Returns a uniform integer in `[min, max]` (inclusive), one draw.
    pub fn roll_range(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max);
        let span = (max - min + 1) as f64;
        let picked = min + (self.next_f64() * span) as u32;
        picked.min(max)
    }

    /// Returns 0 or 1 with equal probability, one draw.
    ///
    /// Draws below 0.5 map to 0, so the mid-point source always yields 1.
    pub fn coin(&mut self) -> u32 {
        if self.next_f64() < 0.5 {
            0
        } else {
            1
        }
    }

    /// Returns true with probability `percent / 100`, one draw.
    ///
    /// Percentages at or above 100 always succeed; at or below 0 never do.
    pub fn chance(&mut self, percent: f64) -> bool {
        self.next_f64() * 100.0 < percent
    }

    /// Returns a uniform multiplier in `[lo, hi)`, one draw.
    pub fn uniform_mult(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Picks an index weighted by the given non-negative weights, one draw.
    ///
    /// Returns `None` when the weights are empty or sum to zero. The scan is
    /// a cumulative walk in slice order, so callers control the visitation
    /// order and replays stay byte-identical.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if weights.is_empty() || total <= 0.0 {
            return None;
        }
        let mut roll = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if *w <= 0.0 {
                continue;
            }
            if roll < *w {
                return Some(i);
            }
            roll -= *w;
        }
        // Floating point residue lands on the last positive weight.
        weights.iter().rposition(|w| *w > 0.0)
    }
}
