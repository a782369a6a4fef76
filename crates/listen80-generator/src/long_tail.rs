//! Long-tail child-count sampler.
//!
//! Child counts (albums per artist, songs per album, playlists per user, ...)
//! are `floor(1 / p)` for a power-law variate `p` on `(0, 1]`, capped at the
//! caller's bound. Most draws land on 1 or 2, a few reach the cap.

use rand::Rng;

/// Default number of precomputed draws.
pub const DEFAULT_POOL_SIZE: usize = 10_000;

/// Cycles through a precomputed pool of power-law draws.
#[derive(Debug, Clone)]
pub struct LongTailSampler {
    draws: Vec<f64>,
    cursor: usize,
}

impl LongTailSampler {
    /// Precompute `pool_size` draws of `U^(1/exponent)`.
    ///
    /// `exponent` must be positive; `1.0` makes the variate uniform.
    pub fn new<R: Rng>(rng: &mut R, pool_size: usize, exponent: f64) -> Self {
        let draws = (0..pool_size.max(1))
            .map(|_| {
                let u: f64 = rng.random();
                u.powf(exponent.recip())
            })
            .collect();
        Self { draws, cursor: 0 }
    }

    /// Build a sampler from explicit draws. An empty list behaves as a
    /// single draw of 1.0.
    pub fn from_draws(draws: Vec<f64>) -> Self {
        let draws = if draws.is_empty() { vec![1.0] } else { draws };
        Self { draws, cursor: 0 }
    }

    /// Number of precomputed draws.
    pub fn pool_size(&self) -> usize {
        self.draws.len()
    }

    /// Next count in `1..=bound`, or 0 when `bound` is 0.
    pub fn sample(&mut self, bound: usize) -> usize {
        self.cursor += 1;
        if self.cursor >= self.draws.len() {
            self.cursor = 0;
        }
        if bound == 0 {
            return 0;
        }

        let p = self.draws[self.cursor];
        let inverse = p.recip();
        if !inverse.is_finite() || inverse >= bound as f64 {
            bound
        } else {
            (inverse as usize).clamp(1, bound)
        }
    }
}
