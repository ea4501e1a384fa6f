//! Cumulated (approximate bell) generator
//!
//! Averages five independent uniform draws over the quantized range and
//! re-quantizes the mean to the nearest granularity step. Five samples of
//! an Irwin-Hall sum are a cheap approximation to a normal distribution
//! centered on the middle of the range.
//!
//! Averaging collapses distinct inputs onto shared outputs, so this
//! algorithm structurally cannot provide uniqueness; the factory rejects a
//! uniqueness request for it with a configuration error.

use crate::domain::{Bounds, Domain};
use crate::error::{GeneratorError, Result};
use crate::generator::{Generator, Lifecycle, State};
use crate::random::RandomSource;

const SAMPLES: u32 = 5;

/// Bell-shaped draws centered on the midpoint of a quantized range.
///
/// Infinite: never returns the absent-value marker on its own.
pub struct CumulatedGenerator<D, R = crate::random::Pseudorandom> {
    bounds: Bounds<D>,
    rng: R,
    /// Step count of the domain, fixed at init.
    steps: u64,
    lifecycle: Lifecycle,
}

impl<D: Domain, R: RandomSource> CumulatedGenerator<D, R> {
    /// Create an uninitialized generator over `bounds`.
    pub fn new(bounds: Bounds<D>, rng: R) -> Self {
        Self {
            bounds,
            rng,
            steps: 0,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<D: Domain, R: RandomSource> Generator for CumulatedGenerator<D, R> {
    type Item = D;

    fn init(&mut self) -> Result<()> {
        let steps = self.bounds.steps("cumulated")?;
        if steps == u64::MAX {
            return Err(GeneratorError::DomainTooLarge {
                algorithm: "cumulated",
            });
        }
        self.steps = steps;
        self.lifecycle.on_init();
        Ok(())
    }

    fn generate(&mut self) -> Option<D> {
        if !self.lifecycle.producing() {
            return None;
        }
        if self.steps == 0 {
            return Some(self.bounds.min().clone());
        }
        // Average five uniform step indices, rounding half up; the result
        // is automatically on the granularity grid.
        let mut sum: u128 = 0;
        for _ in 0..SAMPLES {
            sum += self.rng.below_u64(self.steps + 1) as u128;
        }
        let k = ((2 * sum + SAMPLES as u128) / (2 * SAMPLES as u128)) as u64;
        Some(self.bounds.nth(k))
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}
