//! Uniform random generator
//!
//! Independent uniform draws from a quantized range. This is the default
//! numeric distribution and the building block the cumulated and random-walk
//! generators draw through.
//!
//! Each call is stateless with respect to the previous one, so this
//! generator can never guarantee uniqueness by itself; callers that need
//! unique values go through the bucket-cache proxy instead.
//!
//! # Example
//!
//! ```
//! use genseq::domain::Bounds;
//! use genseq::generator::random::RandomGenerator;
//! use genseq::generator::Generator;
//! use genseq::random::Pseudorandom;
//!
//! let bounds = Bounds::new(0_i64, 100, 5).unwrap();
//! let mut gen = RandomGenerator::new(bounds, Pseudorandom::with_seed(42));
//! gen.init().unwrap();
//! let v = gen.generate().unwrap();
//! assert!((0..=100).contains(&v) && v % 5 == 0);
//! ```

use crate::domain::{Bounds, Domain};
use crate::error::{GeneratorError, Result};
use crate::generator::{BoxGenerator, Generator, Lifecycle, State};
use crate::random::RandomSource;

/// Uniform random draws over a quantized `(min, max, granularity)` range.
///
/// Infinite: never returns the absent-value marker on its own.
pub struct RandomGenerator<D, R = crate::random::Pseudorandom> {
    bounds: Bounds<D>,
    rng: R,
    lifecycle: Lifecycle,
}

impl<D: Domain, R: RandomSource> RandomGenerator<D, R> {
    /// Create an uninitialized generator over `bounds`.
    pub fn new(bounds: Bounds<D>, rng: R) -> Self {
        Self {
            bounds,
            rng,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<D: Domain, R: RandomSource> Generator for RandomGenerator<D, R> {
    type Item = D;

    fn init(&mut self) -> Result<()> {
        // A zero granularity is legal here: it means a continuous draw for
        // real domains and a unit step for integer ones.
        self.lifecycle.on_init();
        Ok(())
    }

    fn generate(&mut self) -> Option<D> {
        if !self.lifecycle.producing() {
            return None;
        }
        Some(D::uniform(
            self.bounds.min(),
            self.bounds.max(),
            self.bounds.granularity(),
            &mut self.rng,
        ))
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

/// Boxed uniform generator over `[min, max]` quantized to `granularity`.
///
/// Bounds are validated at `init()` rather than at construction, so owners
/// (random walk, repeat and skip proxies) can embed one before their own
/// validation runs.
pub(crate) fn uniform_grid_box<D, R>(min: D, max: D, granularity: D, rng: R) -> BoxGenerator<D>
where
    D: Domain,
    R: RandomSource + 'static,
{
    Box::new(DeferredUniform {
        min,
        max,
        granularity,
        rng,
        lifecycle: Lifecycle::new(),
    })
}

struct DeferredUniform<D, R> {
    min: D,
    max: D,
    granularity: D,
    rng: R,
    lifecycle: Lifecycle,
}

impl<D: Domain, R: RandomSource> Generator for DeferredUniform<D, R> {
    type Item = D;

    fn init(&mut self) -> Result<()> {
        if self.min > self.max {
            return Err(GeneratorError::InvalidBounds {
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        self.lifecycle.on_init();
        Ok(())
    }

    fn generate(&mut self) -> Option<D> {
        if !self.lifecycle.producing() {
            return None;
        }
        Some(D::uniform(
            &self.min,
            &self.max,
            &self.granularity,
            &mut self.rng,
        ))
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
