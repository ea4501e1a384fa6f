//! Finite literal and weighted sequences
//!
//! Replays value lists that an external expression parser has already
//! tokenized (syntax like `"1^3,2^7"` is not this crate's business; it
//! receives plain `(value, weight)` pairs).
//!
//! Two playback modes live here: strict order-once replay and weighted
//! random sampling with replacement. The third mode of the contract,
//! unique sampling without replacement, is the bucket-cache proxy wrapped
//! around a [`LiteralGenerator`]; see `sequence::unique_literal`.

use crate::error::{GeneratorError, Result};
use crate::generator::{Generator, Lifecycle, State};
use crate::random::RandomSource;

/// Ordered one-pass replay of a literal value list.
///
/// Finite: exhausts after the last element.
pub struct LiteralGenerator<T> {
    values: Vec<T>,
    cursor: usize,
    lifecycle: Lifecycle,
}

impl<T: Clone + Send + 'static> LiteralGenerator<T> {
    /// Create a replay of `values` in order. An empty list is legal and
    /// exhausts immediately.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            cursor: 0,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<T: Clone + Send + 'static> Generator for LiteralGenerator<T> {
    type Item = T;

    fn init(&mut self) -> Result<()> {
        self.lifecycle.on_init();
        self.cursor = 0;
        Ok(())
    }

    fn generate(&mut self) -> Option<T> {
        if !self.lifecycle.producing() {
            return None;
        }
        let value = self.values.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(value)
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        self.cursor = 0;
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        self.values.clear();
        self.cursor = 0;
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}

/// Weighted random sampling with replacement from a literal list.
///
/// Each call picks one value with probability proportional to its weight.
/// Infinite: never returns the absent-value marker on its own.
pub struct WeightedGenerator<T, R = crate::random::Pseudorandom> {
    values: Vec<(T, f64)>,
    /// Running weight totals, parallel to `values`; built at init.
    cumulative: Vec<f64>,
    total: f64,
    rng: R,
    lifecycle: Lifecycle,
}

impl<T: Clone + Send + 'static, R: RandomSource> WeightedGenerator<T, R> {
    /// Create a sampler over `(value, weight)` pairs.
    pub fn new(values: Vec<(T, f64)>, rng: R) -> Self {
        Self {
            values,
            cumulative: Vec::new(),
            total: 0.0,
            rng,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<T: Clone + Send + 'static, R: RandomSource> Generator for WeightedGenerator<T, R> {
    type Item = T;

    fn init(&mut self) -> Result<()> {
        if self.values.is_empty() {
            return Err(GeneratorError::InvalidParameter {
                name: "values",
                reason: "weighted sampling needs at least one value".to_string(),
            });
        }
        let mut running = 0.0;
        self.cumulative.clear();
        for (i, (_, weight)) in self.values.iter().enumerate() {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(GeneratorError::InvalidParameter {
                    name: "weight",
                    reason: format!("weight {} at position {} is not usable", weight, i),
                });
            }
            running += weight;
            self.cumulative.push(running);
        }
        if running <= 0.0 {
            return Err(GeneratorError::InvalidParameter {
                name: "weight",
                reason: "weights must sum to a positive total".to_string(),
            });
        }
        self.total = running;
        self.lifecycle.on_init();
        Ok(())
    }

    fn generate(&mut self) -> Option<T> {
        if !self.lifecycle.producing() {
            return None;
        }
        let ticket = self.rng.probability() * self.total;
        let slot = self
            .cumulative
            .partition_point(|limit| *limit <= ticket)
            .min(self.values.len() - 1);
        Some(self.values[slot].0.clone())
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        self.values.clear();
        self.cumulative.clear();
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}
