//! Deterministic arithmetic stepping
//!
//! Fixed-increment progression through `[min, max]`. Ascending increments
//! start at `min`, descending ones at `max`, and an explicit initial value
//! overrides either. The generator exhausts once advancing would cross the
//! far bound; an increment of exactly zero degenerates to an infinite
//! constant stream.
//!
//! Several higher-level algorithms reuse this as their enumeration
//! backbone (notably the unique-random factory path, which shuffles a step
//! enumeration through the bucket cache).

use crate::domain::Domain;
use crate::error::{GeneratorError, Result};
use crate::generator::{Generator, Lifecycle, State};

/// Fixed-increment progression through a bounded range.
pub struct StepGenerator<D> {
    min: D,
    max: D,
    increment: D,
    initial: Option<D>,
    /// `None` once the range is exhausted.
    cursor: Option<D>,
    lifecycle: Lifecycle,
}

impl<D: Domain> StepGenerator<D> {
    /// Create a stepper over `[min, max]` advancing by `increment`.
    pub fn new(min: D, max: D, increment: D) -> Self {
        Self {
            min,
            max,
            increment,
            initial: None,
            cursor: None,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Create a stepper with an explicit starting value.
    pub fn with_initial(min: D, max: D, increment: D, initial: D) -> Self {
        Self {
            initial: Some(initial),
            ..Self::new(min, max, increment)
        }
    }

    fn start(&self) -> D {
        match &self.initial {
            Some(initial) => initial.clone(),
            None if self.increment < D::zero() => self.max.clone(),
            None => self.min.clone(),
        }
    }
}

impl<D: Domain> Generator for StepGenerator<D> {
    type Item = D;

    fn init(&mut self) -> Result<()> {
        if self.min > self.max {
            return Err(GeneratorError::InvalidBounds {
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        if let Some(initial) = &self.initial {
            if initial < &self.min || initial > &self.max {
                return Err(GeneratorError::InvalidParameter {
                    name: "initial",
                    reason: format!(
                        "starting value {} outside [{}, {}]",
                        initial, self.min, self.max
                    ),
                });
            }
        }
        self.lifecycle.on_init();
        self.cursor = Some(self.start());
        Ok(())
    }

    fn generate(&mut self) -> Option<D> {
        if !self.lifecycle.producing() {
            return None;
        }
        let current = self.cursor.clone()?;
        if self.increment.is_zero() {
            // Constant stream; the cursor never moves.
            return Some(current);
        }
        let next = current.clone() + self.increment.clone();
        let crossed = if self.increment > D::zero() {
            next > self.max
        } else {
            next < self.min
        };
        self.cursor = if crossed { None } else { Some(next) };
        Some(current)
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        self.cursor = Some(self.start());
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        self.cursor = None;
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}
