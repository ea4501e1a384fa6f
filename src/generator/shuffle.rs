//! Full-domain shuffle enumeration
//!
//! Visits every quantized value of `[min, max]` exactly once using a
//! fixed-stride walk over the step indices: start at index 0, keep adding
//! `stride`; when the next index would leave the domain, wrap to the start
//! of the next lane (`(index + 1) mod stride`). Once the wrap lands on
//! offset zero again the whole domain has been covered and the generator
//! exhausts.
//!
//! Lanes partition the index domain by residue mod `stride`, so this walk
//! is full-period for every positive stride; no coprimality condition is
//! needed. The output interleaves distant values, which spreads load when
//! the consumer has locality effects.

use crate::domain::{Bounds, Domain};
use crate::error::{GeneratorError, Result};
use crate::generator::{Generator, Lifecycle, State};

/// Fixed-stride full-period enumeration of a quantized range.
///
/// Finite: exhausts after emitting every domain value exactly once.
pub struct ShuffleGenerator<D> {
    bounds: Bounds<D>,
    stride: u64,
    /// Highest step index, fixed at init.
    steps: u64,
    /// Current step index; `None` once the walk has completed.
    cursor: Option<u64>,
    lifecycle: Lifecycle,
}

impl<D: Domain> ShuffleGenerator<D> {
    /// Create a shuffle over `bounds` advancing by `stride` granularity
    /// steps per draw.
    pub fn new(bounds: Bounds<D>, stride: u64) -> Self {
        Self {
            bounds,
            stride,
            steps: 0,
            cursor: None,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<D: Domain> Generator for ShuffleGenerator<D> {
    type Item = D;

    fn init(&mut self) -> Result<()> {
        if self.stride == 0 {
            return Err(GeneratorError::InvalidParameter {
                name: "stride",
                reason: "shuffle stride must be at least 1".to_string(),
            });
        }
        let steps = self.bounds.steps("shuffle")?;
        if steps == u64::MAX {
            return Err(GeneratorError::DomainTooLarge {
                algorithm: "shuffle",
            });
        }
        self.steps = steps;
        self.lifecycle.on_init();
        self.cursor = Some(0);
        Ok(())
    }

    fn generate(&mut self) -> Option<D> {
        if !self.lifecycle.producing() {
            return None;
        }
        let index = self.cursor?;
        let value = self.bounds.nth(index);
        self.cursor = match index.checked_add(self.stride).filter(|n| *n <= self.steps) {
            Some(next) => Some(next),
            None => {
                // Lane exhausted; wrap to the next residue. Offset zero
                // means every lane has been walked.
                let wrapped = (index + 1) % self.stride;
                if wrapped == 0 || wrapped > self.steps {
                    None
                } else {
                    Some(wrapped)
                }
            }
        };
        Some(value)
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        self.cursor = Some(0);
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        self.cursor = None;
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}
