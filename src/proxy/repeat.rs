//! Element repetition proxy

use crate::error::{GeneratorError, Result};
use crate::generator::random::uniform_grid_box;
use crate::generator::{BoxGenerator, Generator, Lifecycle, State};
use crate::random::RandomSource;

/// Re-emits each source element `1 + r` times, with `r` drawn per element
/// from a nested count generator over `[min_repetitions, max_repetitions]`.
///
/// `min_repetitions = 0, max_repetitions = 0` degenerates to a plain
/// pass-through. Exhausts when the source does.
pub struct RepeatProxy<T> {
    source: BoxGenerator<T>,
    min_repetitions: i64,
    max_repetitions: i64,
    counts: Option<BoxGenerator<i64>>,
    /// Current element and how many more times to emit it.
    pending: Option<(T, u64)>,
    lifecycle: Lifecycle,
}

impl<T: Clone + Send + 'static> RepeatProxy<T> {
    /// Wrap `source` with uniformly drawn repetition counts.
    pub fn new<R: RandomSource + 'static>(
        source: BoxGenerator<T>,
        min_repetitions: i64,
        max_repetitions: i64,
        rng: R,
    ) -> Self {
        let counts = uniform_grid_box(min_repetitions, max_repetitions, 1, rng);
        Self {
            source,
            min_repetitions,
            max_repetitions,
            counts: Some(counts),
            pending: None,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Wrap `source` drawing repetition counts from an arbitrary
    /// uninitialized generator over `[min_repetitions, max_repetitions]`.
    pub fn with_count_source(
        source: BoxGenerator<T>,
        min_repetitions: i64,
        max_repetitions: i64,
        counts: BoxGenerator<i64>,
    ) -> Self {
        Self {
            source,
            min_repetitions,
            max_repetitions,
            counts: Some(counts),
            pending: None,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<T: Clone + Send + 'static> Generator for RepeatProxy<T> {
    type Item = T;

    fn init(&mut self) -> Result<()> {
        if self.min_repetitions < 0 {
            return Err(GeneratorError::InvalidParameter {
                name: "min_repetitions",
                reason: format!("repetition count {} is negative", self.min_repetitions),
            });
        }
        if self.min_repetitions > self.max_repetitions {
            return Err(GeneratorError::InvalidBounds {
                min: self.min_repetitions.to_string(),
                max: self.max_repetitions.to_string(),
            });
        }
        self.source.init()?;
        if let Some(counts) = self.counts.as_mut() {
            counts.init()?;
        }
        self.lifecycle.on_init();
        self.pending = None;
        Ok(())
    }

    fn generate(&mut self) -> Option<T> {
        if !self.lifecycle.producing() {
            return None;
        }
        if let Some((value, remaining)) = self.pending.take() {
            if remaining > 1 {
                self.pending = Some((value.clone(), remaining - 1));
            }
            return Some(value);
        }
        let value = self.source.generate()?;
        let repetitions = self
            .counts
            .as_mut()
            .and_then(|counts| counts.generate())
            .unwrap_or(0)
            .max(0) as u64;
        if repetitions > 0 {
            self.pending = Some((value.clone(), repetitions));
        }
        Some(value)
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        self.source.reset();
        if let Some(counts) = self.counts.as_mut() {
            counts.reset();
        }
        self.pending = None;
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        self.source.close();
        if let Some(mut counts) = self.counts.take() {
            counts.close();
        }
        self.pending = None;
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}
