//! Fixed- and variable-stride skipping proxy

use crate::error::{GeneratorError, Result};
use crate::generator::random::uniform_grid_box;
use crate::generator::{BoxGenerator, Generator, Lifecycle, State};
use crate::random::RandomSource;

/// Advances the source by a drawn stride per call, discarding intermediate
/// elements and returning the last one pulled.
///
/// A stride of 1 is a plain pass-through. Exhausts as soon as the source
/// runs dry mid-stride.
pub struct SkipProxy<T> {
    source: BoxGenerator<T>,
    min_stride: i64,
    max_stride: i64,
    strides: Option<BoxGenerator<i64>>,
    lifecycle: Lifecycle,
}

impl<T: Send + 'static> SkipProxy<T> {
    /// Wrap `source` with uniformly drawn strides in `[min_stride, max_stride]`.
    pub fn new<R: RandomSource + 'static>(
        source: BoxGenerator<T>,
        min_stride: i64,
        max_stride: i64,
        rng: R,
    ) -> Self {
        let strides = uniform_grid_box(min_stride, max_stride, 1, rng);
        Self {
            source,
            min_stride,
            max_stride,
            strides: Some(strides),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Wrap `source` with a fixed stride.
    pub fn with_fixed_stride(source: BoxGenerator<T>, stride: i64) -> Self {
        Self {
            source,
            min_stride: stride,
            max_stride: stride,
            strides: None,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Wrap `source` drawing strides from an arbitrary uninitialized
    /// generator over `[min_stride, max_stride]`.
    pub fn with_stride_source(
        source: BoxGenerator<T>,
        min_stride: i64,
        max_stride: i64,
        strides: BoxGenerator<i64>,
    ) -> Self {
        Self {
            source,
            min_stride,
            max_stride,
            strides: Some(strides),
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<T: Send + 'static> Generator for SkipProxy<T> {
    type Item = T;

    fn init(&mut self) -> Result<()> {
        if self.min_stride < 1 {
            return Err(GeneratorError::InvalidParameter {
                name: "min_stride",
                reason: format!("stride {} must be at least 1", self.min_stride),
            });
        }
        if self.min_stride > self.max_stride {
            return Err(GeneratorError::InvalidBounds {
                min: self.min_stride.to_string(),
                max: self.max_stride.to_string(),
            });
        }
        self.source.init()?;
        if let Some(strides) = self.strides.as_mut() {
            strides.init()?;
        }
        self.lifecycle.on_init();
        Ok(())
    }

    fn generate(&mut self) -> Option<T> {
        if !self.lifecycle.producing() {
            return None;
        }
        let stride = self
            .strides
            .as_mut()
            .and_then(|strides| strides.generate())
            .unwrap_or(self.min_stride)
            .max(1);
        let mut value = None;
        for _ in 0..stride {
            value = Some(self.source.generate()?);
        }
        value
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        self.source.reset();
        if let Some(strides) = self.strides.as_mut() {
            strides.reset();
        }
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        self.source.close();
        if let Some(mut strides) = self.strides.take() {
            strides.close();
        }
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::collect_all;
    use crate::generator::step::StepGenerator;
    use crate::random::Pseudorandom;

    #[test]
    fn test_skip_fixed_stride() {
        let source = Box::new(StepGenerator::new(1_i64, 10, 1));
        let mut gen = SkipProxy::with_fixed_stride(source, 3);
        gen.init().unwrap();
        assert_eq!(collect_all(&mut gen), vec![3, 6, 9]);
        assert_eq!(gen.generate(), None);
    }

    #[test]
    fn test_skip_stride_one_is_pass_through() {
        let source = Box::new(StepGenerator::new(1_i64, 5, 1));
        let mut gen = SkipProxy::with_fixed_stride(source, 1);
        gen.init().unwrap();
        assert_eq!(collect_all(&mut gen), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_skip_variable_stride_is_monotonic() {
        let source = Box::new(StepGenerator::new(0_i64, 1000, 1));
        let mut gen = SkipProxy::new(source, 1, 5, Pseudorandom::with_seed(42));
        gen.init().unwrap();
        let values = collect_all(&mut gen);
        assert!(values.windows(2).all(|w| {
            let gap = w[1] - w[0];
            (1..=5).contains(&gap)
        }));
    }

    #[test]
    fn test_skip_exhausts_mid_stride() {
        let source = Box::new(StepGenerator::new(1_i64, 4, 1));
        let mut gen = SkipProxy::with_fixed_stride(source, 3);
        gen.init().unwrap();
        assert_eq!(gen.generate(), Some(3));
        // Only 4 remains; the stride cannot complete.
        assert_eq!(gen.generate(), None);
    }

    #[test]
    fn test_skip_zero_stride_rejected() {
        let source = Box::new(StepGenerator::new(0_i64, 5, 1));
        let mut gen = SkipProxy::with_fixed_stride(source, 0);
        assert!(matches!(
            gen.init(),
            Err(GeneratorError::InvalidParameter { name: "min_stride", .. })
        ));
    }

    #[test]
    fn test_skip_reset_replays() {
        let source = Box::new(StepGenerator::new(1_i64, 10, 1));
        let mut gen = SkipProxy::with_fixed_stride(source, 2);
        gen.init().unwrap();
        assert_eq!(collect_all(&mut gen), vec![2, 4, 6, 8, 10]);
        gen.reset();
        assert_eq!(collect_all(&mut gen), vec![2, 4, 6, 8, 10]);
    }
}
