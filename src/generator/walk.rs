//! Bounded random walk
//!
//! Holds a current position in the quantized range and moves it by
//! increments drawn from a nested generator over
//! `[min_increment, max_increment]`. Every call returns the current
//! position, then advances and clamps it back into the range. The walk
//! never exhausts on its own.
//!
//! The starting position depends on where the increment range sits relative
//! to zero: entirely non-positive increments start at the highest grid
//! value, entirely non-negative ones at `min`, mixed ranges at the
//! midpoint. Increments are drawn on the granularity grid and the upper
//! clamp lands on the highest grid value, so every emitted position is a
//! granularity multiple of `min`.

use crate::domain::{Bounds, Domain};
use crate::error::{GeneratorError, Result};
use crate::generator::{BoxGenerator, Generator, Lifecycle, State};
use crate::random::RandomSource;

/// Clamped random walk through a quantized range.
///
/// Infinite: never returns the absent-value marker on its own.
pub struct RandomWalkGenerator<D> {
    bounds: Bounds<D>,
    min_increment: D,
    max_increment: D,
    /// Highest on-grid value; refined at init.
    grid_top: D,
    /// On-grid midpoint; refined at init.
    grid_mid: D,
    /// Owned nested increment source; `None` after close.
    increments: Option<BoxGenerator<D>>,
    current: Option<D>,
    lifecycle: Lifecycle,
}

impl<D: Domain> RandomWalkGenerator<D> {
    /// Create a walk with a uniform increment generator over
    /// `[min_increment, max_increment]`, drawn on the bounds' granularity
    /// grid.
    pub fn new<R: RandomSource + 'static>(
        bounds: Bounds<D>,
        min_increment: D,
        max_increment: D,
        rng: R,
    ) -> Self {
        let increments = crate::generator::random::uniform_grid_box(
            min_increment.clone(),
            max_increment.clone(),
            bounds.granularity().clone(),
            rng,
        );
        Self::with_increment_source(bounds, min_increment, max_increment, increments)
    }

    /// Create a walk drawing increments from an arbitrary uninitialized
    /// generator whose values lie in `[min_increment, max_increment]`.
    pub fn with_increment_source(
        bounds: Bounds<D>,
        min_increment: D,
        max_increment: D,
        increments: BoxGenerator<D>,
    ) -> Self {
        let grid_top = bounds.max().clone();
        let grid_mid = bounds.min().clone();
        Self {
            bounds,
            min_increment,
            max_increment,
            grid_top,
            grid_mid,
            increments: Some(increments),
            current: None,
            lifecycle: Lifecycle::new(),
        }
    }

    fn start(&self) -> D {
        if self.max_increment <= D::zero() {
            self.grid_top.clone()
        } else if self.min_increment >= D::zero() {
            self.bounds.min().clone()
        } else {
            self.grid_mid.clone()
        }
    }

    fn clamp(&self, value: D) -> D {
        if &value < self.bounds.min() {
            self.bounds.min().clone()
        } else if value > self.grid_top {
            self.grid_top.clone()
        } else {
            value
        }
    }
}

impl<D: Domain> Generator for RandomWalkGenerator<D> {
    type Item = D;

    fn init(&mut self) -> Result<()> {
        if self.min_increment > self.max_increment {
            return Err(GeneratorError::InvalidBounds {
                min: self.min_increment.to_string(),
                max: self.max_increment.to_string(),
            });
        }
        if self.bounds.granularity().is_zero() {
            // Continuous range: no grid to respect.
            self.grid_top = self.bounds.max().clone();
            self.grid_mid = unit_midpoint(self.bounds.min(), self.bounds.max());
        } else {
            let steps = self.bounds.steps("random-walk")?;
            self.grid_top = self.bounds.nth(steps);
            self.grid_mid = self.bounds.nth(steps / 2);
        }
        if let Some(increments) = self.increments.as_mut() {
            increments.init()?;
        }
        self.lifecycle.on_init();
        self.current = Some(self.start());
        Ok(())
    }

    fn generate(&mut self) -> Option<D> {
        if !self.lifecycle.producing() {
            return None;
        }
        let current = self.current.clone()?;
        let increments = self.increments.as_mut()?;
        if let Some(step) = increments.generate() {
            self.current = Some(self.clamp(current.clone() + step));
        }
        // An exhausted increment source freezes the walk in place.
        Some(current)
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        if let Some(increments) = self.increments.as_mut() {
            increments.reset();
        }
        self.current = Some(self.start());
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        if let Some(mut increments) = self.increments.take() {
            increments.close();
        }
        self.current = None;
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}

/// Midpoint of `[min, max]` on the unit grid, for continuous ranges.
fn unit_midpoint<D: Domain>(min: &D, max: &D) -> D {
    match D::steps_between(min, max, &D::one()) {
        Some(steps) => D::nth(min, steps / 2, &D::one()),
        None => min.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::step::StepGenerator;
    use crate::random::Pseudorandom;

    fn bounds(min: i64, max: i64, granularity: i64) -> Bounds<i64> {
        Bounds::new(min, max, granularity).unwrap()
    }

    #[test]
    fn test_walk_never_leaves_bounds() {
        let mut gen =
            RandomWalkGenerator::new(bounds(0, 100, 1), 1, 1, Pseudorandom::with_seed(42));
        gen.init().unwrap();
        for _ in 0..1000 {
            let v = gen.generate().unwrap();
            assert!((0..=100).contains(&v), "walk left bounds: {}", v);
        }
    }

    #[test]
    fn test_walk_stays_on_granularity_grid() {
        // Granularity 3 over 0..=100: positions must stay multiples of 3,
        // including after clamping at the unaligned upper bound.
        let mut gen =
            RandomWalkGenerator::new(bounds(0, 100, 3), 3, 24, Pseudorandom::with_seed(7));
        gen.init().unwrap();
        let mut saw_top = false;
        for _ in 0..500 {
            let v = gen.generate().unwrap();
            assert!((0..=100).contains(&v));
            assert_eq!(v % 3, 0, "walk left the granularity grid: {}", v);
            saw_top |= v == 99;
        }
        assert!(saw_top, "an ascending walk should reach the grid top");
    }

    #[test]
    fn test_walk_ascending_starts_at_min() {
        let mut gen =
            RandomWalkGenerator::new(bounds(10, 20, 1), 1, 3, Pseudorandom::with_seed(0));
        gen.init().unwrap();
        assert_eq!(gen.generate(), Some(10));
    }

    #[test]
    fn test_walk_descending_starts_at_max() {
        let mut gen =
            RandomWalkGenerator::new(bounds(10, 20, 1), -3, -1, Pseudorandom::with_seed(0));
        gen.init().unwrap();
        assert_eq!(gen.generate(), Some(20));
    }

    #[test]
    fn test_walk_descending_starts_on_grid_top() {
        // Max 10 is off the granularity-3 grid; the start snaps down to 9.
        let mut gen =
            RandomWalkGenerator::new(bounds(0, 10, 3), -3, -3, Pseudorandom::with_seed(0));
        gen.init().unwrap();
        assert_eq!(gen.generate(), Some(9));
        assert_eq!(gen.generate(), Some(6));
    }

    #[test]
    fn test_walk_mixed_starts_at_midpoint() {
        let mut gen =
            RandomWalkGenerator::new(bounds(0, 100, 1), -2, 2, Pseudorandom::with_seed(0));
        gen.init().unwrap();
        assert_eq!(gen.generate(), Some(50));
    }

    #[test]
    fn test_walk_unit_increment_ramps_and_saturates() {
        let mut gen =
            RandomWalkGenerator::new(bounds(0, 5, 1), 1, 1, Pseudorandom::with_seed(0));
        gen.init().unwrap();
        let values: Vec<i64> = (0..10).map(|_| gen.generate().unwrap()).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5, 5, 5, 5, 5]);
    }

    #[test]
    fn test_walk_custom_increment_source() {
        // Deterministic increments from a stepper: 1, 2 then exhausted.
        let increments = Box::new(StepGenerator::new(1_i64, 2, 1));
        let mut gen =
            RandomWalkGenerator::with_increment_source(bounds(0, 100, 1), 1, 2, increments);
        gen.init().unwrap();
        assert_eq!(gen.generate(), Some(0));
        assert_eq!(gen.generate(), Some(1));
        // Increment source drained; the walk holds position.
        assert_eq!(gen.generate(), Some(3));
        assert_eq!(gen.generate(), Some(3));
    }

    #[test]
    fn test_walk_reset_restarts() {
        let mut gen =
            RandomWalkGenerator::new(bounds(0, 50, 1), 1, 5, Pseudorandom::with_seed(9));
        gen.init().unwrap();
        let first = gen.generate().unwrap();
        for _ in 0..20 {
            gen.generate();
        }
        gen.reset();
        assert_eq!(gen.generate(), Some(first));
    }

    #[test]
    fn test_walk_inverted_increments_rejected() {
        let mut gen =
            RandomWalkGenerator::new(bounds(0, 10, 1), 5, 1, Pseudorandom::with_seed(0));
        assert!(gen.init().is_err());
    }

    #[test]
    fn test_walk_double_domain_clamps() {
        let bounds = Bounds::new(0.0_f64, 1.0, 0.5).unwrap();
        let mut gen = RandomWalkGenerator::new(bounds, 0.5, 0.5, Pseudorandom::with_seed(0));
        gen.init().unwrap();
        for _ in 0..10 {
            let v = gen.generate().unwrap();
            assert!((0.0..=1.0).contains(&v));
            assert_eq!((v / 0.5).fract(), 0.0);
        }
    }
}
