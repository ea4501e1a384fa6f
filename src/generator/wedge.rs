//! Wedge enumeration
//!
//! Folds the quantized domain from both ends toward the center, emitting
//! `min`, `max`, `min + g`, `max - g`, ... until the midpoint value has been
//! emitted. The result is a full permutation of the domain in strictly
//! alternating extremes, useful when early draws should probe both ends of
//! a range.

use crate::domain::{Bounds, Domain};
use crate::error::{GeneratorError, Result};
use crate::generator::{Generator, Lifecycle, State};

/// Both-ends-inward full-period enumeration of a quantized range.
///
/// Finite: exhausts after the midpoint value is emitted.
pub struct WedgeGenerator<D> {
    bounds: Bounds<D>,
    /// Highest step index, fixed at init.
    steps: u64,
    /// `(low, high, low_turn)` cursor pair; `None` once folded shut.
    cursor: Option<(u64, u64, bool)>,
    lifecycle: Lifecycle,
}

impl<D: Domain> WedgeGenerator<D> {
    /// Create a wedge enumeration over `bounds`.
    pub fn new(bounds: Bounds<D>) -> Self {
        Self {
            bounds,
            steps: 0,
            cursor: None,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<D: Domain> Generator for WedgeGenerator<D> {
    type Item = D;

    fn init(&mut self) -> Result<()> {
        let steps = self.bounds.steps("wedge")?;
        if steps == u64::MAX {
            return Err(GeneratorError::DomainTooLarge { algorithm: "wedge" });
        }
        self.steps = steps;
        self.lifecycle.on_init();
        self.cursor = Some((0, steps, true));
        Ok(())
    }

    fn generate(&mut self) -> Option<D> {
        if !self.lifecycle.producing() {
            return None;
        }
        let (low, high, low_turn) = self.cursor?;
        let index = if low_turn { low } else { high };
        let value = self.bounds.nth(index);
        self.cursor = if low_turn {
            if low == high {
                // Midpoint emitted; the fold is complete.
                None
            } else {
                Some((low + 1, high, false))
            }
        } else if high <= low {
            // The high cursor met the already-emitted low side.
            None
        } else {
            Some((low, high - 1, true))
        };
        Some(value)
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        self.cursor = Some((0, self.steps, true));
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        self.cursor = None;
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::collect_all;

    fn wedge(min: i64, max: i64, granularity: i64) -> WedgeGenerator<i64> {
        let bounds = Bounds::new(min, max, granularity).unwrap();
        let mut gen = WedgeGenerator::new(bounds);
        gen.init().unwrap();
        gen
    }

    #[test]
    fn test_wedge_odd_count_order() {
        let mut gen = wedge(0, 4, 1);
        assert_eq!(collect_all(&mut gen), vec![0, 4, 1, 3, 2]);
        assert_eq!(gen.generate(), None);
    }

    #[test]
    fn test_wedge_even_count_order() {
        let mut gen = wedge(0, 5, 1);
        assert_eq!(collect_all(&mut gen), vec![0, 5, 1, 4, 2, 3]);
    }

    #[test]
    fn test_wedge_quantized_order() {
        let mut gen = wedge(10, 50, 10);
        assert_eq!(collect_all(&mut gen), vec![10, 50, 20, 40, 30]);
    }

    #[test]
    fn test_wedge_completeness() {
        let mut gen = wedge(-9, 9, 3);
        let mut values = collect_all(&mut gen);
        values.sort_unstable();
        assert_eq!(values, vec![-9, -6, -3, 0, 3, 6, 9]);
    }

    #[test]
    fn test_wedge_single_value_domain() {
        let mut gen = wedge(7, 7, 1);
        assert_eq!(collect_all(&mut gen), vec![7]);
    }

    #[test]
    fn test_wedge_two_value_domain() {
        let mut gen = wedge(0, 1, 1);
        assert_eq!(collect_all(&mut gen), vec![0, 1]);
    }

    #[test]
    fn test_wedge_reset_replays() {
        let mut gen = wedge(0, 10, 2);
        let first = collect_all(&mut gen);
        gen.reset();
        assert_eq!(collect_all(&mut gen), first);
    }

    #[test]
    fn test_wedge_zero_granularity_rejected() {
        let bounds = Bounds::new(0_i64, 10, 0).unwrap();
        let mut gen = WedgeGenerator::new(bounds);
        assert!(matches!(
            gen.init(),
            Err(GeneratorError::ZeroGranularity { .. })
        ));
    }

    #[test]
    fn test_wedge_marker_is_permanent() {
        let mut gen = wedge(0, 2, 1);
        collect_all(&mut gen);
        for _ in 0..5 {
            assert_eq!(gen.generate(), None);
        }
    }
}
