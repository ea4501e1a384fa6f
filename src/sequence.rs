//! Sequence descriptors and generator factories
//!
//! A [`Sequence`] is a stateless description of a distribution policy:
//! "random", "step", "shuffle" and so on. Given bounds and a uniqueness
//! requirement it builds a fresh numeric generator ([`Sequence::create`]),
//! or applies the same policy to an already-constructed generator of any
//! element type ([`Sequence::wrap`]), which is how record and entity
//! streams get randomized or thinned without being numeric at all.
//!
//! All cursor state lives in the generators a descriptor builds; the
//! descriptor itself can be freely shared, compared and (de)serialized by
//! an external configuration layer.
//!
//! # Example
//!
//! ```
//! use genseq::domain::Bounds;
//! use genseq::generator::collect_all;
//! use genseq::random::Pseudorandom;
//! use genseq::sequence::{Sequence, Uniqueness};
//!
//! let bounds = Bounds::new(0_i64, 10, 2).unwrap();
//! let mut gen = Sequence::Wedge
//!     .create(bounds, Uniqueness::None, Pseudorandom::with_seed(1))
//!     .unwrap();
//! assert_eq!(collect_all(gen.as_mut()), vec![0, 10, 2, 8, 4, 6]);
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{Bounds, Domain};
use crate::error::{GeneratorError, Result};
use crate::generator::bit_reverse::BitReverseGenerator;
use crate::generator::cumulated::CumulatedGenerator;
use crate::generator::literal::{LiteralGenerator, WeightedGenerator};
use crate::generator::random::RandomGenerator;
use crate::generator::shuffle::ShuffleGenerator;
use crate::generator::step::StepGenerator;
use crate::generator::walk::RandomWalkGenerator;
use crate::generator::wedge::WedgeGenerator;
use crate::generator::BoxGenerator;
use crate::proxy::expand::ExpandProxy;
use crate::proxy::repeat::RepeatProxy;
use crate::proxy::skip::SkipProxy;
use crate::random::Pseudorandom;

/// Default shuffle stride, in granularity steps.
pub const DEFAULT_SHUFFLE_STRIDE: u64 = 2;

/// How strongly the caller needs values to be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Uniqueness {
    /// Repetition is acceptable.
    None,
    /// Every produced value must be distinct; order is free.
    Simple,
    /// Every produced value must be distinct and delivery order must stay
    /// deterministic.
    Ordered,
}

impl Uniqueness {
    /// Whether any form of uniqueness is required.
    pub fn required(&self) -> bool {
        !matches!(self, Uniqueness::None)
    }
}

/// Stateless distribution policy descriptor.
///
/// Integer parameters are expressed in granularity steps so one descriptor
/// value works for every numeric domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Sequence {
    /// Independent uniform draws.
    Random,
    /// Deterministic progression by one granularity step per call.
    Step {
        /// Optional starting position, in granularity steps above `min`.
        #[serde(default)]
        initial_offset: Option<u64>,
    },
    /// Approximate bell curve from five averaged uniform draws.
    Cumulated,
    /// Clamped random walk with increments of `min_step..=max_step`
    /// granularity units.
    RandomWalk {
        /// Smallest walk increment, in granularity steps; may be negative.
        min_step: i64,
        /// Largest walk increment, in granularity steps.
        max_step: i64,
    },
    /// Full-period stride walk over the quantized domain.
    Shuffle {
        /// Lane stride in granularity steps; must be at least 1.
        stride: u64,
    },
    /// Both-ends-inward fold of the quantized domain.
    Wedge,
    /// Bit-reversal permutation of the quantized domain.
    BitReverse,
}

impl Sequence {
    fn name(&self) -> &'static str {
        match self {
            Sequence::Random => "random",
            Sequence::Step { .. } => "step",
            Sequence::Cumulated => "cumulated",
            Sequence::RandomWalk { .. } => "random-walk",
            Sequence::Shuffle { .. } => "shuffle",
            Sequence::Wedge => "wedge",
            Sequence::BitReverse => "bit-reverse",
        }
    }

    /// Build a numeric generator with this policy over `bounds`.
    ///
    /// Uniqueness resolution: the full-period enumerations are unique by
    /// construction; `Random` turns into a step enumeration shuffled
    /// through the bucket cache (unique, randomly ordered, memory-bounded);
    /// `Cumulated` and `RandomWalk` reject the request with a
    /// configuration error before any value is produced.
    pub fn create<D: Domain>(
        &self,
        bounds: Bounds<D>,
        uniqueness: Uniqueness,
        rng: Pseudorandom,
    ) -> Result<BoxGenerator<D>> {
        if uniqueness.required() {
            match self {
                Sequence::Cumulated | Sequence::RandomWalk { .. } => {
                    return Err(GeneratorError::UniquenessUnsupported {
                        algorithm: self.name(),
                    });
                }
                _ => {}
            }
        }
        let mut generator: BoxGenerator<D> = match self {
            Sequence::Random => match uniqueness {
                Uniqueness::None => Box::new(RandomGenerator::new(bounds, rng)),
                Uniqueness::Simple => {
                    // Unique random order: enumerate the domain and shuffle
                    // it through the bucket cache.
                    bounds.require_granularity(self.name())?;
                    let enumeration = Box::new(StepGenerator::new(
                        bounds.min().clone(),
                        bounds.max().clone(),
                        bounds.granularity().clone(),
                    ));
                    Box::new(ExpandProxy::new(enumeration, rng))
                }
                Uniqueness::Ordered => {
                    bounds.require_granularity(self.name())?;
                    Box::new(StepGenerator::new(
                        bounds.min().clone(),
                        bounds.max().clone(),
                        bounds.granularity().clone(),
                    ))
                }
            },
            Sequence::Step { initial_offset } => {
                bounds.require_granularity(self.name())?;
                match initial_offset {
                    Some(offset) => Box::new(StepGenerator::with_initial(
                        bounds.min().clone(),
                        bounds.max().clone(),
                        bounds.granularity().clone(),
                        bounds.nth(*offset),
                    )),
                    None => Box::new(StepGenerator::new(
                        bounds.min().clone(),
                        bounds.max().clone(),
                        bounds.granularity().clone(),
                    )),
                }
            }
            Sequence::Cumulated => Box::new(CumulatedGenerator::new(bounds, rng)),
            Sequence::RandomWalk { min_step, max_step } => {
                bounds.require_granularity(self.name())?;
                let granularity = bounds.granularity().clone();
                let min_increment = D::from_i64(*min_step) * granularity.clone();
                let max_increment = D::from_i64(*max_step) * granularity;
                Box::new(RandomWalkGenerator::new(
                    bounds,
                    min_increment,
                    max_increment,
                    rng,
                ))
            }
            Sequence::Shuffle { stride } => Box::new(ShuffleGenerator::new(bounds, *stride)),
            Sequence::Wedge => Box::new(WedgeGenerator::new(bounds)),
            Sequence::BitReverse => Box::new(BitReverseGenerator::new(bounds)),
        };
        generator.init()?;
        Ok(generator)
    }

    /// Apply this policy to an already-constructed, uninitialized source
    /// generator of arbitrary element type.
    ///
    /// `Step` and ordered uniqueness keep the source order (a pass-through
    /// stride proxy); every other combination routes the stream through
    /// the bucket cache for randomized delivery, with a zero duplication
    /// quota whenever uniqueness is required.
    pub fn wrap<T: Clone + Send + 'static>(
        &self,
        source: BoxGenerator<T>,
        uniqueness: Uniqueness,
        rng: Pseudorandom,
    ) -> Result<BoxGenerator<T>> {
        let mut generator: BoxGenerator<T> = match (self, uniqueness) {
            (Sequence::Step { .. }, _) | (_, Uniqueness::Ordered) => {
                Box::new(SkipProxy::with_fixed_stride(source, 1))
            }
            _ => Box::new(ExpandProxy::new(source, rng)),
        };
        generator.init()?;
        Ok(generator)
    }
}

/// Ordered one-pass replay of pre-tokenized literal values.
pub fn literal<T: Clone + Send + 'static>(values: Vec<T>) -> Result<BoxGenerator<T>> {
    let mut generator: BoxGenerator<T> = Box::new(LiteralGenerator::new(values));
    generator.init()?;
    Ok(generator)
}

/// Weighted random sampling with replacement over `(value, weight)` pairs.
pub fn weighted<T: Clone + Send + 'static>(
    pairs: Vec<(T, f64)>,
    rng: Pseudorandom,
) -> Result<BoxGenerator<T>> {
    let mut generator: BoxGenerator<T> = Box::new(WeightedGenerator::new(pairs, rng));
    generator.init()?;
    Ok(generator)
}

/// Element repetition: each source element re-emitted `1 + r` times, with
/// `r` drawn uniformly from `[min_repetitions, max_repetitions]`.
///
/// A positive minimum guarantees duplicates, so combining it with any
/// uniqueness requirement is a configuration error.
pub fn repeat<T: Clone + Send + 'static>(
    source: BoxGenerator<T>,
    min_repetitions: i64,
    max_repetitions: i64,
    uniqueness: Uniqueness,
    rng: Pseudorandom,
) -> Result<BoxGenerator<T>> {
    if uniqueness.required() && min_repetitions > 0 {
        return Err(GeneratorError::UniquenessUnsupported { algorithm: "repeat" });
    }
    let mut generator: BoxGenerator<T> = Box::new(RepeatProxy::new(
        source,
        min_repetitions,
        max_repetitions,
        rng,
    ));
    generator.init()?;
    Ok(generator)
}

/// Unique sampling without replacement: every literal value exactly once,
/// in randomized order.
pub fn unique_literal<T: Clone + Send + 'static>(
    values: Vec<T>,
    rng: Pseudorandom,
) -> Result<BoxGenerator<T>> {
    let source = Box::new(LiteralGenerator::new(values));
    let mut generator: BoxGenerator<T> = Box::new(ExpandProxy::new(source, rng));
    generator.init()?;
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::collect_all;
    use std::collections::HashSet;

    fn bounds(min: i64, max: i64, granularity: i64) -> Bounds<i64> {
        Bounds::new(min, max, granularity).unwrap()
    }

    #[test]
    fn test_create_random_respects_bounds() {
        let mut gen = Sequence::Random
            .create(bounds(0, 100, 5), Uniqueness::None, Pseudorandom::with_seed(1))
            .unwrap();
        for _ in 0..200 {
            let v = gen.generate().unwrap();
            assert!((0..=100).contains(&v) && v % 5 == 0);
        }
    }

    #[test]
    fn test_create_unique_random_is_complete_permutation() {
        let mut gen = Sequence::Random
            .create(bounds(0, 499, 1), Uniqueness::Simple, Pseudorandom::with_seed(42))
            .unwrap();
        let values = collect_all(gen.as_mut());
        assert_eq!(values.len(), 500);
        let distinct: HashSet<i64> = values.iter().copied().collect();
        assert_eq!(distinct.len(), 500);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_ne!(values, sorted, "unique random should not be ordered");
    }

    #[test]
    fn test_create_ordered_unique_random_is_enumeration() {
        let mut gen = Sequence::Random
            .create(bounds(0, 8, 2), Uniqueness::Ordered, Pseudorandom::with_seed(0))
            .unwrap();
        assert_eq!(collect_all(gen.as_mut()), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_create_step() {
        let mut gen = Sequence::Step { initial_offset: None }
            .create(bounds(0, 10, 2), Uniqueness::None, Pseudorandom::with_seed(0))
            .unwrap();
        assert_eq!(collect_all(gen.as_mut()), vec![0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_create_step_with_initial_offset() {
        let mut gen = Sequence::Step { initial_offset: Some(2) }
            .create(bounds(0, 10, 2), Uniqueness::None, Pseudorandom::with_seed(0))
            .unwrap();
        assert_eq!(collect_all(gen.as_mut()), vec![4, 6, 8, 10]);
    }

    #[test]
    fn test_create_step_offset_outside_domain_rejected() {
        let err = Sequence::Step { initial_offset: Some(9) }
            .create(bounds(0, 10, 2), Uniqueness::None, Pseudorandom::with_seed(0))
            .err()
            .unwrap();
        assert!(matches!(err, GeneratorError::InvalidParameter { name: "initial", .. }));
    }

    #[test]
    fn test_create_random_double_default_bounds_varies() {
        // The full default f64 range spans more steps than a u64 counts;
        // draws must still vary and stay in range.
        let bounds = Bounds::<f64>::with_defaults(None, None, None).unwrap();
        let mut gen = Sequence::Random
            .create(bounds, Uniqueness::None, Pseudorandom::with_seed(3))
            .unwrap();
        let values: Vec<f64> = (0..20).map(|_| gen.generate().unwrap()).collect();
        let distinct: HashSet<u64> = values.iter().map(|v| v.to_bits()).collect();
        assert!(distinct.len() > 1, "default-bounds draws collapsed to a constant");
    }

    #[test]
    fn test_create_cumulated_rejects_uniqueness() {
        let err = Sequence::Cumulated
            .create(bounds(0, 10, 1), Uniqueness::Simple, Pseudorandom::with_seed(0))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            GeneratorError::UniquenessUnsupported { algorithm: "cumulated" }
        ));
    }

    #[test]
    fn test_create_walk_rejects_uniqueness() {
        let err = Sequence::RandomWalk { min_step: 1, max_step: 2 }
            .create(bounds(0, 10, 1), Uniqueness::Simple, Pseudorandom::with_seed(0))
            .err()
            .unwrap();
        assert!(matches!(err, GeneratorError::UniquenessUnsupported { .. }));
    }

    #[test]
    fn test_create_walk_scales_steps_by_granularity() {
        let mut gen = Sequence::RandomWalk { min_step: 1, max_step: 1 }
            .create(bounds(0, 100, 10), Uniqueness::None, Pseudorandom::with_seed(0))
            .unwrap();
        let values: Vec<i64> = (0..5).map(|_| gen.generate().unwrap()).collect();
        assert_eq!(values, vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_create_walk_stays_on_granularity_grid() {
        let mut gen = Sequence::RandomWalk { min_step: 1, max_step: 8 }
            .create(bounds(0, 100, 3), Uniqueness::None, Pseudorandom::with_seed(17))
            .unwrap();
        for _ in 0..500 {
            let v = gen.generate().unwrap();
            assert!((0..=100).contains(&v));
            assert_eq!(v % 3, 0, "walk value {} left the granularity grid", v);
        }
    }

    #[test]
    fn test_create_enumerations_accept_uniqueness() {
        for sequence in [
            Sequence::Shuffle { stride: DEFAULT_SHUFFLE_STRIDE },
            Sequence::Wedge,
            Sequence::BitReverse,
        ] {
            let mut gen = sequence
                .create(bounds(0, 20, 1), Uniqueness::Simple, Pseudorandom::with_seed(4))
                .unwrap();
            let mut values = collect_all(gen.as_mut());
            values.sort_unstable();
            assert_eq!(values, (0..=20).collect::<Vec<i64>>(), "{:?}", sequence);
        }
    }

    #[test]
    fn test_create_bigint_random() {
        use num_bigint::BigInt;
        let bounds =
            Bounds::new(BigInt::from(0), BigInt::from(1000), BigInt::from(10)).unwrap();
        let mut gen = Sequence::Random
            .create(bounds, Uniqueness::None, Pseudorandom::with_seed(8))
            .unwrap();
        for _ in 0..50 {
            let v = gen.generate().unwrap();
            assert!(v >= BigInt::from(0) && v <= BigInt::from(1000));
        }
    }

    #[test]
    fn test_wrap_random_preserves_elements() {
        let source: BoxGenerator<i64> =
            Box::new(LiteralGenerator::new((0..250).collect::<Vec<i64>>()));
        let mut gen = Sequence::Random
            .wrap(source, Uniqueness::Simple, Pseudorandom::with_seed(6))
            .unwrap();
        let values = collect_all(gen.as_mut());
        let distinct: HashSet<i64> = values.iter().copied().collect();
        assert_eq!(values.len(), 250);
        assert_eq!(distinct.len(), 250);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_ne!(values, sorted, "expand wrap should mix the order");
    }

    #[test]
    fn test_wrap_step_keeps_order() {
        let source: BoxGenerator<&str> =
            Box::new(LiteralGenerator::new(vec!["a", "b", "c"]));
        let mut gen = Sequence::Step { initial_offset: None }
            .wrap(source, Uniqueness::None, Pseudorandom::with_seed(0))
            .unwrap();
        assert_eq!(collect_all(gen.as_mut()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_repeat_factory_rejects_unique_positive_minimum() {
        let source: BoxGenerator<i64> = Box::new(LiteralGenerator::new(vec![1, 2, 3]));
        let err = repeat(source, 1, 3, Uniqueness::Simple, Pseudorandom::with_seed(0))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            GeneratorError::UniquenessUnsupported { algorithm: "repeat" }
        ));
    }

    #[test]
    fn test_repeat_factory_zero_minimum_allows_uniqueness() {
        let source: BoxGenerator<i64> = Box::new(LiteralGenerator::new(vec![1, 2, 3]));
        let mut gen =
            repeat(source, 0, 0, Uniqueness::Simple, Pseudorandom::with_seed(0)).unwrap();
        assert_eq!(collect_all(gen.as_mut()), vec![1, 2, 3]);
    }

    #[test]
    fn test_repeat_factory_repeats_elements() {
        let source: BoxGenerator<i64> = Box::new(LiteralGenerator::new(vec![7, 8]));
        let mut gen =
            repeat(source, 2, 2, Uniqueness::None, Pseudorandom::with_seed(0)).unwrap();
        assert_eq!(collect_all(gen.as_mut()), vec![7, 7, 7, 8, 8, 8]);
    }

    #[test]
    fn test_unique_literal_emits_each_once() {
        let mut gen =
            unique_literal(vec![10, 20, 30, 40, 50], Pseudorandom::with_seed(2)).unwrap();
        let mut values = collect_all(gen.as_mut());
        values.sort_unstable();
        assert_eq!(values, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_weighted_factory() {
        let mut gen = weighted(
            vec![("hot", 9.0), ("cold", 1.0)],
            Pseudorandom::with_seed(5),
        )
        .unwrap();
        let mut hot = 0;
        for _ in 0..1000 {
            if gen.generate() == Some("hot") {
                hot += 1;
            }
        }
        assert!(hot > 800, "hot share {} should dominate", hot);
    }

    #[test]
    fn test_descriptor_deserializes_from_json() {
        let sequence: Sequence =
            serde_json::from_str(r#"{ "name": "shuffle", "stride": 3 }"#).unwrap();
        assert_eq!(sequence, Sequence::Shuffle { stride: 3 });

        let sequence: Sequence = serde_json::from_str(r#"{ "name": "random" }"#).unwrap();
        assert_eq!(sequence, Sequence::Random);

        let sequence: Sequence = serde_json::from_str(r#"{ "name": "step" }"#).unwrap();
        assert_eq!(sequence, Sequence::Step { initial_offset: None });

        let sequence: Sequence =
            serde_json::from_str(r#"{ "name": "step", "initial_offset": 3 }"#).unwrap();
        assert_eq!(sequence, Sequence::Step { initial_offset: Some(3) });

        let uniqueness: Uniqueness = serde_json::from_str(r#""simple""#).unwrap();
        assert_eq!(uniqueness, Uniqueness::Simple);
    }

    #[test]
    fn test_descriptor_is_stateless() {
        // Two generators from one descriptor advance independently.
        let sequence = Sequence::Step { initial_offset: None };
        let mut a = sequence
            .create(bounds(0, 4, 1), Uniqueness::None, Pseudorandom::with_seed(0))
            .unwrap();
        let mut b = sequence
            .create(bounds(0, 4, 1), Uniqueness::None, Pseudorandom::with_seed(0))
            .unwrap();
        assert_eq!(a.generate(), Some(0));
        assert_eq!(a.generate(), Some(1));
        assert_eq!(b.generate(), Some(0));
    }
}
