//! Numeric domains and quantized bounds
//!
//! Every numeric algorithm in this crate is written once, generic over a
//! [`Domain`]: an ordered numeric kind that knows how to count and address
//! the quantization steps of a `(min, max, granularity)` range. Thin adapter
//! impls cover machine integers, floats and the arbitrary-precision kinds;
//! the algorithm bodies never special-case a concrete type.
//!
//! A quantized range admits exactly the values `min + k * granularity` for
//! `k = 0, 1, 2, ...` up to `max`. The enumeration algorithms (step, shuffle,
//! wedge, bit-reverse) walk `k` directly; the random algorithms draw `k`
//! uniformly.
//!
//! # Example
//!
//! ```
//! use genseq::domain::{Bounds, Domain};
//!
//! let bounds: Bounds<i64> = Bounds::new(0, 10, 2).unwrap();
//! assert_eq!(i64::steps_between(bounds.min(), bounds.max(), bounds.granularity()), Some(5));
//! assert_eq!(i64::nth(bounds.min(), 3, bounds.granularity()), 6);
//! ```

use std::fmt;
use std::ops::Add;

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

use crate::error::{GeneratorError, Result};
use crate::random::RandomSource;

/// Numeric kind usable by the generic generator algorithms.
///
/// Implementors supply the step arithmetic of a quantized range plus a
/// uniform draw; ordering, addition and the zero/one constants come from
/// the standard numeric traits.
pub trait Domain:
    Clone
    + PartialOrd
    + Add<Output = Self>
    + Zero
    + One
    + fmt::Debug
    + fmt::Display
    + Send
    + 'static
{
    /// Lossless-enough conversion from a machine integer, used to express
    /// type-independent descriptor parameters (strides, walk steps) in the
    /// concrete domain.
    fn from_i64(value: i64) -> Self;

    /// Natural lower bound used when a caller supplies no minimum.
    fn natural_min() -> Self;

    /// Natural upper bound used when a caller supplies no maximum.
    fn natural_max() -> Self;

    /// Number of whole granularity steps from `min` to `max`:
    /// `floor((max - min) / granularity)`.
    ///
    /// Returns `None` when the granularity is not positive or the count
    /// does not fit in a `u64`.
    fn steps_between(min: &Self, max: &Self, granularity: &Self) -> Option<u64>;

    /// The value `min + k * granularity`.
    fn nth(min: &Self, k: u64, granularity: &Self) -> Self;

    /// One uniform draw from the quantized range.
    ///
    /// `min == max` returns `min` without consuming randomness. A zero
    /// granularity means a continuous draw for real kinds and a unit step
    /// for integer kinds.
    fn uniform(min: &Self, max: &Self, granularity: &Self, rng: &mut dyn RandomSource) -> Self;
}

impl Domain for i32 {
    fn from_i64(value: i64) -> Self {
        value as i32
    }

    fn natural_min() -> Self {
        i32::MIN
    }

    fn natural_max() -> Self {
        i32::MAX
    }

    fn steps_between(min: &Self, max: &Self, granularity: &Self) -> Option<u64> {
        if *granularity <= 0 {
            return None;
        }
        Some(((*max as i64 - *min as i64) / *granularity as i64) as u64)
    }

    fn nth(min: &Self, k: u64, granularity: &Self) -> Self {
        (*min as i64 + k as i64 * *granularity as i64) as i32
    }

    fn uniform(min: &Self, max: &Self, granularity: &Self, rng: &mut dyn RandomSource) -> Self {
        if min == max {
            return *min;
        }
        let step = if *granularity == 0 { 1 } else { *granularity };
        let steps = Self::steps_between(min, max, &step).unwrap_or(0);
        let k = rng.below_u64(steps + 1);
        Self::nth(min, k, &step)
    }
}

impl Domain for i64 {
    fn from_i64(value: i64) -> Self {
        value
    }

    fn natural_min() -> Self {
        i64::MIN
    }

    fn natural_max() -> Self {
        i64::MAX
    }

    fn steps_between(min: &Self, max: &Self, granularity: &Self) -> Option<u64> {
        if *granularity <= 0 {
            return None;
        }
        let steps = (*max as i128 - *min as i128) / *granularity as i128;
        u64::try_from(steps).ok()
    }

    fn nth(min: &Self, k: u64, granularity: &Self) -> Self {
        (*min as i128 + k as i128 * *granularity as i128) as i64
    }

    fn uniform(min: &Self, max: &Self, granularity: &Self, rng: &mut dyn RandomSource) -> Self {
        if min == max {
            return *min;
        }
        let step = if *granularity == 0 { 1 } else { *granularity };
        match Self::steps_between(min, max, &step) {
            Some(steps) if steps < u64::MAX => {
                let k = rng.below_u64(steps + 1);
                Self::nth(min, k, &step)
            }
            // Full 64-bit span, only reachable with a unit step.
            _ => rng.long_range(*min, *max),
        }
    }
}

impl Domain for f64 {
    fn from_i64(value: i64) -> Self {
        value as f64
    }

    fn natural_min() -> Self {
        i64::MIN as f64
    }

    fn natural_max() -> Self {
        i64::MAX as f64
    }

    fn steps_between(min: &Self, max: &Self, granularity: &Self) -> Option<u64> {
        if *granularity <= 0.0 {
            return None;
        }
        let steps = ((max - min) / granularity).floor();
        if steps >= u64::MAX as f64 {
            return None;
        }
        Some(steps as u64)
    }

    fn nth(min: &Self, k: u64, granularity: &Self) -> Self {
        min + k as f64 * granularity
    }

    fn uniform(min: &Self, max: &Self, granularity: &Self, rng: &mut dyn RandomSource) -> Self {
        if min == max {
            return *min;
        }
        if *granularity == 0.0 {
            // Continuous draw over [min, max).
            return min + rng.probability() * (max - min);
        }
        match Self::steps_between(min, max, granularity) {
            Some(steps) => {
                let k = rng.below_u64(steps + 1);
                Self::nth(min, k, granularity)
            }
            // More steps than a u64 can count: draw continuously and snap
            // down to the grid.
            None => {
                let draw = min + rng.probability() * (max - min);
                let k = ((draw - min) / granularity).floor();
                min + k * granularity
            }
        }
    }
}

impl Domain for BigInt {
    fn from_i64(value: i64) -> Self {
        BigInt::from(value)
    }

    fn natural_min() -> Self {
        BigInt::from(i64::MIN)
    }

    fn natural_max() -> Self {
        BigInt::from(i64::MAX)
    }

    fn steps_between(min: &Self, max: &Self, granularity: &Self) -> Option<u64> {
        if granularity <= &BigInt::zero() {
            return None;
        }
        ((max - min) / granularity).to_u64()
    }

    fn nth(min: &Self, k: u64, granularity: &Self) -> Self {
        min + BigInt::from(k) * granularity
    }

    fn uniform(min: &Self, max: &Self, granularity: &Self, rng: &mut dyn RandomSource) -> Self {
        if min == max {
            return min.clone();
        }
        let step = if granularity.is_zero() {
            BigInt::one()
        } else {
            granularity.clone()
        };
        // Draw through the big-integer path so spans wider than u64 stay uniform.
        let range = (max - min) / &step;
        let k = rng.big_below(&(range + BigInt::one()));
        min + k * step
    }
}

impl Domain for BigDecimal {
    fn from_i64(value: i64) -> Self {
        BigDecimal::from(value)
    }

    fn natural_min() -> Self {
        BigDecimal::from(i64::MIN)
    }

    fn natural_max() -> Self {
        BigDecimal::from(i64::MAX)
    }

    fn steps_between(min: &Self, max: &Self, granularity: &Self) -> Option<u64> {
        if granularity <= &BigDecimal::zero() {
            return None;
        }
        ((max - min) / granularity)
            .with_scale_round(0, RoundingMode::Floor)
            .to_u64()
    }

    fn nth(min: &Self, k: u64, granularity: &Self) -> Self {
        min + BigDecimal::from(k) * granularity
    }

    fn uniform(min: &Self, max: &Self, granularity: &Self, rng: &mut dyn RandomSource) -> Self {
        if min == max {
            return min.clone();
        }
        if granularity.is_zero() {
            let p = BigDecimal::from_f64(rng.probability()).unwrap_or_else(BigDecimal::zero);
            return min + p * (max - min);
        }
        let steps = ((max - min) / granularity).with_scale_round(0, RoundingMode::Floor);
        let (range, _) = steps.as_bigint_and_exponent();
        let k = rng.big_below(&(range + BigInt::one()));
        min + BigDecimal::from(k) * granularity
    }
}

/// Immutable `(min, max, granularity)` configuration of a numeric generator.
///
/// Validated once at construction; generators keep their mutable cursor
/// state separate and never touch the bounds again.
#[derive(Debug, Clone)]
pub struct Bounds<D> {
    min: D,
    max: D,
    granularity: D,
}

impl<D: Domain> Bounds<D> {
    /// Create validated bounds.
    ///
    /// `min > max` and negative granularity are configuration errors.
    /// A zero granularity is accepted here; algorithms that quantize
    /// reject it at `init()`.
    pub fn new(min: D, max: D, granularity: D) -> Result<Self> {
        if min > max {
            return Err(GeneratorError::InvalidBounds {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        if granularity < D::zero() {
            return Err(GeneratorError::NegativeGranularity {
                granularity: granularity.to_string(),
            });
        }
        Ok(Self {
            min,
            max,
            granularity,
        })
    }

    /// Create bounds, defaulting missing pieces to the domain's natural
    /// range and a granularity of one.
    pub fn with_defaults(min: Option<D>, max: Option<D>, granularity: Option<D>) -> Result<Self> {
        Self::new(
            min.unwrap_or_else(D::natural_min),
            max.unwrap_or_else(D::natural_max),
            granularity.unwrap_or_else(D::one),
        )
    }

    /// Lower bound.
    pub fn min(&self) -> &D {
        &self.min
    }

    /// Upper bound.
    pub fn max(&self) -> &D {
        &self.max
    }

    /// Quantization step.
    pub fn granularity(&self) -> &D {
        &self.granularity
    }

    /// Reject a zero granularity on behalf of a quantizing algorithm.
    pub fn require_granularity(&self, algorithm: &'static str) -> Result<()> {
        if self.granularity.is_zero() {
            return Err(GeneratorError::ZeroGranularity { algorithm });
        }
        Ok(())
    }

    /// Step count for a full-domain enumeration, or a configuration error
    /// when the domain cannot be counted.
    pub fn steps(&self, algorithm: &'static str) -> Result<u64> {
        self.require_granularity(algorithm)?;
        D::steps_between(&self.min, &self.max, &self.granularity)
            .ok_or(GeneratorError::DomainTooLarge { algorithm })
    }

    /// The quantized value at step index `k`.
    pub fn nth(&self, k: u64) -> D {
        D::nth(&self.min, k, &self.granularity)
    }

    /// Whether `value` lies inside `[min, max]`.
    pub fn contains(&self, value: &D) -> bool {
        value >= &self.min && value <= &self.max
    }
}
