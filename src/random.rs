//! Pluggable random draw source
//!
//! Generators never talk to a global RNG. Each one receives a [`RandomSource`]
//! at construction, so two generators never contend on shared state and a
//! seeded source makes any run reproducible.
//!
//! The default implementation, [`Pseudorandom`], wraps xoshiro256++ which is
//! very fast and has good statistical properties. This matters since a draw
//! happens on every `generate()` call of the random-backed algorithms.
//!
//! # Example
//!
//! ```
//! use genseq::random::{Pseudorandom, RandomSource};
//!
//! let mut rng = Pseudorandom::with_seed(42);
//! let k = rng.index(10);
//! assert!(k < 10);
//! let p = rng.probability();
//! assert!((0.0..1.0).contains(&p));
//! ```

use num_bigint::{BigInt, RandBigInt};
use num_traits::Zero;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Uniform random draw capability injected into generators.
///
/// Implementations must be `Send` so generators can move between threads.
pub trait RandomSource: Send {
    /// Uniform index in `[0, n)`. `n` must be positive.
    fn index(&mut self, n: usize) -> usize;

    /// Uniform probability in `[0.0, 1.0)`.
    fn probability(&mut self) -> f64;

    /// Uniform integer in the inclusive range `[lo, hi]`.
    fn long_range(&mut self, lo: i64, hi: i64) -> i64;

    /// Uniform integer in `[0, n)`. `n` must be positive.
    fn below_u64(&mut self, n: u64) -> u64;

    /// Uniform big integer in `[0, n)`. `n` must be positive.
    fn big_below(&mut self, n: &BigInt) -> BigInt;
}

/// Default random source backed by xoshiro256++.
#[derive(Clone)]
pub struct Pseudorandom {
    rng: Xoshiro256PlusPlus,
}

impl Pseudorandom {
    /// Create a source seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Create a source with a specific seed.
    ///
    /// Useful for reproducible tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Default for Pseudorandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for Pseudorandom {
    fn index(&mut self, n: usize) -> usize {
        assert!(n > 0, "index() requires a positive upper bound");
        self.rng.gen_range(0..n)
    }

    fn probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn long_range(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "long_range() requires lo <= hi");
        self.rng.gen_range(lo..=hi)
    }

    fn below_u64(&mut self, n: u64) -> u64 {
        assert!(n > 0, "below_u64() requires a positive upper bound");
        self.rng.gen_range(0..n)
    }

    fn big_below(&mut self, n: &BigInt) -> BigInt {
        assert!(n > &BigInt::zero(), "big_below() requires a positive upper bound");
        self.rng.gen_bigint_range(&BigInt::zero(), n)
    }
}
