//! genseq - pluggable value-sequence generators
//!
//! genseq is a library of value-sequence generators: algorithms that produce
//! streams of numbers (or, through proxies, arbitrary values) according to a
//! chosen distribution policy, plus a bucket-cache proxy that turns any
//! source of values into a memory-bounded, optionally-unique,
//! optionally-duplicating stream.
//!
//! # Architecture
//!
//! - **One lifecycle contract**: every generator moves through
//!   `init -> generate* -> reset*/close` (see [`generator`])
//! - **Generic algorithms**: each algorithm is written once over the
//!   [`domain::Domain`] trait and works for machine integers, floats and
//!   arbitrary-precision numbers alike
//! - **Full-period enumerations**: shuffle, wedge and bit-reverse visit
//!   every quantized value exactly once
//! - **Composable proxies**: head, repeat, skip and the bucket-cache
//!   expand proxy wrap any source generator
//! - **Injected randomness**: generators draw from a seedable
//!   [`random::RandomSource`], never from global state
//!
//! # Example
//!
//! ```
//! use genseq::domain::Bounds;
//! use genseq::random::Pseudorandom;
//! use genseq::sequence::{Sequence, Uniqueness};
//! use genseq::Generator;
//!
//! // 500 distinct values of 0, 5, 10, ..., 2495 in randomized order.
//! let bounds = Bounds::new(0_i64, 2495, 5).unwrap();
//! let mut gen = Sequence::Random
//!     .create(bounds, Uniqueness::Simple, Pseudorandom::with_seed(42))
//!     .unwrap();
//! let mut count = 0;
//! while let Some(v) = gen.generate() {
//!     assert!(v % 5 == 0 && (0..=2495).contains(&v));
//!     count += 1;
//! }
//! assert_eq!(count, 500);
//! ```

pub mod domain;
pub mod error;
pub mod generator;
pub mod proxy;
pub mod random;
pub mod sequence;

// Re-export commonly used types
pub use error::{GeneratorError, Result};
pub use generator::{BoxGenerator, Generator, State};
pub use sequence::{Sequence, Uniqueness};
