//! Error types for generator configuration
//!
//! All configuration errors surface synchronously during construction or
//! `init()`, never during production. A generator that failed to initialize
//! is unusable; callers must fix the parameters rather than retry.
//!
//! Exhaustion is *not* an error: a drained generator returns `None` from
//! `generate()`. Usage-sequence mistakes (calling `generate()` before
//! `init()`, calling `init()` twice) are programming errors and panic.

use thiserror::Error;

/// Configuration errors raised while building or initializing a generator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    /// Lower bound exceeds upper bound.
    #[error("invalid bounds: min {min} > max {max}")]
    InvalidBounds {
        /// Rendered lower bound.
        min: String,
        /// Rendered upper bound.
        max: String,
    },

    /// Zero granularity requested from an algorithm that quantizes.
    #[error("{algorithm} requires a non-zero granularity")]
    ZeroGranularity {
        /// Name of the rejecting algorithm.
        algorithm: &'static str,
    },

    /// Granularity below zero is never meaningful.
    #[error("granularity must not be negative, got {granularity}")]
    NegativeGranularity {
        /// Rendered granularity.
        granularity: String,
    },

    /// Uniqueness requested from an algorithm that structurally cannot
    /// provide it (e.g. the cumulated bell generator).
    #[error("{algorithm} cannot guarantee unique values")]
    UniquenessUnsupported {
        /// Name of the rejecting algorithm.
        algorithm: &'static str,
    },

    /// A full-domain enumeration was requested over a domain with more
    /// quantization steps than a u64 can count.
    #[error("{algorithm} cannot enumerate a domain with more than 2^64 steps")]
    DomainTooLarge {
        /// Name of the rejecting algorithm.
        algorithm: &'static str,
    },

    /// Catch-all for invalid scalar parameters (quotas, strides, weights).
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },
}

/// Result type used throughout genseq.
pub type Result<T> = std::result::Result<T, GeneratorError>;
