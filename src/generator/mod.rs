//! Generator contract and lifecycle
//!
//! Everything that produces values in this crate (algorithms and proxies
//! alike) implements the [`Generator`] trait and obeys one state machine:
//!
//! ```text
//! UNINITIALIZED --init()--> INITIALIZED --close()--> CLOSED
//!                               |  ^
//!                        generate()  reset()
//! ```
//!
//! - `init()` is callable exactly once. It validates the configuration
//!   (every configuration error surfaces here, never later) and allocates
//!   internal state. Calling it twice, or calling `generate()`/`reset()`
//!   before it, is a programming error and panics.
//! - `generate()` yields `Some(value)` or `None`, the absent-value marker.
//!   Finite algorithms keep returning `None` once their domain is consumed;
//!   infinite algorithms never return it on their own.
//! - `reset()` re-establishes the post-`init()` starting position without
//!   discarding configuration, any number of times.
//! - `close()` releases internal state and is safe to call repeatedly.
//!   After it, `generate()` permanently returns `None` and never panics,
//!   so `close()` doubles as the cancellation mechanism.
//!
//! # Thread safety
//!
//! Generators are `Send` but not internally synchronized. Every operation
//! takes `&mut self`, so sharing one generator across threads means
//! wrapping it in a `Mutex`, which makes each whole `generate()` call
//! (cursor read-modify-write, bucket pick and swap) one critical section,
//! exactly the atomicity the sequential algorithms need.

use crate::error::Result;

pub mod bit_reverse;
pub mod cumulated;
pub mod literal;
pub mod random;
pub mod shuffle;
pub mod step;
pub mod walk;
pub mod wedge;

/// Lifecycle state of a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Created but not yet initialized; only `init()` is legal.
    Uninitialized,
    /// Ready to produce; `generate()`, `reset()` and `close()` are legal.
    Initialized,
    /// Closed; `generate()` returns `None` forever.
    Closed,
}

/// A source of values driven by repeated `generate()` calls.
pub trait Generator: Send {
    /// Type of the produced values.
    type Item;

    /// Validate configuration and allocate internal state.
    fn init(&mut self) -> Result<()>;

    /// Produce the next value, or `None` when no value is available.
    fn generate(&mut self) -> Option<Self::Item>;

    /// Return to the post-`init()` starting position.
    fn reset(&mut self);

    /// Release internal state; idempotent.
    fn close(&mut self);

    /// Current lifecycle state.
    fn state(&self) -> State;
}

/// Owned trait object, the unit of generator composition.
///
/// Proxies own exactly one of these as their wrapped source.
pub type BoxGenerator<T> = Box<dyn Generator<Item = T>>;

/// Lifecycle bookkeeping shared by every generator implementation.
///
/// Tracks the state machine and panics on usage-sequence errors with a
/// message naming the offending call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lifecycle {
    state: State,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }

    pub(crate) fn state(&self) -> State {
        self.state
    }

    /// Transition into `Initialized`; panics if `init()` was already called.
    pub(crate) fn on_init(&mut self) {
        assert!(
            self.state == State::Uninitialized,
            "init() called twice or after close()"
        );
        self.state = State::Initialized;
    }

    /// Gate for `generate()`: panics before `init()`, reports `false`
    /// (emit the absent-value marker) after `close()`.
    pub(crate) fn producing(&self) -> bool {
        match self.state {
            State::Uninitialized => panic!("generate() called before init()"),
            State::Initialized => true,
            State::Closed => false,
        }
    }

    /// Gate for `reset()`: panics unless the generator is initialized.
    pub(crate) fn on_reset(&self) {
        assert!(
            self.state == State::Initialized,
            "reset() requires an initialized, unclosed generator"
        );
    }

    /// Transition into `Closed`; idempotent.
    pub(crate) fn on_close(&mut self) {
        self.state = State::Closed;
    }
}

/// Drain a generator to exhaustion, collecting every produced value.
///
/// Test and inspection helper; never terminates on an infinite generator.
pub fn collect_all<G: Generator + ?Sized>(generator: &mut G) -> Vec<G::Item> {
    let mut values = Vec::new();
    while let Some(value) = generator.generate() {
        values.push(value);
    }
    values
}
