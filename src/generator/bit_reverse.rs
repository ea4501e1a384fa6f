//! Bit-reversal permutation
//!
//! Treats an incrementing counter as a fixed-width bit pattern, reverses the
//! bit order and uses the reversed value as the step index. With width
//! `b = ceil(log2(steps + 1))` the reversal is a bijection on `[0, 2^b)`,
//! so every domain index appears exactly once; reversed values beyond the
//! domain are skipped by advancing the counter further.
//!
//! The output is statistically dispersed without consuming any randomness,
//! which makes two independently started runs collision-free by
//! construction, something no seeded random generator can offer.

use crate::domain::{Bounds, Domain};
use crate::error::Result;
use crate::generator::{Generator, Lifecycle, State};

/// Deterministic dispersed full-period enumeration of a quantized range.
///
/// Finite: exhausts after emitting every domain value exactly once, and
/// replays the identical sequence after every `reset()`.
pub struct BitReverseGenerator<D> {
    bounds: Bounds<D>,
    /// Highest step index, fixed at init.
    steps: u64,
    /// Bit width of the enumeration space.
    bits: u32,
    /// Counter over `[0, 2^bits)`; u128 so the exclusive end is representable.
    cursor: u128,
    lifecycle: Lifecycle,
}

impl<D: Domain> BitReverseGenerator<D> {
    /// Create a bit-reversal enumeration over `bounds`.
    pub fn new(bounds: Bounds<D>) -> Self {
        Self {
            bounds,
            steps: 0,
            bits: 0,
            cursor: 0,
            lifecycle: Lifecycle::new(),
        }
    }

    fn capacity(&self) -> u128 {
        1u128 << self.bits
    }
}

/// Reverse the low `bits` bits of `value`.
fn reverse(value: u64, bits: u32) -> u64 {
    if bits == 0 {
        0
    } else {
        value.reverse_bits() >> (64 - bits)
    }
}

impl<D: Domain> Generator for BitReverseGenerator<D> {
    type Item = D;

    fn init(&mut self) -> Result<()> {
        let steps = self.bounds.steps("bit-reverse")?;
        self.steps = steps;
        self.bits = 64 - steps.leading_zeros();
        self.lifecycle.on_init();
        self.cursor = 0;
        Ok(())
    }

    fn generate(&mut self) -> Option<D> {
        if !self.lifecycle.producing() {
            return None;
        }
        // Skip counter positions whose reversal falls outside the domain,
        // capped so a misbehaving width can never loop forever.
        let mut advances = 0u128;
        while self.cursor < self.capacity() && advances <= self.capacity() {
            let index = reverse(self.cursor as u64, self.bits);
            self.cursor += 1;
            advances += 1;
            if index <= self.steps {
                return Some(self.bounds.nth(index));
            }
        }
        None
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        self.cursor = 0;
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}
