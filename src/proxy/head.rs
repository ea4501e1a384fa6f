//! First-N truncation proxy

use crate::error::Result;
use crate::generator::{BoxGenerator, Generator, Lifecycle, State};

/// Passes through at most `limit` elements from the source, then reports
/// exhaustion forever. A limit of zero is legal and exhausts immediately.
pub struct HeadProxy<T> {
    source: BoxGenerator<T>,
    limit: u64,
    emitted: u64,
    lifecycle: Lifecycle,
}

impl<T> HeadProxy<T> {
    /// Wrap `source`, truncating it after `limit` elements.
    pub fn new(source: BoxGenerator<T>, limit: u64) -> Self {
        Self {
            source,
            limit,
            emitted: 0,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<T> Generator for HeadProxy<T> {
    type Item = T;

    fn init(&mut self) -> Result<()> {
        self.source.init()?;
        self.lifecycle.on_init();
        self.emitted = 0;
        Ok(())
    }

    fn generate(&mut self) -> Option<T> {
        if !self.lifecycle.producing() {
            return None;
        }
        if self.emitted >= self.limit {
            return None;
        }
        let value = self.source.generate()?;
        self.emitted += 1;
        Some(value)
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        self.source.reset();
        self.emitted = 0;
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        self.source.close();
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}
