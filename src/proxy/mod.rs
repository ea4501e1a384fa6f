//! Modifier proxies
//!
//! Decorators that wrap exactly one owned source generator and expose the
//! same [`Generator`](crate::generator::Generator) lifecycle. `init()`,
//! `reset()` and `close()` cascade into the source; `generate()` reshapes
//! the source's output stream:
//!
//! - [`head::HeadProxy`] passes through at most `n` elements.
//! - [`repeat::RepeatProxy`] re-emits each element a drawn number of times.
//! - [`skip::SkipProxy`] discards a drawn number of elements per draw.
//! - [`expand::ExpandProxy`] buffers the source in a sharded bucket cache
//!   for random-order, unique or partially-duplicated delivery.
//!
//! Proxies take their source uninitialized and own it exclusively; there is
//! no sharing of a source between two proxies.

pub mod expand;
pub mod head;
pub mod repeat;
pub mod skip;
