//! Bucket-cache (expand) proxy
//!
//! Converts an arbitrary, possibly unbounded, source generator into a
//! memory-bounded stream with randomized order, optional strict uniqueness
//! and optional controlled duplication.
//!
//! # How it works
//!
//! *Fill phase* (at `init()` and `reset()`): up to `cache_size` elements are
//! pulled from the source and scattered into randomly chosen buckets of at
//! most `bucket_size` elements each. If the source dries up first, the
//! partially filled buckets are kept, so no cached value is ever discarded.
//!
//! *Serving while the source lives*: each call picks a random bucket. With
//! probability `duplication_quota` it re-emits a random cached element
//! without removing it. Otherwise it pulls one fresh value from the source
//! and swaps it in for a random bucket element, returning the evicted one;
//! memory stays bounded while the cache keeps refreshing and the output
//! order keeps mixing.
//!
//! *Serving after the source is exhausted*: no replacement exists, so the
//! call removes and returns the last element of the picked bucket (O(1),
//! no shifting). Drained buckets leave the serving list immediately; when
//! the list empties the proxy itself is exhausted.
//!
//! A minimum bucket size of `max(sqrt(cache_size), 10)` keeps the random
//! eviction reasonably uniform without excessive per-bucket bookkeeping.

use crate::error::{GeneratorError, Result};
use crate::generator::{BoxGenerator, Generator, Lifecycle, State};
use crate::random::RandomSource;

/// Default number of elements held in the cache.
pub const DEFAULT_CACHE_SIZE: usize = 100;

/// Default duplication quota: no duplicates.
pub const DEFAULT_DUPLICATION_QUOTA: f64 = 0.0;

/// Smallest bucket size accepted for a given cache size.
fn min_bucket_size(cache_size: usize) -> usize {
    ((cache_size as f64).sqrt() as usize).max(10)
}

/// Memory-bounded cache-and-shuffle wrapper around a source generator.
///
/// Finite iff the source is finite. With `duplication_quota = 0` and a
/// source producing distinct values, the output is distinct too.
pub struct ExpandProxy<T, R = crate::random::Pseudorandom> {
    source: BoxGenerator<T>,
    cache_size: usize,
    bucket_size: usize,
    duplication_quota: f64,
    rng: R,
    /// Serving buckets; invariant: every bucket is non-empty.
    buckets: Vec<Vec<T>>,
    source_exhausted: bool,
    lifecycle: Lifecycle,
}

impl<T: Clone + Send + 'static, R: RandomSource> ExpandProxy<T, R> {
    /// Wrap `source` with the default cache size and no duplication.
    pub fn new(source: BoxGenerator<T>, rng: R) -> Self {
        Self::with_config(source, DEFAULT_CACHE_SIZE, 0, DEFAULT_DUPLICATION_QUOTA, rng)
    }

    /// Wrap `source` with explicit cache policy.
    ///
    /// `bucket_size` is clamped up to `max(sqrt(cache_size), 10)`; pass 0
    /// to take the minimum. `duplication_quota` is the probability that a
    /// produced value repeats a cached one instead of consuming the source.
    pub fn with_config(
        source: BoxGenerator<T>,
        cache_size: usize,
        bucket_size: usize,
        duplication_quota: f64,
        rng: R,
    ) -> Self {
        Self {
            source,
            cache_size,
            bucket_size,
            duplication_quota,
            rng,
            buckets: Vec::new(),
            source_exhausted: false,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Number of elements currently cached.
    pub fn cached(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Drain up to `cache_size` source elements into randomly chosen buckets.
    fn fill(&mut self) {
        let num_buckets = self.cache_size.div_ceil(self.bucket_size);
        self.buckets = (0..num_buckets).map(|_| Vec::new()).collect();
        let mut total = 0;
        while total < self.cache_size {
            let Some(value) = self.source.generate() else {
                self.source_exhausted = true;
                break;
            };
            // Uniform slot choice; probe past full buckets.
            let mut slot = self.rng.index(num_buckets);
            while self.buckets[slot].len() >= self.bucket_size {
                slot = (slot + 1) % num_buckets;
            }
            self.buckets[slot].push(value);
            total += 1;
        }
        // Leftover partial buckets serve as-is; empty slots drop out.
        self.buckets.retain(|bucket| !bucket.is_empty());
    }
}

impl<T: Clone + Send + 'static, R: RandomSource> Generator for ExpandProxy<T, R> {
    type Item = T;

    fn init(&mut self) -> Result<()> {
        if self.cache_size == 0 {
            return Err(GeneratorError::InvalidParameter {
                name: "cache_size",
                reason: "cache must hold at least one element".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.duplication_quota) {
            return Err(GeneratorError::InvalidParameter {
                name: "duplication_quota",
                reason: format!("quota {} outside [0, 1)", self.duplication_quota),
            });
        }
        self.bucket_size = self.bucket_size.max(min_bucket_size(self.cache_size));
        self.source.init()?;
        self.lifecycle.on_init();
        self.source_exhausted = false;
        self.fill();
        Ok(())
    }

    fn generate(&mut self) -> Option<T> {
        if !self.lifecycle.producing() {
            return None;
        }
        if self.buckets.is_empty() {
            return None;
        }
        let bucket = self.rng.index(self.buckets.len());
        if !self.source_exhausted {
            if self.duplication_quota > 0.0 && self.rng.probability() < self.duplication_quota {
                // Controlled repetition: re-emit without removing.
                let slot = self.rng.index(self.buckets[bucket].len());
                return Some(self.buckets[bucket][slot].clone());
            }
            match self.source.generate() {
                Some(fresh) => {
                    // Eviction step: swap the fresh value in, hand the old
                    // one out; cache occupancy is unchanged.
                    let slot = self.rng.index(self.buckets[bucket].len());
                    return Some(std::mem::replace(&mut self.buckets[bucket][slot], fresh));
                }
                None => self.source_exhausted = true,
            }
        }
        // Drain phase: no replacement available, pop from the tail.
        let value = self.buckets[bucket].pop();
        if self.buckets[bucket].is_empty() {
            self.buckets.swap_remove(bucket);
        }
        value
    }

    fn reset(&mut self) {
        self.lifecycle.on_reset();
        self.source.reset();
        self.source_exhausted = false;
        self.fill();
    }

    fn close(&mut self) {
        self.lifecycle.on_close();
        self.source.close();
        self.buckets.clear();
    }

    fn state(&self) -> State {
        self.lifecycle.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::collect_all;
    use crate::generator::step::StepGenerator;
    use crate::random::Pseudorandom;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    /// Counts how many values have been pulled out of it, so tests can
    /// check the cache's outstanding-element bound.
    struct CountingSource {
        next: i64,
        limit: i64,
        pulled: Arc<AtomicI64>,
    }

    impl Generator for CountingSource {
        type Item = i64;

        fn init(&mut self) -> Result<()> {
            Ok(())
        }

        fn generate(&mut self) -> Option<i64> {
            if self.next >= self.limit {
                return None;
            }
            let value = self.next;
            self.next += 1;
            self.pulled.fetch_add(1, Ordering::Relaxed);
            Some(value)
        }

        fn reset(&mut self) {
            self.next = 0;
        }

        fn close(&mut self) {}

        fn state(&self) -> State {
            State::Initialized
        }
    }

    fn expand_steps(
        limit: i64,
        cache_size: usize,
        quota: f64,
        seed: u64,
    ) -> ExpandProxy<i64, Pseudorandom> {
        let source = Box::new(StepGenerator::new(0_i64, limit - 1, 1));
        let mut gen = ExpandProxy::with_config(
            source,
            cache_size,
            0,
            quota,
            Pseudorandom::with_seed(seed),
        );
        gen.init().unwrap();
        gen
    }

    #[test]
    fn test_expand_unique_and_complete() {
        let mut gen = expand_steps(1000, 100, 0.0, 42);
        let values = collect_all(&mut gen);
        assert_eq!(values.len(), 1000, "every source value must come out");
        let distinct: HashSet<i64> = values.iter().copied().collect();
        assert_eq!(distinct.len(), 1000, "quota 0 must never repeat");
        assert!(values.iter().all(|v| (0..1000).contains(v)));
    }

    #[test]
    fn test_expand_randomizes_order() {
        let mut gen = expand_steps(200, 100, 0.0, 7);
        let values = collect_all(&mut gen);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_ne!(values, sorted, "output should not be in source order");
    }

    #[test]
    fn test_expand_memory_bound_holds_throughout() {
        let pulled = Arc::new(AtomicI64::new(0));
        let source = Box::new(CountingSource {
            next: 0,
            limit: 10_000,
            pulled: pulled.clone(),
        });
        let cache_size = 64;
        let mut gen = ExpandProxy::with_config(
            source,
            cache_size,
            0,
            0.0,
            Pseudorandom::with_seed(3),
        );
        gen.init().unwrap();
        let mut emitted = 0i64;
        while let Some(_) = gen.generate() {
            emitted += 1;
            let outstanding = pulled.load(Ordering::Relaxed) - emitted;
            assert!(
                outstanding <= cache_size as i64,
                "cache held {} elements, bound is {}",
                outstanding,
                cache_size
            );
            assert!(gen.cached() <= cache_size);
        }
        assert_eq!(emitted, 10_000);
    }

    #[test]
    fn test_expand_duplication_quota_repeats() {
        let mut gen = expand_steps(200, 50, 0.3, 42);
        let values = collect_all(&mut gen);
        // Every source value still appears, plus quota-driven repeats.
        let distinct: HashSet<i64> = values.iter().copied().collect();
        assert_eq!(distinct.len(), 200);
        assert!(
            values.len() > 200,
            "quota 0.3 should have produced repeats, got {}",
            values.len()
        );
    }

    #[test]
    fn test_expand_small_source_keeps_partial_buckets() {
        // Source shorter than the cache: everything must still come out.
        let mut gen = expand_steps(7, 100, 0.0, 1);
        let mut values = collect_all(&mut gen);
        values.sort_unstable();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_expand_empty_source() {
        let source = Box::new(crate::generator::literal::LiteralGenerator::<i64>::new(vec![]));
        let mut gen = ExpandProxy::new(source, Pseudorandom::with_seed(0));
        gen.init().unwrap();
        assert_eq!(gen.generate(), None);
    }

    #[test]
    fn test_expand_marker_is_permanent() {
        let mut gen = expand_steps(20, 10, 0.0, 5);
        collect_all(&mut gen);
        for _ in 0..5 {
            assert_eq!(gen.generate(), None);
        }
    }

    #[test]
    fn test_expand_reset_refills() {
        let mut gen = expand_steps(50, 20, 0.0, 9);
        let first: HashSet<i64> = collect_all(&mut gen).into_iter().collect();
        gen.reset();
        let second: HashSet<i64> = collect_all(&mut gen).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 50);
    }

    #[test]
    fn test_expand_rejects_zero_cache() {
        let source = Box::new(StepGenerator::new(0_i64, 10, 1));
        let mut gen =
            ExpandProxy::with_config(source, 0, 0, 0.0, Pseudorandom::with_seed(0));
        assert!(matches!(
            gen.init(),
            Err(GeneratorError::InvalidParameter { name: "cache_size", .. })
        ));
    }

    #[test]
    fn test_expand_rejects_invalid_quota() {
        let source = Box::new(StepGenerator::new(0_i64, 10, 1));
        let mut gen =
            ExpandProxy::with_config(source, 10, 0, 1.5, Pseudorandom::with_seed(0));
        assert!(matches!(
            gen.init(),
            Err(GeneratorError::InvalidParameter { name: "duplication_quota", .. })
        ));
    }

    #[test]
    fn test_expand_close_cascades() {
        let mut gen = expand_steps(100, 10, 0.0, 2);
        assert!(gen.generate().is_some());
        gen.close();
        assert_eq!(gen.generate(), None);
        assert_eq!(gen.cached(), 0);
    }
}
