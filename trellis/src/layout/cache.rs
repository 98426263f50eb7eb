//! Measurement cache for memoizing expensive leaf measurements.
//!
//! Measurement is referentially transparent, so a (content hash, constraint)
//! pair always maps to the same size. Only leaves with real work behind them
//! (text) should use this; container measurement is cheap enough to redo.

use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use lru::LruCache;

use super::constraint::SizeConstraint;
use crate::primitives::Size;

/// Default capacity of the per-thread measurement cache.
pub const DEFAULT_CAPACITY: usize = 512;

/// The key for a cached measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasurementKey {
    /// Hash of whatever determines the measured content (text, font size).
    pub content_hash: u64,
    /// The constraint the content was measured against.
    pub constraint: SizeConstraint,
}

impl MeasurementKey {
    #[inline]
    pub fn new(content: &impl Hash, constraint: SizeConstraint) -> Self {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        Self {
            content_hash: hasher.finish(),
            constraint,
        }
    }
}

/// A bounded, least-recently-used cache of measured sizes.
pub struct MeasurementCache {
    entries: LruCache<MeasurementKey, Size>,
    hits: u64,
    misses: u64,
}

impl MeasurementCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached size for `key`, or measure and remember it.
    pub fn get_or_measure(&mut self, key: MeasurementKey, measure: impl FnOnce() -> Size) -> Size {
        if let Some(size) = self.entries.get(&key) {
            self.hits += 1;
            return *size;
        }
        self.misses += 1;
        let size = measure();
        self.entries.put(key, size);
        size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl Default for MeasurementCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

thread_local! {
    static MEASUREMENT_CACHE: RefCell<MeasurementCache> = RefCell::new(MeasurementCache::default());
}

/// Measure through the calling thread's shared cache.
///
/// `measure` must not re-enter this function (leaf measurement only).
pub fn cached_measurement(key: MeasurementKey, measure: impl FnOnce() -> Size) -> Size {
    MEASUREMENT_CACHE.with(|cache| cache.borrow_mut().get_or_measure(key, measure))
}

/// Drop everything in the calling thread's shared cache.
pub fn clear_thread_cache() {
    MEASUREMENT_CACHE.with(|cache| cache.borrow_mut().clear());
}
