//! Desired-size cache for a single layout call.
//!
//! A child can be measured against the same constraint more than once during
//! one call (first-pass sizing, arrangement, reconciliation re-measure). The
//! cache memoises `measure` results keyed by child index and the exact
//! constraint bits. It is created per call and dropped on return, so entries
//! never outlive the element tree they were taken from.
//!
//! Non-finite results are never stored.

use std::collections::HashMap;

use crate::element::GridElement;
use crate::Size;

/// Cache key: child index plus constraint width and height bits.
type CacheKey = (usize, u32, u32);

/// Lookup statistics for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub lookups: usize,
    pub hits: usize,
    pub stores: usize,
}

/// Per-call memo of desired sizes.
#[derive(Debug, Default)]
pub struct MeasureCache {
    entries: HashMap<CacheKey, Size>,
    stats: CacheStats,
}

impl MeasureCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(child: usize, constraint: Size) -> CacheKey {
        (child, constraint.width.to_bits(), constraint.height.to_bits())
    }

    /// Look up a cached desired size.
    pub fn lookup(&mut self, child: usize, constraint: Size) -> Option<Size> {
        self.stats.lookups += 1;
        let hit = self.entries.get(&Self::key(child, constraint)).copied();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Store a desired size. Non-finite sizes are ignored.
    pub fn store(&mut self, child: usize, constraint: Size, size: Size) {
        if !size.width.is_finite() || !size.height.is_finite() {
            return;
        }
        self.stats.stores += 1;
        self.entries.insert(Self::key(child, constraint), size);
    }

    /// Measure `element` through the cache.
    pub fn measure<E: GridElement + ?Sized>(
        &mut self,
        child: usize,
        element: &E,
        constraint: Size,
    ) -> Size {
        if let Some(size) = self.lookup(child, constraint) {
            return size;
        }
        let size = element.measure(constraint);
        self.store(child, constraint, size);
        size
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
