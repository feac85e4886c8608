//! Concurrent memo of per-point core distances.
//!
//! Core distances are computed lazily the first time a point takes part in a
//! mutual-reachability query and never change afterwards, so entries are
//! never evicted within a clustering run.

use dashmap::DashMap;

/// Thread-safe map from point index to core distance.
///
/// # Examples
/// ```
/// use strata_core::DistanceCache;
///
/// let cache = DistanceCache::new();
/// assert_eq!(cache.get(3), None);
/// assert_eq!(cache.get_or_insert(3, 0.5), 0.5);
/// assert_eq!(cache.get_or_insert(3, 9.0), 0.5);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DistanceCache {
    core: DashMap<usize, f64>,
}

impl DistanceCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache sized for `points` entries.
    #[must_use]
    pub fn with_capacity(points: usize) -> Self {
        Self {
            core: DashMap::with_capacity(points),
        }
    }

    /// Returns the cached core distance for `point`, if present.
    #[must_use]
    pub fn get(&self, point: usize) -> Option<f64> {
        let value = self.core.get(&point).map(|entry| *entry.value());
        record_lookup(value.is_some());
        value
    }

    /// Stores `value` unless another thread got there first, returning the
    /// value that ends up cached.
    pub fn get_or_insert(&self, point: usize, value: f64) -> f64 {
        *self.core.entry(point).or_insert(value).value()
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }
}

#[cfg(feature = "metrics")]
fn record_lookup(hit: bool) {
    if hit {
        metrics::counter!("core_distance_cache_hits").increment(1);
    } else {
        metrics::counter!("core_distance_cache_misses").increment(1);
    }
}

#[cfg(not(feature = "metrics"))]
fn record_lookup(_hit: bool) {}
