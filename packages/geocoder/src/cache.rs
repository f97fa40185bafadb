//! Session cache of airport code lookups.
//!
//! Caches both successful lookups (with coordinates) and failed ones
//! (`None`) so the same unknown code is not requested twice. Entries are
//! never evicted or expired; the cache lives as long as the resolver that
//! owns it.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use charter_quote_models::{AirportCode, Point};

/// Append-only map from airport code to lookup outcome.
#[derive(Debug, Default)]
pub struct GeoCache {
    entries: Mutex<BTreeMap<AirportCode, Option<Point>>>,
}

impl GeoCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<AirportCode, Option<Point>>> {
        // The map is always left consistent, so a poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Looks up `code`.
    ///
    /// The outer `Option` says whether the code was looked up before; the
    /// inner one is the cached outcome (`None` for a known miss).
    #[must_use]
    pub fn get(&self, code: &AirportCode) -> Option<Option<Point>> {
        self.lock().get(code).copied()
    }

    /// Records the outcome of a lookup.
    pub fn insert(&self, code: AirportCode, point: Option<Point>) {
        self.lock().insert(code, point);
    }

    /// Number of cached codes, hits and misses together.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of cached misses.
    #[must_use]
    pub fn miss_count(&self) -> usize {
        self.lock().values().filter(|p| p.is_none()).count()
    }
}
