//! Cache-first airport code resolution.

use std::sync::Arc;

use charter_quote_models::{AirportCode, Point};

use crate::StationLookup;
use crate::cache::GeoCache;
use crate::extract::extract_point;

/// Resolves airport codes to points through a [`StationLookup`], caching
/// every outcome for the life of the resolver.
///
/// Built once at startup and shared by reference with whatever needs
/// lookups.
pub struct GeoResolver {
    lookup: Arc<dyn StationLookup>,
    cache: GeoCache,
}

impl GeoResolver {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new(lookup: Arc<dyn StationLookup>) -> Self {
        Self {
            lookup,
            cache: GeoCache::new(),
        }
    }

    /// The resolver's cache.
    #[must_use]
    pub const fn cache(&self) -> &GeoCache {
        &self.cache
    }

    /// Resolves `raw` to a point.
    ///
    /// Invalid codes return `None` without touching the cache or the
    /// network. A cached outcome (hit or miss) is returned as-is.
    /// Otherwise one request is made; transport errors, non-success
    /// responses and payloads without usable coordinates all resolve to
    /// `None`, and the outcome is cached either way.
    pub async fn resolve(&self, raw: &str) -> Option<Point> {
        let Some(code) = AirportCode::parse(raw) else {
            log::debug!("Ignoring invalid airport code {raw:?}");
            return None;
        };

        if let Some(cached) = self.cache.get(&code) {
            log::debug!(
                "Cache {} for {code}",
                if cached.is_some() { "hit" } else { "miss (negative)" }
            );
            return cached;
        }

        let point = match self.lookup.fetch_station(&code).await {
            Ok(body) => {
                let point = extract_point(&body);
                if point.is_none() {
                    log::warn!("No coordinates found in station data for {code}");
                }
                point
            }
            Err(e) => {
                log::warn!("Station lookup failed for {code}: {e}");
                None
            }
        };

        self.cache.insert(code, point);
        point
    }

    /// Resolves each code in order, one at a time.
    ///
    /// The returned vector lines up with `codes`; unresolvable entries are
    /// `None`.
    pub async fn resolve_route<S: AsRef<str> + Sync>(&self, codes: &[S]) -> Vec<Option<Point>> {
        let mut points = Vec::with_capacity(codes.len());
        for code in codes {
            points.push(self.resolve(code.as_ref()).await);
        }
        points
    }

    /// Fetches the raw METAR document for `raw`.
    ///
    /// Returns `None` for invalid codes and for any lookup failure. METAR
    /// results are not cached.
    pub async fn metar(&self, raw: &str) -> Option<serde_json::Value> {
        let code = AirportCode::parse(raw)?;
        match self.lookup.fetch_metar(&code).await {
            Ok(body) => Some(body),
            Err(e) => {
                log::warn!("METAR lookup failed for {code}: {e}");
                None
            }
        }
    }
}
