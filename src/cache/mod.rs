//! Short-TTL caching of latest-observation lookups.
//!
//! # Data Flow
//! ```text
//! report assembler
//!     → get_latest(category, series_id, fetcher)
//!     → hit within TTL: stored value, no upstream call
//!     → miss/expired: fetcher() → store → return
//! ```
//!
//! # Design Decisions
//! - Keys are "{category}_{series_id}" so the fixed reports never share
//!   entries across categories
//! - Whatever the fetcher returns is cached, including "no observation";
//!   a negative result is served for the full TTL like any other
//! - No single-flight: concurrent misses for one key may each fetch;
//!   DashMap keeps the last write and nothing corrupts
//! - The clock is injected so TTL expiry is testable without sleeping

use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::fred::Observation;
use crate::observability::metrics;

/// Time source for TTL checks.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now_secs(&self) -> u64;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

#[derive(Clone)]
struct CacheEntry {
    value: Option<Observation>,
    stored_at: u64,
}

/// Process-wide cache for latest observations.
#[derive(Clone)]
pub struct ObservationCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
    ttl_secs: u64,
}

impl ObservationCache {
    /// Create a cache backed by the system clock.
    pub fn new(ttl_secs: u64) -> Self {
        Self::with_clock(ttl_secs, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit clock.
    pub fn with_clock(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
            ttl_secs,
        }
    }

    /// Return the cached latest observation for `{category}_{series_id}`,
    /// invoking `fetch` on a miss or after expiry. The fetch result is
    /// stored as-is, absent results included.
    pub async fn get_latest<F, Fut>(
        &self,
        category: &str,
        series_id: &str,
        fetch: F,
    ) -> Option<Observation>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<Observation>>,
    {
        let key = format!("{category}_{series_id}");
        let now = self.clock.now_secs();

        if let Some(entry) = self.entries.get(&key) {
            if now.saturating_sub(entry.stored_at) < self.ttl_secs {
                metrics::record_cache_hit();
                return entry.value.clone();
            }
        }

        metrics::record_cache_miss();
        let value = fetch().await;
        self.entries.insert(
            key,
            CacheEntry {
                value: value.clone(),
                stored_at: now,
            },
        );
        value
    }

    /// Number of entries currently stored (fresh or expired).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    struct ManualClock {
        now: AtomicU64,
    }

    impl ManualClock {
        fn new(start: u64) -> Arc<Self> {
            Arc::new(Self {
                now: AtomicU64::new(start),
            })
        }

        fn advance(&self, secs: u64) {
            self.now.fetch_add(secs, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_secs(&self) -> u64 {
            self.now.load(Ordering::SeqCst)
        }
    }

    fn obs(day: u32, value: f64) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            value: Some(value),
        }
    }

    #[tokio::test]
    async fn first_call_fetches_once_then_hits() {
        let clock = ManualClock::new(1_000);
        let cache = ObservationCache::with_clock(3600, clock);
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_latest("interest_rate", "FEDFUNDS", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(obs(1, 3.88))
            })
            .await;
        assert_eq!(first, Some(obs(1, 3.88)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let second = cache
            .get_latest("interest_rate", "FEDFUNDS", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(obs(2, 9.99))
            })
            .await;
        assert_eq!(second, Some(obs(1, 3.88)), "hit must return stored value");
        assert_eq!(calls.load(Ordering::SeqCst), 1, "fetcher must not run on hit");
    }

    #[tokio::test]
    async fn refetches_after_ttl() {
        let clock = ManualClock::new(50_000);
        let cache = ObservationCache::with_clock(3600, clock.clone());
        let calls = AtomicUsize::new(0);

        cache
            .get_latest("economic_indicator", "GDP", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(obs(1, 100.0))
            })
            .await;

        // One second before expiry: still a hit.
        clock.advance(3599);
        let hit = cache
            .get_latest("economic_indicator", "GDP", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(obs(2, 200.0))
            })
            .await;
        assert_eq!(hit, Some(obs(1, 100.0)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Crossing the TTL triggers a refetch.
        clock.advance(1);
        let refreshed = cache
            .get_latest("economic_indicator", "GDP", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(obs(2, 200.0))
            })
            .await;
        assert_eq!(refreshed, Some(obs(2, 200.0)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn negative_results_are_cached() {
        let clock = ManualClock::new(0);
        let cache = ObservationCache::with_clock(3600, clock);
        let calls = AtomicUsize::new(0);

        let miss = cache
            .get_latest("market_indicator", "SP500", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                None
            })
            .await;
        assert_eq!(miss, None);

        let cached_miss = cache
            .get_latest("market_indicator", "SP500", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(obs(1, 6846.51))
            })
            .await;
        assert_eq!(cached_miss, None, "absent result is served from cache");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn categories_do_not_share_entries() {
        let clock = ManualClock::new(0);
        let cache = ObservationCache::with_clock(3600, clock);

        cache
            .get_latest("economic_indicator", "GDP", || async { Some(obs(1, 1.0)) })
            .await;
        let other = cache
            .get_latest("market_indicator", "GDP", || async { Some(obs(2, 2.0)) })
            .await;

        assert_eq!(other, Some(obs(2, 2.0)));
        assert_eq!(cache.len(), 2);
    }
}
