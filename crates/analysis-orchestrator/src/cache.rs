use analysis_core::{MetricsCache, StockMetrics};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::time::Duration;

/// Internal cache entry with timestamp
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

/// In-memory per-ticker cache with a fixed expiry
pub struct TtlCache {
    entries: DashMap<String, CacheEntry<StockMetrics>>,
    ttl: chrono::Duration,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(ticker: &str) -> String {
        ticker.trim().to_uppercase()
    }
}

impl MetricsCache for TtlCache {
    fn get(&self, ticker: &str) -> Option<StockMetrics> {
        let key = Self::key(ticker);
        let expired = match self.entries.get(&key) {
            Some(entry) if Utc::now() - entry.cached_at < self.ttl => {
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(&key);
        }
        None
    }

    fn put(&self, ticker: &str, metrics: &StockMetrics) {
        self.entries.insert(
            Self::key(ticker),
            CacheEntry {
                data: metrics.clone(),
                cached_at: Utc::now(),
            },
        );
    }
}

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl MetricsCache for NoCache {
    fn get(&self, _ticker: &str) -> Option<StockMetrics> {
        None
    }

    fn put(&self, _ticker: &str, _metrics: &StockMetrics) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::Fundamentals;

    #[test]
    fn test_hit_is_case_insensitive() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let metrics = StockMetrics::with_fundamentals("KO", Fundamentals::default());
        cache.put("ko", &metrics);

        assert_eq!(cache.get("KO"), Some(metrics.clone()));
        assert_eq!(cache.get(" ko "), Some(metrics));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entries_are_evicted() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.put("KO", &StockMetrics::with_fundamentals("KO", Fundamentals::default()));
        assert!(cache.get("KO").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_no_cache() {
        let cache = NoCache;
        cache.put("KO", &StockMetrics::with_fundamentals("KO", Fundamentals::default()));
        assert!(cache.get("KO").is_none());
    }
}
