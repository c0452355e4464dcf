//! Cache-aside wrapper for analytics sources
//!
//! Wraps any `AnalyticsSource` and serves repeat reads from the cache.
//! Cache failures on either side degrade to a recompute: a broken cache
//! must never break the read path.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::data::cache::{CacheKey, CacheService};

use super::error::AnalyticsError;
use super::source::AnalyticsSource;
use super::types::DriverAnalytics;

pub struct CachedAnalytics {
    inner: Arc<dyn AnalyticsSource>,
    cache: Arc<CacheService>,
    ttl: Duration,
}

impl CachedAnalytics {
    pub fn new(inner: Arc<dyn AnalyticsSource>, cache: Arc<CacheService>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }
}

#[async_trait]
impl AnalyticsSource for CachedAnalytics {
    fn strategy(&self) -> &'static str {
        self.inner.strategy()
    }

    async fn driver_analytics(&self, driver_id: i64) -> Result<DriverAnalytics, AnalyticsError> {
        // Invalid ids never reach the cache; let the inner source reject them
        if driver_id <= 0 {
            return self.inner.driver_analytics(driver_id).await;
        }

        let key = CacheKey::driver_analytics(driver_id);
        match self.cache.get::<DriverAnalytics>(&key).await {
            Ok(Some(hit)) => {
                tracing::trace!(driver_id, "Analytics cache hit");
                return Ok(hit);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(driver_id, error = %e, "Analytics cache read failed");
            }
        }

        let analytics = self.inner.driver_analytics(driver_id).await?;

        if let Err(e) = self.cache.set(&key, &analytics, Some(self.ttl)).await {
            tracing::warn!(driver_id, error = %e, "Analytics cache write failed");
        }

        Ok(analytics)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use crate::core::config::CacheConfig;

    use super::*;

    /// Source that counts how many times it computes
    struct CountingSource {
        computes: AtomicUsize,
        result: Result<DriverAnalytics, ()>,
    }

    impl CountingSource {
        fn returning(analytics: DriverAnalytics) -> Self {
            Self {
                computes: AtomicUsize::new(0),
                result: Ok(analytics),
            }
        }

        fn not_found() -> Self {
            Self {
                computes: AtomicUsize::new(0),
                result: Err(()),
            }
        }

        fn computes(&self) -> usize {
            self.computes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalyticsSource for CountingSource {
        fn strategy(&self) -> &'static str {
            "counting"
        }

        async fn driver_analytics(
            &self,
            _driver_id: i64,
        ) -> Result<DriverAnalytics, AnalyticsError> {
            self.computes.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(analytics) => Ok(analytics.clone()),
                Err(()) => Err(AnalyticsError::NotFound),
            }
        }
    }

    fn sample_analytics() -> DriverAnalytics {
        DriverAnalytics {
            id: 1,
            name: "Ada Okafor".to_string(),
            phone: "555-0101".to_string(),
            onboarded_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            total_trips: 3,
            total_earnings: "350.00".parse().unwrap(),
            average_rating: "4.25".parse().unwrap(),
            trips: Vec::new(),
        }
    }

    async fn memory_cache() -> Arc<CacheService> {
        Arc::new(CacheService::new(&CacheConfig::default()).await.unwrap())
    }

    #[tokio::test]
    async fn test_miss_computes_and_populates() {
        let source = Arc::new(CountingSource::returning(sample_analytics()));
        let cache = memory_cache().await;
        let cached = CachedAnalytics::new(source.clone(), cache.clone(), Duration::from_secs(300));

        let analytics = cached.driver_analytics(1).await.unwrap();
        assert_eq!(analytics, sample_analytics());
        assert_eq!(source.computes(), 1);
        assert!(cache.exists(&CacheKey::driver_analytics(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_hit_skips_inner_source() {
        let source = Arc::new(CountingSource::returning(sample_analytics()));
        let cached = CachedAnalytics::new(
            source.clone(),
            memory_cache().await,
            Duration::from_secs(300),
        );

        let first = cached.driver_analytics(1).await.unwrap();
        let second = cached.driver_analytics(1).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.computes(), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let source = Arc::new(CountingSource::not_found());
        let cache = memory_cache().await;
        let cached = CachedAnalytics::new(source.clone(), cache.clone(), Duration::from_secs(300));

        for _ in 0..2 {
            let result = cached.driver_analytics(1).await;
            assert!(matches!(result, Err(AnalyticsError::NotFound)));
        }
        // Each attempt recomputes; nothing is stored
        assert_eq!(source.computes(), 2);
        assert!(!cache.exists(&CacheKey::driver_analytics(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_distinct_drivers_have_distinct_entries() {
        let source = Arc::new(CountingSource::returning(sample_analytics()));
        let cached = CachedAnalytics::new(
            source.clone(),
            memory_cache().await,
            Duration::from_secs(300),
        );

        cached.driver_analytics(1).await.unwrap();
        cached.driver_analytics(2).await.unwrap();
        assert_eq!(source.computes(), 2);
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let source = Arc::new(CountingSource::returning(sample_analytics()));
        let cache = memory_cache().await;
        let cached = CachedAnalytics::new(source.clone(), cache.clone(), Duration::from_millis(20));

        cached.driver_analytics(1).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        cached.driver_analytics(1).await.unwrap();
        assert_eq!(source.computes(), 2);
    }

    #[tokio::test]
    async fn test_cache_read_failure_degrades_to_recompute() {
        let source = Arc::new(CountingSource::returning(sample_analytics()));
        let cache = memory_cache().await;
        let cached = CachedAnalytics::new(source.clone(), cache.clone(), Duration::from_secs(300));

        // Undecodable bytes under the key make every typed get fail
        cache
            .set_raw(&CacheKey::driver_analytics(1), b"not msgpack".to_vec(), None)
            .await
            .unwrap();

        let analytics = cached.driver_analytics(1).await.unwrap();
        assert_eq!(analytics, sample_analytics());
        assert_eq!(source.computes(), 1);

        // The recompute overwrote the bad entry, so the next read is a hit
        let again = cached.driver_analytics(1).await.unwrap();
        assert_eq!(again, analytics);
        assert_eq!(source.computes(), 1);
    }

    #[tokio::test]
    async fn test_invalid_id_bypasses_cache() {
        let source = Arc::new(CountingSource::returning(sample_analytics()));
        let cache = memory_cache().await;
        let cached = CachedAnalytics::new(source.clone(), cache.clone(), Duration::from_secs(300));

        // CountingSource accepts any id; the real sources reject this one,
        // and the wrapper must not store anything under a non-positive key.
        cached.driver_analytics(-1).await.unwrap();
        assert!(!cache.exists(&CacheKey::driver_analytics(-1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_strategy_is_delegated() {
        let source = Arc::new(CountingSource::returning(sample_analytics()));
        let cached =
            CachedAnalytics::new(source, memory_cache().await, Duration::from_secs(300));
        assert_eq!(cached.strategy(), "counting");
    }
}
