//! Aggregation strategies
//!
//! Both strategies produce the same `DriverAnalytics` shape from the same
//! `DriverStore` and are interchangeable behind `AnalyticsSource`. They
//! differ in where the join work happens:
//!
//! - `JoinedSource` pushes everything into the store: one aggregate query
//!   for the totals plus one left-joined detail query.
//! - `FanOutSource` reads the base relations separately, overlaps the two
//!   keyed lookups, and joins in memory.
//!
//! Every store read runs under a per-read deadline; an elapsed deadline
//! surfaces as `AnalyticsError::Timeout`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::data::postgres::StoreError;
use crate::data::traits::DriverStore;

use super::error::AnalyticsError;
use super::merge;
use super::observer::QueryObserver;
use super::types::DriverAnalytics;

pub const STRATEGY_FAN_OUT: &str = "fan_out";
pub const STRATEGY_JOINED: &str = "joined";

/// A strategy that can produce a driver analytics snapshot
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Stable name for logs and observer records
    fn strategy(&self) -> &'static str;

    async fn driver_analytics(&self, driver_id: i64) -> Result<DriverAnalytics, AnalyticsError>;
}

/// Run a store read under a deadline
async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, AnalyticsError>
where
    F: Future<Output = Result<T, StoreError>> + Send,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AnalyticsError::Timeout),
    }
}

/// Fan-out strategy: separate reads per relation, in-memory hash join
///
/// The payments and ratings lookups share the same trip-id set and have no
/// data dependency on each other, so they run concurrently. The driver and
/// trip reads stay sequential because each later read depends on the
/// earlier one's result.
pub struct FanOutSource<S> {
    store: Arc<S>,
    trip_limit: i64,
    query_timeout: Duration,
    observer: Arc<dyn QueryObserver>,
}

impl<S: DriverStore> FanOutSource<S> {
    pub fn new(
        store: Arc<S>,
        trip_limit: i64,
        query_timeout: Duration,
        observer: Arc<dyn QueryObserver>,
    ) -> Self {
        Self {
            store,
            trip_limit,
            query_timeout,
            observer,
        }
    }
}

#[async_trait]
impl<S: DriverStore> AnalyticsSource for FanOutSource<S> {
    fn strategy(&self) -> &'static str {
        STRATEGY_FAN_OUT
    }

    async fn driver_analytics(&self, driver_id: i64) -> Result<DriverAnalytics, AnalyticsError> {
        if driver_id <= 0 {
            return Err(AnalyticsError::InvalidArgument);
        }
        let started = Instant::now();

        let driver = bounded(self.query_timeout, self.store.driver(driver_id))
            .await?
            .ok_or(AnalyticsError::NotFound)?;

        let trips = bounded(
            self.query_timeout,
            self.store.trips_for_driver(driver_id, self.trip_limit),
        )
        .await?;

        // No trips means nothing to key the fan-out lookups on
        if trips.is_empty() {
            let analytics = DriverAnalytics::empty(driver);
            self.observer
                .record(STRATEGY_FAN_OUT, driver_id, started.elapsed());
            return Ok(analytics);
        }

        let trip_ids: Vec<i64> = trips.iter().map(|t| t.id).collect();
        let (payments, ratings) = tokio::try_join!(
            bounded(self.query_timeout, self.store.payments_for_trips(&trip_ids)),
            bounded(self.query_timeout, self.store.ratings_for_trips(&trip_ids)),
        )?;

        let details = merge::merge_trip_details(&trips, payments, ratings);
        let analytics = DriverAnalytics {
            id: driver.id,
            name: driver.name,
            phone: driver.phone,
            onboarded_on: driver.onboarded_on,
            total_trips: details.len() as i64,
            total_earnings: merge::total_earnings(&details),
            average_rating: merge::average_rating(&details),
            trips: details,
        };

        self.observer
            .record(STRATEGY_FAN_OUT, driver_id, started.elapsed());
        Ok(analytics)
    }
}

/// Joined strategy: the store does the aggregation
///
/// One aggregate query produces the driver fields with trip count and
/// earnings sum; a second left-joined query produces the capped detail
/// rows. The average rating is computed here from the detail rows with the
/// same exclusion rule the fan-out path uses.
pub struct JoinedSource<S> {
    store: Arc<S>,
    trip_limit: i64,
    query_timeout: Duration,
    observer: Arc<dyn QueryObserver>,
}

impl<S: DriverStore> JoinedSource<S> {
    pub fn new(
        store: Arc<S>,
        trip_limit: i64,
        query_timeout: Duration,
        observer: Arc<dyn QueryObserver>,
    ) -> Self {
        Self {
            store,
            trip_limit,
            query_timeout,
            observer,
        }
    }
}

#[async_trait]
impl<S: DriverStore> AnalyticsSource for JoinedSource<S> {
    fn strategy(&self) -> &'static str {
        STRATEGY_JOINED
    }

    async fn driver_analytics(&self, driver_id: i64) -> Result<DriverAnalytics, AnalyticsError> {
        if driver_id <= 0 {
            return Err(AnalyticsError::InvalidArgument);
        }
        let started = Instant::now();

        let totals = bounded(
            self.query_timeout,
            self.store.driver_totals(driver_id, self.trip_limit),
        )
        .await?
        .ok_or(AnalyticsError::NotFound)?;

        let rows = bounded(
            self.query_timeout,
            self.store.recent_trip_details(driver_id, self.trip_limit),
        )
        .await?;
        let details: Vec<_> = rows.into_iter().map(merge::detail_from_row).collect();

        let analytics = DriverAnalytics {
            id: totals.id,
            name: totals.name,
            phone: totals.phone,
            onboarded_on: totals.onboarded_on,
            total_trips: totals.total_trips,
            total_earnings: totals.total_earnings,
            average_rating: merge::average_rating(&details),
            trips: details,
        };

        self.observer
            .record(STRATEGY_JOINED, driver_id, started.elapsed());
        Ok(analytics)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::data::types::{
        DriverRow, DriverTotalsRow, PaymentRow, RatingRow, TripDetailRow, TripRow,
    };

    use super::*;

    /// In-memory store mirroring the SQL semantics of the real backend
    #[derive(Default)]
    struct MemoryStore {
        drivers: Vec<DriverRow>,
        trips: Vec<TripRow>,
        payments: Vec<PaymentRow>,
        ratings: Vec<RatingRow>,
        calls: AtomicUsize,
        keyed_lookup_calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl MemoryStore {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn keyed_lookup_calls(&self) -> usize {
            self.keyed_lookup_calls.load(Ordering::SeqCst)
        }

        async fn track(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }

        fn sorted_trips(&self, driver_id: i64, limit: i64) -> Vec<TripRow> {
            let mut trips: Vec<TripRow> = self
                .trips
                .iter()
                .filter(|t| t.driver_id == driver_id)
                .cloned()
                .collect();
            trips.sort_by(|a, b| b.trip_date.cmp(&a.trip_date).then(b.id.cmp(&a.id)));
            trips.truncate(limit as usize);
            trips
        }
    }

    #[async_trait]
    impl DriverStore for MemoryStore {
        async fn driver(&self, driver_id: i64) -> Result<Option<DriverRow>, StoreError> {
            self.track().await;
            Ok(self.drivers.iter().find(|d| d.id == driver_id).cloned())
        }

        async fn trips_for_driver(
            &self,
            driver_id: i64,
            limit: i64,
        ) -> Result<Vec<TripRow>, StoreError> {
            self.track().await;
            Ok(self.sorted_trips(driver_id, limit))
        }

        async fn payments_for_trips(
            &self,
            trip_ids: &[i64],
        ) -> Result<Vec<PaymentRow>, StoreError> {
            self.track().await;
            self.keyed_lookup_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .payments
                .iter()
                .filter(|p| trip_ids.contains(&p.trip_id))
                .cloned()
                .collect())
        }

        async fn ratings_for_trips(&self, trip_ids: &[i64]) -> Result<Vec<RatingRow>, StoreError> {
            self.track().await;
            self.keyed_lookup_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .ratings
                .iter()
                .filter(|r| trip_ids.contains(&r.trip_id))
                .cloned()
                .collect())
        }

        async fn driver_totals(
            &self,
            driver_id: i64,
            limit: i64,
        ) -> Result<Option<DriverTotalsRow>, StoreError> {
            self.track().await;
            let Some(driver) = self.drivers.iter().find(|d| d.id == driver_id) else {
                return Ok(None);
            };
            let trips = self.sorted_trips(driver_id, limit);
            let trip_ids: Vec<i64> = trips.iter().map(|t| t.id).collect();
            let total_earnings = self
                .payments
                .iter()
                .filter(|p| trip_ids.contains(&p.trip_id))
                .map(|p| p.amount)
                .sum();
            Ok(Some(DriverTotalsRow {
                id: driver.id,
                name: driver.name.clone(),
                phone: driver.phone.clone(),
                onboarded_on: driver.onboarded_on,
                total_trips: trips.len() as i64,
                total_earnings,
            }))
        }

        async fn recent_trip_details(
            &self,
            driver_id: i64,
            limit: i64,
        ) -> Result<Vec<TripDetailRow>, StoreError> {
            self.track().await;
            let payments: HashMap<i64, Decimal> = self
                .payments
                .iter()
                .map(|p| (p.trip_id, p.amount))
                .collect();
            let ratings: HashMap<i64, &RatingRow> =
                self.ratings.iter().map(|r| (r.trip_id, r)).collect();
            Ok(self
                .sorted_trips(driver_id, limit)
                .into_iter()
                .map(|t| TripDetailRow {
                    trip_id: t.id,
                    start_location: t.start_location,
                    end_location: t.end_location,
                    trip_date: t.trip_date,
                    amount: payments.get(&t.id).copied(),
                    rating: ratings.get(&t.id).map(|r| r.rating),
                    comment: ratings.get(&t.id).map(|r| r.comment.clone()),
                })
                .collect())
        }
    }

    /// Store whose every read fails
    struct BrokenStore;

    #[async_trait]
    impl DriverStore for BrokenStore {
        async fn driver(&self, _: i64) -> Result<Option<DriverRow>, StoreError> {
            Err(StoreError::Config("connection refused".to_string()))
        }
        async fn trips_for_driver(&self, _: i64, _: i64) -> Result<Vec<TripRow>, StoreError> {
            Err(StoreError::Config("connection refused".to_string()))
        }
        async fn payments_for_trips(&self, _: &[i64]) -> Result<Vec<PaymentRow>, StoreError> {
            Err(StoreError::Config("connection refused".to_string()))
        }
        async fn ratings_for_trips(&self, _: &[i64]) -> Result<Vec<RatingRow>, StoreError> {
            Err(StoreError::Config("connection refused".to_string()))
        }
        async fn driver_totals(
            &self,
            _: i64,
            _: i64,
        ) -> Result<Option<DriverTotalsRow>, StoreError> {
            Err(StoreError::Config("connection refused".to_string()))
        }
        async fn recent_trip_details(
            &self,
            _: i64,
            _: i64,
        ) -> Result<Vec<TripDetailRow>, StoreError> {
            Err(StoreError::Config("connection refused".to_string()))
        }
    }

    struct NullObserver;

    impl QueryObserver for NullObserver {
        fn record(&self, _: &'static str, _: i64, _: Duration) {}
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    /// Driver 1: three trips, two paid (150 + 200), two rated (4.5, 4.0).
    /// Driver 2: no trips. Driver 3: trips but nothing paid or rated.
    fn sample_store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore {
            drivers: vec![
                DriverRow {
                    id: 1,
                    name: "Ada Okafor".to_string(),
                    phone: "555-0101".to_string(),
                    onboarded_on: date(1),
                },
                DriverRow {
                    id: 2,
                    name: "Ben Hale".to_string(),
                    phone: "555-0102".to_string(),
                    onboarded_on: date(2),
                },
                DriverRow {
                    id: 3,
                    name: "Caro Lund".to_string(),
                    phone: "555-0103".to_string(),
                    onboarded_on: date(3),
                },
            ],
            trips: vec![
                TripRow {
                    id: 10,
                    driver_id: 1,
                    start_location: "Downtown".to_string(),
                    end_location: "Airport".to_string(),
                    trip_date: date(5),
                },
                TripRow {
                    id: 11,
                    driver_id: 1,
                    start_location: "Airport".to_string(),
                    end_location: "Harbor".to_string(),
                    trip_date: date(10),
                },
                TripRow {
                    id: 12,
                    driver_id: 1,
                    start_location: "Harbor".to_string(),
                    end_location: "Midtown".to_string(),
                    trip_date: date(15),
                },
                TripRow {
                    id: 30,
                    driver_id: 3,
                    start_location: "Midtown".to_string(),
                    end_location: "Downtown".to_string(),
                    trip_date: date(7),
                },
            ],
            payments: vec![
                PaymentRow {
                    id: 100,
                    trip_id: 10,
                    amount: dec("150.00"),
                },
                PaymentRow {
                    id: 101,
                    trip_id: 11,
                    amount: dec("200.00"),
                },
            ],
            ratings: vec![
                RatingRow {
                    id: 1000,
                    trip_id: 10,
                    rating: dec("4.5"),
                    comment: "Great ride".to_string(),
                },
                RatingRow {
                    id: 1001,
                    trip_id: 11,
                    rating: dec("4.0"),
                    comment: String::new(),
                },
            ],
            ..Default::default()
        })
    }

    fn fan_out(store: Arc<MemoryStore>) -> FanOutSource<MemoryStore> {
        FanOutSource::new(store, 50, Duration::from_secs(5), Arc::new(NullObserver))
    }

    fn joined(store: Arc<MemoryStore>) -> JoinedSource<MemoryStore> {
        JoinedSource::new(store, 50, Duration::from_secs(5), Arc::new(NullObserver))
    }

    #[tokio::test]
    async fn test_fan_out_happy_path() {
        let analytics = fan_out(sample_store()).driver_analytics(1).await.unwrap();

        assert_eq!(analytics.id, 1);
        assert_eq!(analytics.name, "Ada Okafor");
        assert_eq!(analytics.total_trips, 3);
        assert_eq!(analytics.total_earnings, dec("350.00"));
        assert_eq!(analytics.average_rating, dec("4.25"));
        // Most recent first
        assert_eq!(
            analytics.trips.iter().map(|t| t.trip_id).collect::<Vec<_>>(),
            vec![12, 11, 10]
        );
        // Unpaid, unrated trip is normalized, not dropped
        assert_eq!(analytics.trips[0].amount, Decimal::ZERO);
        assert_eq!(analytics.trips[0].rating, Decimal::ZERO);
        assert_eq!(analytics.trips[0].comment, "");
    }

    #[tokio::test]
    async fn test_joined_happy_path() {
        let analytics = joined(sample_store()).driver_analytics(1).await.unwrap();

        assert_eq!(analytics.total_trips, 3);
        assert_eq!(analytics.total_earnings, dec("350.00"));
        assert_eq!(analytics.average_rating, dec("4.25"));
        assert_eq!(
            analytics.trips.iter().map(|t| t.trip_id).collect::<Vec<_>>(),
            vec![12, 11, 10]
        );
    }

    #[tokio::test]
    async fn test_strategies_agree() {
        let store = sample_store();
        for driver_id in [1, 2, 3] {
            let a = fan_out(store.clone())
                .driver_analytics(driver_id)
                .await
                .unwrap();
            let b = joined(store.clone())
                .driver_analytics(driver_id)
                .await
                .unwrap();
            assert_eq!(a, b, "strategies disagree for driver {driver_id}");
        }
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let source = fan_out(sample_store());
        let first = source.driver_analytics(1).await.unwrap();
        let second = source.driver_analytics(1).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_driver_with_no_trips() {
        let store = sample_store();
        let analytics = fan_out(store.clone()).driver_analytics(2).await.unwrap();

        assert_eq!(analytics.total_trips, 0);
        assert_eq!(analytics.total_earnings, Decimal::ZERO);
        assert_eq!(analytics.average_rating, Decimal::ZERO);
        assert!(analytics.trips.is_empty());
        // Keyed lookups never run when there is nothing to key them on
        assert_eq!(store.keyed_lookup_calls(), 0);
    }

    #[tokio::test]
    async fn test_driver_with_no_ratings() {
        let analytics = fan_out(sample_store()).driver_analytics(3).await.unwrap();
        assert_eq!(analytics.total_trips, 1);
        assert_eq!(analytics.total_earnings, Decimal::ZERO);
        assert_eq!(analytics.average_rating, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_unknown_driver_not_found() {
        let store = sample_store();
        let fan_out_err = fan_out(store.clone()).driver_analytics(99).await;
        let joined_err = joined(store).driver_analytics(99).await;
        assert!(matches!(fan_out_err, Err(AnalyticsError::NotFound)));
        assert!(matches!(joined_err, Err(AnalyticsError::NotFound)));
    }

    #[tokio::test]
    async fn test_invalid_id_rejected_before_store_access() {
        let store = sample_store();
        for driver_id in [0, -5] {
            let fan_out_err = fan_out(store.clone()).driver_analytics(driver_id).await;
            let joined_err = joined(store.clone()).driver_analytics(driver_id).await;
            assert!(matches!(fan_out_err, Err(AnalyticsError::InvalidArgument)));
            assert!(matches!(joined_err, Err(AnalyticsError::InvalidArgument)));
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_trip_limit_caps_details() {
        let store = sample_store();
        let source = FanOutSource::new(
            store,
            2,
            Duration::from_secs(5),
            Arc::new(NullObserver),
        );
        let analytics = source.driver_analytics(1).await.unwrap();
        assert_eq!(analytics.total_trips, 2);
        assert_eq!(
            analytics.trips.iter().map(|t| t.trip_id).collect::<Vec<_>>(),
            vec![12, 11]
        );
    }

    #[tokio::test]
    async fn test_strategies_agree_above_trip_limit() {
        // Driver 1 has 3 trips; a limit of 2 forces both strategies to
        // aggregate over the same capped window
        let store = sample_store();
        let a = FanOutSource::new(
            store.clone(),
            2,
            Duration::from_secs(5),
            Arc::new(NullObserver),
        )
        .driver_analytics(1)
        .await
        .unwrap();
        let b = JoinedSource::new(store, 2, Duration::from_secs(5), Arc::new(NullObserver))
            .driver_analytics(1)
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total_trips, 2);
        // Only trip 11 (200.00) in the window is paid; trip 10 falls outside
        assert_eq!(a.total_earnings, dec("200.00"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_times_out() {
        let store = Arc::new(MemoryStore {
            delay: Some(Duration::from_millis(100)),
            ..Default::default()
        });
        let source = FanOutSource::new(
            store,
            50,
            Duration::from_millis(10),
            Arc::new(NullObserver),
        );
        let result = source.driver_analytics(1).await;
        assert!(matches!(result, Err(AnalyticsError::Timeout)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = Arc::new(BrokenStore);
        let source = FanOutSource::new(
            store.clone(),
            50,
            Duration::from_secs(5),
            Arc::new(NullObserver),
        );
        assert!(matches!(
            source.driver_analytics(1).await,
            Err(AnalyticsError::Store(_))
        ));

        let source = JoinedSource::new(store, 50, Duration::from_secs(5), Arc::new(NullObserver));
        assert!(matches!(
            source.driver_analytics(1).await,
            Err(AnalyticsError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_observer_records_successful_queries() {
        struct Recording(std::sync::Mutex<Vec<(&'static str, i64)>>);
        impl QueryObserver for Recording {
            fn record(&self, strategy: &'static str, driver_id: i64, _: Duration) {
                self.0.lock().unwrap().push((strategy, driver_id));
            }
        }

        let observer = Arc::new(Recording(std::sync::Mutex::new(Vec::new())));
        let source = FanOutSource::new(
            sample_store(),
            50,
            Duration::from_secs(5),
            observer.clone(),
        );

        source.driver_analytics(1).await.unwrap();
        let _ = source.driver_analytics(99).await;

        // Only the successful query is recorded
        let records = observer.0.lock().unwrap();
        assert_eq!(*records, vec![(STRATEGY_FAN_OUT, 1)]);
    }
}
