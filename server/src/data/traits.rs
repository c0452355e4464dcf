//! Store traits
//!
//! `DriverStore` is the read boundary both analytics strategies work
//! against. The PostgreSQL backend implements it in
//! `postgres::repository_impl`; tests use an in-memory fake.

use async_trait::async_trait;

use super::postgres::StoreError;
use super::types::{DriverRow, DriverTotalsRow, PaymentRow, RatingRow, TripDetailRow, TripRow};

/// Read-only access to drivers, trips, payments and ratings
#[async_trait]
pub trait DriverStore: Send + Sync {
    /// Fetch a driver by primary key
    async fn driver(&self, driver_id: i64) -> Result<Option<DriverRow>, StoreError>;

    /// Fetch up to `limit` trips for a driver, most recent first
    async fn trips_for_driver(&self, driver_id: i64, limit: i64)
    -> Result<Vec<TripRow>, StoreError>;

    /// Fetch payments whose trip id is in the given set
    async fn payments_for_trips(&self, trip_ids: &[i64]) -> Result<Vec<PaymentRow>, StoreError>;

    /// Fetch ratings whose trip id is in the given set
    async fn ratings_for_trips(&self, trip_ids: &[i64]) -> Result<Vec<RatingRow>, StoreError>;

    /// One joined aggregate query: driver fields + COUNT(trips) + SUM(amount)
    /// over the driver's most recent `limit` trips
    async fn driver_totals(
        &self,
        driver_id: i64,
        limit: i64,
    ) -> Result<Option<DriverTotalsRow>, StoreError>;

    /// Up to `limit` trips with their payment/rating joined, most recent first
    async fn recent_trip_details(
        &self,
        driver_id: i64,
        limit: i64,
    ) -> Result<Vec<TripDetailRow>, StoreError>;
}
