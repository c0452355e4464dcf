//! `DriverStore` implementation for the PostgreSQL backend

use async_trait::async_trait;

use super::{PostgresService, StoreError, repositories};
use crate::data::traits::DriverStore;
use crate::data::types::{DriverRow, DriverTotalsRow, PaymentRow, RatingRow, TripDetailRow, TripRow};

#[async_trait]
impl DriverStore for PostgresService {
    async fn driver(&self, driver_id: i64) -> Result<Option<DriverRow>, StoreError> {
        repositories::drivers::get_driver(self.pool(), driver_id).await
    }

    async fn trips_for_driver(
        &self,
        driver_id: i64,
        limit: i64,
    ) -> Result<Vec<TripRow>, StoreError> {
        repositories::trips::trips_for_driver(self.pool(), driver_id, limit).await
    }

    async fn payments_for_trips(&self, trip_ids: &[i64]) -> Result<Vec<PaymentRow>, StoreError> {
        repositories::payments::payments_for_trips(self.pool(), trip_ids).await
    }

    async fn ratings_for_trips(&self, trip_ids: &[i64]) -> Result<Vec<RatingRow>, StoreError> {
        repositories::ratings::ratings_for_trips(self.pool(), trip_ids).await
    }

    async fn driver_totals(
        &self,
        driver_id: i64,
        limit: i64,
    ) -> Result<Option<DriverTotalsRow>, StoreError> {
        repositories::summary::driver_totals(self.pool(), driver_id, limit).await
    }

    async fn recent_trip_details(
        &self,
        driver_id: i64,
        limit: i64,
    ) -> Result<Vec<TripDetailRow>, StoreError> {
        repositories::summary::recent_trip_details(self.pool(), driver_id, limit).await
    }
}
