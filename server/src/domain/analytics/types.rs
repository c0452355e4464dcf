//! Analytics result types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::data::types::DriverRow;

/// One trip with its payment and rating folded in
///
/// Absent payment or rating rows are normalized at assembly time: a trip
/// with no payment carries `amount` 0, a trip with no rating carries
/// `rating` 0 and an empty `comment`. A `rating` of 0 therefore means
/// "unrated" and is excluded from `DriverAnalytics::average_rating`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TripDetail {
    pub trip_id: i64,
    pub start_location: String,
    pub end_location: String,
    pub trip_date: NaiveDate,
    #[schema(value_type = String, example = "150.00")]
    pub amount: Decimal,
    #[schema(value_type = String, example = "4.50")]
    pub rating: Decimal,
    pub comment: String,
}

/// Aggregated analytics snapshot for one driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DriverAnalytics {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub onboarded_on: NaiveDate,
    pub total_trips: i64,
    /// Sum of payment amounts over the included trips
    #[schema(value_type = String, example = "350.00")]
    pub total_earnings: Decimal,
    /// Mean of ratings over rated trips only, rounded to 2 decimal places.
    /// 0 when no trip has a rating.
    #[schema(value_type = String, example = "4.25")]
    pub average_rating: Decimal,
    /// Most recent trips first
    pub trips: Vec<TripDetail>,
}

impl DriverAnalytics {
    /// Snapshot for a driver with no trips
    pub fn empty(driver: DriverRow) -> Self {
        Self {
            id: driver.id,
            name: driver.name,
            phone: driver.phone,
            onboarded_on: driver.onboarded_on,
            total_trips: 0,
            total_earnings: Decimal::ZERO,
            average_rating: Decimal::ZERO,
            trips: Vec::new(),
        }
    }
}
