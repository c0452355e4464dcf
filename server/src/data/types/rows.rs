//! Typed row records for the four source relations and the joined reads

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A driver record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DriverRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub onboarded_on: NaiveDate,
}

/// A trip record; many per driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TripRow {
    pub id: i64,
    pub driver_id: i64,
    pub start_location: String,
    pub end_location: String,
    pub trip_date: NaiveDate,
}

/// A payment record; zero or one per trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PaymentRow {
    pub id: i64,
    pub trip_id: i64,
    pub amount: Decimal,
}

/// A rating record; zero or one per trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RatingRow {
    pub id: i64,
    pub trip_id: i64,
    pub rating: Decimal,
    pub comment: String,
}

/// Driver fields plus store-side COUNT/SUM aggregates (joined strategy)
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DriverTotalsRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub onboarded_on: NaiveDate,
    pub total_trips: i64,
    pub total_earnings: Decimal,
}

/// One trip with its left-joined payment and rating (joined strategy)
///
/// `amount`, `rating` and `comment` are `None` when the trip has no
/// payment or rating row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TripDetailRow {
    pub trip_id: i64,
    pub start_location: String,
    pub end_location: String,
    pub trip_date: NaiveDate,
    pub amount: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub comment: Option<String>,
}
