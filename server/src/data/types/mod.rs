//! Shared data types for the store boundary
//!
//! Rows are strict typed records parsed by sqlx at the store boundary.
//! Unexpected nulls fail the query instead of silently defaulting; the
//! legitimate zero-or-one joins (payment, rating per trip) are the only
//! `Option` columns.

mod rows;

pub use rows::{DriverRow, DriverTotalsRow, PaymentRow, RatingRow, TripDetailRow, TripRow};
