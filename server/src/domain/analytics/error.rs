//! Analytics error types

use thiserror::Error;

use crate::data::postgres::StoreError;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Driver id was not a positive integer. Raised before any store access.
    #[error("Driver id must be a positive integer")]
    InvalidArgument,

    /// No driver row exists for the requested id
    #[error("Driver not found")]
    NotFound,

    /// An underlying read exceeded its deadline. The whole aggregation is
    /// read-only and idempotent, so callers may retry it as a unit.
    #[error("Analytics query timed out")]
    Timeout,

    /// Any other data-store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
