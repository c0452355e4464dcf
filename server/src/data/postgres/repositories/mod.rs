//! Row-level read operations, one module per relation

pub mod drivers;
pub mod payments;
pub mod ratings;
pub mod summary;
pub mod trips;
