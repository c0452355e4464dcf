//! Data storage layer
//!
//! - `postgres` - PostgreSQL service, schema and row-level reads
//! - `cache` - In-memory and Redis caching
//! - `types` - Typed row records for the store boundary
//! - `traits` - The `DriverStore` read trait both strategies consume

pub mod cache;
pub mod postgres;
pub mod traits;
pub mod types;

pub use postgres::{PostgresService, StoreError};
pub use traits::DriverStore;
