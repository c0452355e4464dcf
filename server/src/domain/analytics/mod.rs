//! Driver analytics aggregation
//!
//! Produces a `DriverAnalytics` snapshot for a driver id using one of two
//! interchangeable strategies behind the `AnalyticsSource` trait:
//!
//! - `JoinedSource` - one aggregate query joining the source tables plus a
//!   bounded detail query ("unoptimized").
//! - `FanOutSource` - driver and trip lookups followed by two concurrent
//!   keyed lookups (payments, ratings) merged in memory via hash maps.
//!
//! `CachedAnalytics` wraps any source with cache-aside caching.

mod cached;
mod error;
pub mod merge;
mod observer;
mod source;
mod types;

pub use cached::CachedAnalytics;
pub use error::AnalyticsError;
pub use observer::{QueryObserver, TracingObserver};
pub use source::{AnalyticsSource, FanOutSource, JoinedSource, STRATEGY_FAN_OUT, STRATEGY_JOINED};
pub use types::{DriverAnalytics, TripDetail};
