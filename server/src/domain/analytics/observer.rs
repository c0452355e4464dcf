//! Query observation hooks
//!
//! Sources report each successful aggregation through an injected
//! `QueryObserver`, keeping timing concerns out of the query paths and
//! letting tests substitute a recording fake.

use std::time::Duration;

/// Receives one record per completed aggregation
pub trait QueryObserver: Send + Sync {
    fn record(&self, strategy: &'static str, driver_id: i64, elapsed: Duration);
}

/// Default observer that emits a structured log line per query
pub struct TracingObserver;

impl QueryObserver for TracingObserver {
    fn record(&self, strategy: &'static str, driver_id: i64, elapsed: Duration) {
        tracing::debug!(
            strategy,
            driver_id,
            elapsed_ms = elapsed.as_millis() as u64,
            "Analytics query completed"
        );
    }
}
