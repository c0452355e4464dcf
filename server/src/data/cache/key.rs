//! Type-safe cache key builder with versioning

use crate::core::constants::CACHE_KEY_VERSION;

/// Type-safe cache key builder
///
/// All keys are prefixed with a version (e.g., "v1:") to allow
/// invalidating all cached data on schema changes.
pub struct CacheKey;

impl CacheKey {
    /// Cache key for a driver's computed analytics
    pub fn driver_analytics(driver_id: i64) -> String {
        format!("{}:analytics:driver:{}", CACHE_KEY_VERSION, driver_id)
    }
}
