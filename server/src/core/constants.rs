// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "RideLens";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "ridelens";

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "RIDELENS_CONFIG";

/// Environment variable for server host
pub const ENV_HOST: &str = "RIDELENS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "RIDELENS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "RIDELENS_LOG";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5480;

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// PostgreSQL connection URL
pub const ENV_POSTGRES_URL: &str = "RIDELENS_POSTGRES_URL";

// =============================================================================
// PostgreSQL Pool Defaults
// =============================================================================

pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Environment Variables - Cache
// =============================================================================

/// Cache backend selector (memory or redis)
pub const ENV_CACHE_BACKEND: &str = "RIDELENS_CACHE_BACKEND";

/// Maximum number of in-memory cache entries
pub const ENV_CACHE_MAX_ENTRIES: &str = "RIDELENS_CACHE_MAX_ENTRIES";

/// Redis-compatible cache URL
pub const ENV_CACHE_REDIS_URL: &str = "RIDELENS_CACHE_REDIS_URL";

/// TTL for cached driver analytics, in seconds
pub const ENV_ANALYTICS_CACHE_TTL: &str = "RIDELENS_ANALYTICS_CACHE_TTL_SECS";

// =============================================================================
// Cache Defaults
// =============================================================================

/// Default maximum in-memory cache entries
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

/// Default TTL for cached driver analytics (seconds)
pub const CACHE_TTL_ANALYTICS: u64 = 300;

/// Version prefix for all cache keys. Bump to invalidate all cached data
/// after a schema or serialization change.
pub const CACHE_KEY_VERSION: &str = "v1";

// =============================================================================
// Environment Variables - Analytics
// =============================================================================

/// Maximum trip rows fetched per driver (applies to both query strategies)
pub const ENV_TRIP_DETAIL_LIMIT: &str = "RIDELENS_TRIP_DETAIL_LIMIT";

/// Per-query timeout for analytics reads, in seconds
pub const ENV_QUERY_TIMEOUT: &str = "RIDELENS_QUERY_TIMEOUT_SECS";

// =============================================================================
// Analytics Defaults
// =============================================================================

/// Default cap on trip detail rows per driver
pub const DEFAULT_TRIP_DETAIL_LIMIT: i64 = 50;

/// Default per-query timeout (seconds)
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;
