use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::cli::CliConfig;
use super::constants::{
    CACHE_TTL_ANALYTICS, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_TRIP_DETAIL_LIMIT, POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS,
    POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS, POSTGRES_DEFAULT_MAX_CONNECTIONS,
    POSTGRES_DEFAULT_MAX_LIFETIME_SECS, POSTGRES_DEFAULT_MIN_CONNECTIONS,
    POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
};

// =============================================================================
// Cache Backend Enum
// =============================================================================

/// Cache backend type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendType {
    #[default]
    Memory,
    Redis,
}

impl fmt::Display for CacheBackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheBackendType::Memory => write!(f, "memory"),
            CacheBackendType::Redis => write!(f, "redis"),
        }
    }
}

// =============================================================================
// Config Sections
// =============================================================================

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// PostgreSQL connection configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostgresConfig {
    /// Connection URL (required)
    #[serde(default)]
    pub url: String,
    /// Maximum pool connections (0 = default)
    #[serde(default)]
    pub max_connections: u32,
    /// Minimum pool connections kept warm (0 = default)
    #[serde(default)]
    pub min_connections: u32,
    /// Timeout acquiring a connection from the pool (0 = default)
    #[serde(default)]
    pub acquire_timeout_secs: u64,
    /// Idle timeout before a connection is released (0 = default)
    #[serde(default)]
    pub idle_timeout_secs: u64,
    /// Maximum connection lifetime (0 = default)
    #[serde(default)]
    pub max_lifetime_secs: u64,
    /// Server-side statement timeout (0 = default)
    #[serde(default)]
    pub statement_timeout_secs: u64,
}

impl PostgresConfig {
    pub fn max_connections(&self) -> u32 {
        nonzero_or(self.max_connections, POSTGRES_DEFAULT_MAX_CONNECTIONS)
    }

    pub fn min_connections(&self) -> u32 {
        nonzero_or(self.min_connections, POSTGRES_DEFAULT_MIN_CONNECTIONS)
    }

    pub fn acquire_timeout_secs(&self) -> u64 {
        nonzero_or(
            self.acquire_timeout_secs,
            POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )
    }

    pub fn idle_timeout_secs(&self) -> u64 {
        nonzero_or(self.idle_timeout_secs, POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS)
    }

    pub fn max_lifetime_secs(&self) -> u64 {
        nonzero_or(self.max_lifetime_secs, POSTGRES_DEFAULT_MAX_LIFETIME_SECS)
    }

    pub fn statement_timeout_secs(&self) -> u64 {
        nonzero_or(
            self.statement_timeout_secs,
            POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
        )
    }
}

fn nonzero_or<T: PartialEq + From<u8>>(value: T, default: T) -> T {
    if value == T::from(0) { default } else { value }
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackendType,
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: u64,
    #[serde(default)]
    pub redis_url: Option<String>,
    /// TTL for cached driver analytics, in seconds
    #[serde(default = "default_analytics_ttl")]
    pub analytics_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendType::default(),
            max_entries: default_cache_max_entries(),
            redis_url: None,
            analytics_ttl_secs: default_analytics_ttl(),
        }
    }
}

/// Analytics aggregation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// Cap on trip rows fetched per driver. Applied to both query strategies
    /// so they stay comparable for drivers above the cap.
    #[serde(default = "default_trip_detail_limit")]
    pub trip_detail_limit: i64,
    /// Per-query timeout for analytics reads, in seconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trip_detail_limit: default_trip_detail_limit(),
            query_timeout_secs: default_query_timeout(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_cache_max_entries() -> u64 {
    DEFAULT_CACHE_MAX_ENTRIES
}

fn default_analytics_ttl() -> u64 {
    CACHE_TTL_ANALYTICS
}

fn default_trip_detail_limit() -> i64 {
    DEFAULT_TRIP_DETAIL_LIMIT
}

fn default_query_timeout() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

// =============================================================================
// Application Config
// =============================================================================

/// Full application configuration
///
/// Precedence: config file < environment / CLI overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub postgres: PostgresConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    /// Load configuration from the optional config file and apply CLI overrides
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_cli(cli);

        if config.postgres.url.is_empty() {
            anyhow::bail!(
                "PostgreSQL URL is required (set RIDELENS_POSTGRES_URL or --postgres-url)"
            );
        }

        if config.cache.backend == CacheBackendType::Redis && config.cache.redis_url.is_none() {
            anyhow::bail!("redis_url is required when the cache backend is redis");
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn apply_cli(&mut self, cli: &CliConfig) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(url) = &cli.postgres_url {
            self.postgres.url = url.clone();
        }
        if let Some(backend) = cli.cache_backend {
            self.cache.backend = backend;
        }
        if let Some(max_entries) = cli.cache_max_entries {
            self.cache.max_entries = max_entries;
        }
        if let Some(url) = &cli.cache_redis_url {
            self.cache.redis_url = Some(url.clone());
        }
        if let Some(ttl) = cli.analytics_cache_ttl_secs {
            self.cache.analytics_ttl_secs = ttl;
        }
        if let Some(limit) = cli.trip_detail_limit {
            self.analytics.trip_detail_limit = limit;
        }
        if let Some(secs) = cli.query_timeout_secs {
            self.analytics.query_timeout_secs = secs;
        }
    }
}

/// Whether the host binds all interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    host == "0.0.0.0" || host == "::"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.cache.backend, CacheBackendType::Memory);
        assert_eq!(config.cache.analytics_ttl_secs, 300);
        assert_eq!(config.analytics.trip_detail_limit, 50);
        assert_eq!(config.analytics.query_timeout_secs, 5);
    }

    #[test]
    fn test_postgres_pool_fallbacks() {
        let config = PostgresConfig::default();
        assert_eq!(config.max_connections(), POSTGRES_DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.min_connections(), POSTGRES_DEFAULT_MIN_CONNECTIONS);
        assert_eq!(
            config.statement_timeout_secs(),
            POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS
        );

        let config = PostgresConfig {
            max_connections: 5,
            ..Default::default()
        };
        assert_eq!(config.max_connections(), 5);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig {
            port: Some(9000),
            postgres_url: Some("postgres://localhost/ridelens".to_string()),
            trip_detail_limit: Some(25),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.postgres.url, "postgres://localhost/ridelens");
        assert_eq!(config.analytics.trip_detail_limit, 25);
    }

    #[test]
    fn test_missing_postgres_url_rejected() {
        let cli = CliConfig::default();
        assert!(AppConfig::load(&cli).is_err());
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let cli = CliConfig {
            postgres_url: Some("postgres://localhost/ridelens".to_string()),
            cache_backend: Some(CacheBackendType::Redis),
            ..Default::default()
        };
        assert!(AppConfig::load(&cli).is_err());
    }

    #[test]
    fn test_config_file_parse() {
        let json = r#"{
            "server": {"port": 8081},
            "postgres": {"url": "postgres://db/ridelens", "max_connections": 8},
            "cache": {"backend": "memory", "analytics_ttl_secs": 60}
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.postgres.max_connections(), 8);
        assert_eq!(config.cache.analytics_ttl_secs, 60);
    }

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("::"));
        assert!(!is_all_interfaces("127.0.0.1"));
    }
}
