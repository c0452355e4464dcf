use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::CacheBackendType;
use super::constants::{
    ENV_ANALYTICS_CACHE_TTL, ENV_CACHE_BACKEND, ENV_CACHE_MAX_ENTRIES, ENV_CACHE_REDIS_URL,
    ENV_CONFIG, ENV_HOST, ENV_PORT, ENV_POSTGRES_URL, ENV_QUERY_TIMEOUT, ENV_TRIP_DETAIL_LIMIT,
};

#[derive(Parser)]
#[command(name = "ridelens")]
#[command(version, about = "Driver trip analytics service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// PostgreSQL connection URL
    #[arg(long, global = true, env = ENV_POSTGRES_URL)]
    pub postgres_url: Option<String>,

    // Cache options
    /// Cache backend (memory or redis)
    #[arg(long, global = true, env = ENV_CACHE_BACKEND, value_parser = parse_cache_backend_type)]
    pub cache_backend: Option<CacheBackendType>,

    /// Maximum number of in-memory cache entries
    #[arg(long, global = true, env = ENV_CACHE_MAX_ENTRIES)]
    pub cache_max_entries: Option<u64>,

    /// Redis-compatible cache URL (redis://host:port/db)
    #[arg(long, global = true, env = ENV_CACHE_REDIS_URL)]
    pub cache_redis_url: Option<String>,

    /// TTL for cached driver analytics, in seconds
    #[arg(long, global = true, env = ENV_ANALYTICS_CACHE_TTL)]
    pub analytics_cache_ttl_secs: Option<u64>,

    // Analytics options
    /// Maximum trip rows fetched per driver (both query strategies)
    #[arg(long, global = true, env = ENV_TRIP_DETAIL_LIMIT)]
    pub trip_detail_limit: Option<i64>,

    /// Per-query timeout for analytics reads, in seconds
    #[arg(long, global = true, env = ENV_QUERY_TIMEOUT)]
    pub query_timeout_secs: Option<u64>,
}

/// Parse cache backend type from CLI/env string
fn parse_cache_backend_type(s: &str) -> Result<CacheBackendType, String> {
    match s.to_lowercase().as_str() {
        "memory" => Ok(CacheBackendType::Memory),
        "redis" => Ok(CacheBackendType::Redis),
        _ => Err(format!(
            "Invalid cache backend '{}'. Valid options: memory, redis",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub postgres_url: Option<String>,
    pub cache_backend: Option<CacheBackendType>,
    pub cache_max_entries: Option<u64>,
    pub cache_redis_url: Option<String>,
    pub analytics_cache_ttl_secs: Option<u64>,
    pub trip_detail_limit: Option<i64>,
    pub query_timeout_secs: Option<u64>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        config: cli.config,
        postgres_url: cli.postgres_url,
        cache_backend: cli.cache_backend,
        cache_max_entries: cli.cache_max_entries,
        cache_redis_url: cli.cache_redis_url,
        analytics_cache_ttl_secs: cli.analytics_cache_ttl_secs,
        trip_detail_limit: cli.trip_detail_limit,
        query_timeout_secs: cli.query_timeout_secs,
    };
    (config, cli.command)
}
