//! PostgreSQL database service
//!
//! Provides centralized database management:
//! - Connection pooling with min/max bounds
//! - Idle connection cleanup and connection lifetime cycling
//! - Query timeout protection via server-side statement_timeout
//!
//! All schema definitions and migrations are managed here.

pub mod error;
mod migrations;
pub mod repositories;
mod repository_impl;
pub mod schema;

pub use error::StoreError;
pub use sqlx::PgPool;

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::core::config::PostgresConfig;

/// PostgreSQL database service
///
/// Handles pool initialization and migrations. Should be created once at
/// server startup and shared across all modules.
pub struct PostgresService {
    pool: PgPool,
}

impl PostgresService {
    /// Initialize the database service from configuration
    pub async fn init(config: &PostgresConfig) -> Result<Self, StoreError> {
        let url = config.url.as_str();
        if url.is_empty() {
            return Err(StoreError::Config("PostgreSQL URL is required".into()));
        }

        let mut options: PgConnectOptions = url
            .parse()
            .map_err(|e| StoreError::Config(format!("Invalid PostgreSQL URL: {}", e)))?;

        // Set statement timeout at connection level for query protection
        let statement_timeout = config.statement_timeout_secs();
        if statement_timeout > 0 {
            options = options.options([("statement_timeout", format!("{}s", statement_timeout))]);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs()))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs()))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs()))
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        tracing::debug!(
            max_connections = config.max_connections(),
            min_connections = config.min_connections(),
            "PostgreSQL pool initialized"
        );

        Ok(Self { pool })
    }

    /// Access the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all pool connections
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("PostgreSQL pool closed");
    }
}
