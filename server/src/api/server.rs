//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::middleware;
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{drivers, health};
use crate::core::CoreApp;
use crate::domain::analytics::{
    AnalyticsSource, CachedAnalytics, FanOutSource, JoinedSource, TracingObserver,
};

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self { app } = self;

        // Clone shutdown before moving app
        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(host.parse()?, port);

        let trip_limit = app.config.analytics.trip_detail_limit;
        let query_timeout = Duration::from_secs(app.config.analytics.query_timeout_secs);
        let observer = Arc::new(TracingObserver);

        // The serving path: fan-out strategy behind the cache
        let fan_out: Arc<dyn AnalyticsSource> = Arc::new(FanOutSource::new(
            app.database.clone(),
            trip_limit,
            query_timeout,
            observer.clone(),
        ));
        let optimized: Arc<dyn AnalyticsSource> = Arc::new(CachedAnalytics::new(
            fan_out,
            app.cache.clone(),
            Duration::from_secs(app.config.cache.analytics_ttl_secs),
        ));

        // The comparison path: joined strategy, never cached
        let unoptimized: Arc<dyn AnalyticsSource> = Arc::new(JoinedSource::new(
            app.database.clone(),
            trip_limit,
            query_timeout,
            observer,
        ));

        let health_state = health::HealthApiState {
            cache: app.cache.clone(),
        };

        let router = Router::new()
            .route(
                "/api/v1/health",
                get(health::health).with_state(health_state),
            )
            .route("/api/openapi.json", get(openapi_json))
            .route("/api/docs", get(swagger_ui_html))
            .route("/api/docs/", get(swagger_ui_html))
            .nest("/drivers", drivers::routes(optimized, unoptimized))
            .fallback(middleware::handle_404)
            .layer(CompressionLayer::new())
            .layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(addr).await?;
        tracing::debug!(%addr, "API server listening");
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}
