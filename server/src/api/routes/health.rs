//! Liveness endpoint
//!
//! Always answers 200 while the process is serving; the `cache` field
//! reports whether the cache backend is reachable so a degraded Redis
//! shows up here before it shows up as slow analytics reads.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::cache::CacheService;

#[derive(Clone)]
pub struct HealthApiState {
    pub cache: Arc<CacheService>,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// "ok" or "unavailable"; a broken cache degrades reads, it does not
    /// fail them
    pub cache: &'static str,
}

/// Service liveness and cache reachability
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is serving requests", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<HealthApiState>) -> impl IntoResponse {
    let cache = match state.cache.health_check().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Cache health check failed");
            "unavailable"
        }
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            cache,
        }),
    )
}
