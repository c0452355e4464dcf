//! Driver analytics endpoints
//!
//! Two routes over the same data, one per strategy:
//!
//! - `GET /drivers/{driver_id}/analytics` - cached fan-out path
//! - `GET /drivers/{driver_id}/analytics/unoptimized` - uncached joined
//!   path, kept for side-by-side comparison
//!
//! Both return the same `DriverAnalytics` body.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::routing::get;

use crate::api::types::ApiError;
use crate::domain::analytics::{AnalyticsSource, DriverAnalytics};

#[derive(Clone)]
pub struct DriversApiState {
    /// Cache-wrapped fan-out source
    pub optimized: Arc<dyn AnalyticsSource>,
    /// Joined source, always computed fresh
    pub unoptimized: Arc<dyn AnalyticsSource>,
}

/// Build driver analytics routes
pub fn routes(
    optimized: Arc<dyn AnalyticsSource>,
    unoptimized: Arc<dyn AnalyticsSource>,
) -> axum::Router<()> {
    let state = DriversApiState {
        optimized,
        unoptimized,
    };

    axum::Router::new()
        .route("/{driver_id}/analytics", get(get_driver_analytics))
        .route(
            "/{driver_id}/analytics/unoptimized",
            get(get_driver_analytics_unoptimized),
        )
        .with_state(state)
}

/// Parse the path segment as a driver id.
///
/// Non-numeric input gets the same 400 as a non-positive id, so the
/// domain validation rule covers the whole path space.
fn parse_driver_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| {
        ApiError::bad_request("INVALID_DRIVER_ID", "Driver id must be a positive integer")
    })
}

/// Get driver analytics (optimized, cached)
#[utoipa::path(
    get,
    path = "/drivers/{driver_id}/analytics",
    tag = "drivers",
    params(
        ("driver_id" = i64, Path, description = "Driver id")
    ),
    responses(
        (status = 200, description = "Driver analytics", body = DriverAnalytics),
        (status = 400, description = "Invalid driver id"),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn get_driver_analytics(
    State(state): State<DriversApiState>,
    Path(driver_id): Path<String>,
) -> Result<Json<DriverAnalytics>, ApiError> {
    let driver_id = parse_driver_id(&driver_id)?;
    let analytics = state
        .optimized
        .driver_analytics(driver_id)
        .await
        .map_err(ApiError::from_analytics)?;
    Ok(Json(analytics))
}

/// Get driver analytics (unoptimized, uncached)
#[utoipa::path(
    get,
    path = "/drivers/{driver_id}/analytics/unoptimized",
    tag = "drivers",
    params(
        ("driver_id" = i64, Path, description = "Driver id")
    ),
    responses(
        (status = 200, description = "Driver analytics", body = DriverAnalytics),
        (status = 400, description = "Invalid driver id"),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn get_driver_analytics_unoptimized(
    State(state): State<DriversApiState>,
    Path(driver_id): Path<String>,
) -> Result<Json<DriverAnalytics>, ApiError> {
    let driver_id = parse_driver_id(&driver_id)?;
    let analytics = state
        .unoptimized
        .driver_analytics(driver_id)
        .await
        .map_err(ApiError::from_analytics)?;
    Ok(Json(analytics))
}
