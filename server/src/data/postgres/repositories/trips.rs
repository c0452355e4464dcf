//! Trip reads

use sqlx::PgPool;

use crate::data::postgres::StoreError;
use crate::data::types::TripRow;

/// Get up to `limit` trips for a driver, most recent first.
///
/// The id tiebreak keeps ordering deterministic for same-day trips.
pub async fn trips_for_driver(
    pool: &PgPool,
    driver_id: i64,
    limit: i64,
) -> Result<Vec<TripRow>, StoreError> {
    let rows = sqlx::query_as::<_, TripRow>(
        "SELECT id, driver_id, start_location, end_location, trip_date
         FROM trips
         WHERE driver_id = $1
         ORDER BY trip_date DESC, id DESC
         LIMIT $2",
    )
    .bind(driver_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
