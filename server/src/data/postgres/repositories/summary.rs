//! Joined reads for the single-query strategy

use sqlx::PgPool;

use crate::data::postgres::StoreError;
use crate::data::types::{DriverTotalsRow, TripDetailRow};

/// One aggregate query joining driver, trips and payments.
///
/// The lateral subquery scopes the aggregates to the driver's most recent
/// `limit` trips, the same window `recent_trip_details` returns, so both
/// query strategies aggregate over identical rows. Payments are UNIQUE per
/// trip, so the LEFT JOIN does not fan out rows and COUNT/SUM stay exact.
/// Ratings are deliberately not joined here: the average is always
/// recomputed from the detail rows, never taken from a store-side AVG.
pub async fn driver_totals(
    pool: &PgPool,
    driver_id: i64,
    limit: i64,
) -> Result<Option<DriverTotalsRow>, StoreError> {
    let row = sqlx::query_as::<_, DriverTotalsRow>(
        r#"
        SELECT d.id, d.name, d.phone, d.onboarded_on,
               COUNT(t.id) AS total_trips,
               COALESCE(SUM(p.amount), 0) AS total_earnings
        FROM drivers d
        LEFT JOIN LATERAL (
            SELECT id
            FROM trips
            WHERE driver_id = d.id
            ORDER BY trip_date DESC, id DESC
            LIMIT $2
        ) t ON TRUE
        LEFT JOIN payments p ON p.trip_id = t.id
        WHERE d.id = $1
        GROUP BY d.id, d.name, d.phone, d.onboarded_on
        "#,
    )
    .bind(driver_id)
    .bind(limit)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Up to `limit` trips with their payment and rating joined, most recent first
pub async fn recent_trip_details(
    pool: &PgPool,
    driver_id: i64,
    limit: i64,
) -> Result<Vec<TripDetailRow>, StoreError> {
    let rows = sqlx::query_as::<_, TripDetailRow>(
        r#"
        SELECT t.id AS trip_id, t.start_location, t.end_location, t.trip_date,
               p.amount, r.rating, r.comment
        FROM trips t
        LEFT JOIN payments p ON p.trip_id = t.id
        LEFT JOIN ratings r ON r.trip_id = t.id
        WHERE t.driver_id = $1
        ORDER BY t.trip_date DESC, t.id DESC
        LIMIT $2
        "#,
    )
    .bind(driver_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
