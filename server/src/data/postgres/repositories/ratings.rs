//! Rating reads

use sqlx::PgPool;

use crate::data::postgres::StoreError;
use crate::data::types::RatingRow;

/// Get all ratings whose trip id is in the given set
pub async fn ratings_for_trips(
    pool: &PgPool,
    trip_ids: &[i64],
) -> Result<Vec<RatingRow>, StoreError> {
    let rows = sqlx::query_as::<_, RatingRow>(
        "SELECT id, trip_id, rating, comment FROM ratings WHERE trip_id = ANY($1)",
    )
    .bind(trip_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
