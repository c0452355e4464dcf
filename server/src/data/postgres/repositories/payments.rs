//! Payment reads

use sqlx::PgPool;

use crate::data::postgres::StoreError;
use crate::data::types::PaymentRow;

/// Get all payments whose trip id is in the given set
pub async fn payments_for_trips(
    pool: &PgPool,
    trip_ids: &[i64],
) -> Result<Vec<PaymentRow>, StoreError> {
    let rows = sqlx::query_as::<_, PaymentRow>(
        "SELECT id, trip_id, amount FROM payments WHERE trip_id = ANY($1)",
    )
    .bind(trip_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
