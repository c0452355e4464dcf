//! Driver reads

use sqlx::PgPool;

use crate::data::postgres::StoreError;
use crate::data::types::DriverRow;

/// Get a driver by primary key
pub async fn get_driver(pool: &PgPool, driver_id: i64) -> Result<Option<DriverRow>, StoreError> {
    let row = sqlx::query_as::<_, DriverRow>(
        "SELECT id, name, phone, onboarded_on FROM drivers WHERE id = $1",
    )
    .bind(driver_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
