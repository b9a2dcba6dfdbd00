use sqlx::{query, query_scalar, SqliteConnection};

use crate::db::models::ForecastRowParams;

/// Inserts decorated forecast rows; no deduplication is performed.
pub async fn insert_forecast_rows(
    conn: &mut SqliteConnection,
    rows: &[ForecastRowParams],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;

    for row in rows {
        inserted += query(
            "INSERT INTO weather_data (office_code, date, weather_code, weather_icon, weather_text) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&row.office_code)
        .bind(&row.date)
        .bind(&row.weather_code)
        .bind(&row.weather_icon)
        .bind(&row.weather_text)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    }

    Ok(inserted)
}

pub async fn count_rows(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM weather_data")
        .fetch_one(&mut *conn)
        .await
}

/// Rows for one office in insertion order
#[cfg(test)]
pub(crate) async fn rows_for_office(
    conn: &mut SqliteConnection,
    office_code: &str,
) -> Result<Vec<crate::db::models::StoredForecastRow>, sqlx::Error> {
    sqlx::query_as::<_, crate::db::models::StoredForecastRow>(
        "SELECT id, office_code, date, weather_code, weather_icon, weather_text \
         FROM weather_data WHERE office_code = ? ORDER BY id",
    )
    .bind(office_code)
    .fetch_all(&mut *conn)
    .await
}
