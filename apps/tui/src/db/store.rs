use sqlx::Connection;

use crate::db::migrations::open_connection;
use crate::db::models::ForecastRowParams;
use crate::db::queries::{count_rows, insert_forecast_rows};
use crate::domain::ForecastDay;
use crate::error::AppError;

/// Append-only store of decorated forecast rows.
///
/// A connection is opened for each call and closed before returning.
#[derive(Debug, Clone)]
pub struct ForecastStore {
    database_url: String,
}

impl ForecastStore {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Inserts one row per day in a single transaction and returns the count.
    #[tracing::instrument(skip(self, days), fields(days = days.len()), level = "info")]
    pub async fn append(&self, office_code: &str, days: &[ForecastDay]) -> Result<u64, AppError> {
        let rows: Vec<ForecastRowParams> = days
            .iter()
            .map(|day| ForecastRowParams::decorate(office_code, day))
            .collect();

        let mut conn = open_connection(&self.database_url).await?;
        let mut tx = conn.begin().await?;
        let inserted = insert_forecast_rows(&mut tx, &rows).await?;
        tx.commit().await?;
        conn.close().await?;

        tracing::info!(inserted, "forecast rows stored");
        Ok(inserted)
    }

    pub async fn count_rows(&self) -> Result<i64, AppError> {
        let mut conn = open_connection(&self.database_url).await?;
        let count = count_rows(&mut conn).await?;
        conn.close().await?;
        Ok(count)
    }
}
