use sqlx::{migrate::MigrateDatabase, query, Connection, Executor as _, Sqlite, SqliteConnection};

/// Creates the forecast table if it doesn't exist
pub async fn setup_database(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS weather_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            office_code TEXT NOT NULL,
            date TEXT NOT NULL,
            weather_code TEXT NOT NULL,
            weather_icon TEXT NOT NULL,
            weather_text TEXT NOT NULL
        )",
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Opens a single connection, creating the database file and schema if needed.
pub async fn open_connection(database_url: &str) -> Result<SqliteConnection, sqlx::Error> {
    if let Ok(path) = extract_db_path_from_url(database_url) {
        if let Some(parent) = std::path::Path::new(&path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tracing::debug!(dir = %parent.display(), "creating database directory");
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    if !Sqlite::database_exists(database_url).await? {
        tracing::info!(database_url, "creating database");
        Sqlite::create_database(database_url).await?;
    }

    let mut conn = SqliteConnection::connect(database_url).await?;
    conn.execute("PRAGMA synchronous = NORMAL;").await?;
    setup_database(&mut conn).await?;

    Ok(conn)
}

/// Helper function to extract the database path from a SQLite URL
pub fn extract_db_path_from_url(url: &str) -> Result<String, String> {
    if !url.starts_with("sqlite://") {
        return Err(format!("Not a valid SQLite URL: {url}"));
    }

    let path_part = url.trim_start_matches("sqlite://");
    let path_part = path_part.split('?').next().unwrap_or(path_part);

    if cfg!(windows) {
        // sqlite:///C:/path or sqlite://C:/path
        if let Some(drive_idx) = path_part.find(':') {
            if drive_idx > 0 {
                let path = path_part
                    .strip_prefix('/')
                    .map_or_else(|| path_part.to_string(), std::string::ToString::to_string);

                return Ok(path);
            }
        }
    }

    if path_part.starts_with('/') {
        return Ok(format!("/{}", path_part.trim_start_matches('/')));
    }

    Ok(path_part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_db_path_from_url() {
        assert_eq!(
            extract_db_path_from_url("sqlite:///var/lib/weather.db"),
            Ok("/var/lib/weather.db".to_string())
        );
        assert_eq!(
            extract_db_path_from_url("sqlite://weather.db"),
            Ok("weather.db".to_string())
        );
        assert_eq!(
            extract_db_path_from_url("sqlite://data/weather.db?mode=rwc"),
            Ok("data/weather.db".to_string())
        );
        assert!(extract_db_path_from_url("postgres://localhost/weather").is_err());
    }

    #[tokio::test]
    async fn test_open_connection_creates_file_and_table() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("nested").join("weather.db");
        let url = format!("sqlite://{}", db_path.display());

        let mut conn = open_connection(&url).await?;
        assert!(db_path.exists());

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'weather_data'",
        )
        .fetch_one(&mut conn)
        .await?;
        assert_eq!(tables, 1);

        // Running the schema again is a no-op.
        setup_database(&mut conn).await?;
        conn.close().await?;
        Ok(())
    }
}
