use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::area::AreaSource;
use crate::forecast::DEFAULT_FORECAST_BASE_URL;

/// Local area document used when `AREA_SOURCE` is not set.
pub const DEFAULT_AREA_SOURCE: &str = "jma/area.json";
pub const DEFAULT_DATABASE_NAME: &str = "weather.db";
pub const DEFAULT_LOG_FILE: &str = "jma_forecast.log";

/// Runtime settings resolved from `.env`, the environment and CLI overrides.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub area_source: AreaSource,
    pub forecast_base_url: String,
    pub forecast_timeout: Option<Duration>,
    pub database_url: String,
    pub store_enabled: bool,
    pub log_file: PathBuf,
    pub debug: bool,
}

/// Initializes the application configuration
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir: PathBuf = env::current_dir()?;

    let area_source = AreaSource::parse(
        &env::var("AREA_SOURCE").unwrap_or_else(|_| DEFAULT_AREA_SOURCE.to_string()),
    );
    let forecast_base_url =
        env::var("FORECAST_BASE_URL").unwrap_or_else(|_| DEFAULT_FORECAST_BASE_URL.to_string());

    let forecast_timeout = match env::var("FORECAST_TIMEOUT_SECS") {
        Ok(value) => Some(parse_timeout(&value)?),
        Err(_) => None,
    };

    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());
    let database_url = database_url_for(&base_dir.join(&db_name))?;

    let store_enabled = env::var("STORE_FORECASTS").map_or(true, |value| parse_flag(&value));
    let debug = env::var("DEBUG").is_ok_and(|value| parse_flag(&value));
    let log_file = env::var("LOG_FILE").map_or_else(|_| base_dir.join(DEFAULT_LOG_FILE), PathBuf::from);

    Ok(AppConfig {
        area_source,
        forecast_base_url,
        forecast_timeout,
        database_url,
        store_enabled,
        log_file,
        debug,
    })
}

/// Formats a database path as a SQLx SQLite URL.
///
/// SQLx expects three slashes for absolute paths (`sqlite:///abs/file.db`)
/// and two for relative ones (`sqlite://rel/file.db`).
pub fn database_url_for(database_path: &Path) -> color_eyre::eyre::Result<String> {
    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;

    // Strip any leading slashes from the path to avoid double slashes
    let clean_path = path_str.trim_start_matches('/');

    if database_path.is_absolute() {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}

/// `1`, `true`, `yes` and `on` (any case) are truthy.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_timeout(value: &str) -> color_eyre::eyre::Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|e| eyre!("FORECAST_TIMEOUT_SECS must be a whole number of seconds: {e}"))?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_for() -> color_eyre::eyre::Result<()> {
        assert_eq!(
            database_url_for(Path::new("/home/user/weather.db"))?,
            "sqlite:///home/user/weather.db"
        );
        assert_eq!(
            database_url_for(Path::new("data/weather.db"))?,
            "sqlite://data/weather.db"
        );
        Ok(())
    }

    #[test]
    fn test_parse_flag() {
        for truthy in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(truthy), "{truthy:?}");
        }
        for falsy in ["0", "false", "no", "off", ""] {
            assert!(!parse_flag(falsy), "{falsy:?}");
        }
    }

    #[test]
    fn test_parse_timeout() -> color_eyre::eyre::Result<()> {
        assert_eq!(parse_timeout("15")?, Duration::from_secs(15));
        assert!(parse_timeout("soon").is_err());
        Ok(())
    }
}
