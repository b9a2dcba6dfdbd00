use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "jma_forecast", version, about = "JMA weather forecast browser")]
pub struct CliArgs {
    /// Print to stdout instead of starting the terminal UI
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Office code to fetch in headless mode (e.g. 130000)
    #[arg(long, value_name = "CODE")]
    pub office: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Area document: a local JSON file or an http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    pub area: Option<String>,

    /// Override the forecast endpoint base URL
    #[arg(long = "forecast-url", value_name = "URL")]
    pub forecast_url: Option<String>,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Do not write fetched forecasts to the database
    #[arg(long = "no-store")]
    pub no_store: bool,

    /// Override the log file used by the terminal UI
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(area) = &self.area {
            std::env::set_var("AREA_SOURCE", area);
        }
        if let Some(url) = &self.forecast_url {
            std::env::set_var("FORECAST_BASE_URL", url);
        }
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.no_store {
            std::env::set_var("STORE_FORECASTS", "0");
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headless_office() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "jma_forecast",
            "--headless",
            "--office",
            "130000",
            "--no-store",
        ])?;

        assert!(args.headless);
        assert!(args.no_store);
        assert_eq!(args.office.as_deref(), Some("130000"));
        assert!(args.area.is_none());
        Ok(())
    }
}
