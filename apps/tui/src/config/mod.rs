#[allow(clippy::module_inception)]
mod config;

pub use config::{
    database_url_for, init_app_config, parse_flag, AppConfig, DEFAULT_AREA_SOURCE,
    DEFAULT_DATABASE_NAME, DEFAULT_LOG_FILE,
};
