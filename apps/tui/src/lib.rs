// Export our modules for use in binaries and tests
pub mod area;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod view;
pub mod weather_codes;

pub use area::{AreaCatalog, AreaSource};
pub use domain::ForecastDay;
pub use error::AppError;
pub use forecast::ForecastClient;
pub use db::ForecastStore;
