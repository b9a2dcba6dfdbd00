pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;
pub use migrations::{open_connection, setup_database};
pub use models::ForecastRowParams;
pub use store::ForecastStore;
