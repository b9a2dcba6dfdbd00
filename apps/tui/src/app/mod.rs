// App module for jma_forecast
// Handles application state and the actions behind it

pub mod actions;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen, RegionRow};
