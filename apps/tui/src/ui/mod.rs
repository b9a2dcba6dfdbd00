// UI module for jma_forecast
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Regions => screens::regions::render_regions(app, f),
        AppScreen::Subdivisions => screens::subdivisions::render_subdivisions(app, f),
    }

    if app.show_help {
        widgets::popup::render_help_popup(f, f.area());
    }
}
