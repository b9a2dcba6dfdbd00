use crate::app::input::screens::move_cursor;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_subdivisions_input(app: &mut App, key: KeyCode) {
    let total_rows = app.subdivisions.len();
    if move_cursor(&mut app.selected_subdivision, total_rows, key) {
        return;
    }

    match key {
        KeyCode::Tab | KeyCode::Esc => {
            app.screen = AppScreen::Regions;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
