use crate::app::input::screens::move_cursor;
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    let total_rows = app.search_results.len();
    if matches!(key, KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown) {
        move_cursor(&mut app.selected_row, total_rows, key);
        return;
    }

    match key {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => {
            app.activate_selected();
            if app.pending_office.is_some() {
                app.clear_search();
            }
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.update_search();
        }
        KeyCode::Char(ch) => {
            app.search_query.push(ch);
            app.update_search();
        }
        _ => {}
    }
}
