use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod help;
mod regions;
mod search;
mod subdivisions;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.search_active && app.screen == AppScreen::Regions {
        search::handle_search_input(app, key);
        return;
    }

    match app.screen {
        AppScreen::Regions => regions::handle_regions_input(app, key),
        AppScreen::Subdivisions => subdivisions::handle_subdivisions_input(app, key),
    }
}

/// Moves a list cursor for the navigation keys shared by every list.
///
/// Returns `false` when `key` is not a navigation key.
pub(super) fn move_cursor(index: &mut usize, total_rows: usize, key: KeyCode) -> bool {
    use crate::app::input::helpers::{wrap_decrement, wrap_increment};

    match key {
        KeyCode::Up => *index = wrap_decrement(*index, total_rows),
        KeyCode::Down => *index = wrap_increment(*index, total_rows),
        KeyCode::PageUp => *index = index.saturating_sub(5),
        KeyCode::PageDown => {
            if total_rows > 0 {
                *index = (*index + 5).min(total_rows - 1);
            }
        }
        KeyCode::Home => *index = 0,
        KeyCode::End => *index = total_rows.saturating_sub(1),
        _ => return false,
    }
    true
}
