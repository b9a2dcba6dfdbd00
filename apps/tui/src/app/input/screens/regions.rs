use crate::app::input::screens::move_cursor;
use crate::app::state::{App, AppScreen, RegionRow};
use crossterm::event::KeyCode;

pub fn handle_regions_input(app: &mut App, key: KeyCode) {
    let total_rows = app.visible_rows().len();
    if move_cursor(&mut app.selected_row, total_rows, key) {
        return;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Right => match app.selected_region_row() {
            Some(RegionRow::Center(center)) => app.set_expanded(center, true),
            Some(RegionRow::Office { .. }) => app.activate_selected(),
            None => {}
        },
        KeyCode::Left => app.collapse_selected(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Tab => {
            app.screen = AppScreen::Subdivisions;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{test_app, test_config};

    #[test]
    fn test_navigation_and_selection() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = test_app(test_config("http://127.0.0.1:9", None))?;

        handle_regions_input(&mut app, KeyCode::Right);
        assert_eq!(app.visible_rows().len(), 4);

        handle_regions_input(&mut app, KeyCode::Down);
        handle_regions_input(&mut app, KeyCode::Enter);
        assert_eq!(app.pending_office.as_deref(), Some("020000"));

        handle_regions_input(&mut app, KeyCode::Up);
        handle_regions_input(&mut app, KeyCode::Up);
        assert_eq!(app.selected_row, 3);

        handle_regions_input(&mut app, KeyCode::Home);
        handle_regions_input(&mut app, KeyCode::Left);
        assert_eq!(app.visible_rows().len(), 2);
        Ok(())
    }

    #[test]
    fn test_tab_and_quit() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = test_app(test_config("http://127.0.0.1:9", None))?;

        handle_regions_input(&mut app, KeyCode::Tab);
        assert_eq!(app.screen, AppScreen::Subdivisions);

        handle_regions_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
        Ok(())
    }
}
