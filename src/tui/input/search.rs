use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

/// Live search: every edit re-filters the table immediately
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    if is_force_quit(&key) {
        app.should_quit = true;
        return;
    }

    match key.code {
        // Leave search mode; the typed text stays active until cleared from Normal
        KeyCode::Enter | KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.refresh_view();
        }
        KeyCode::Backspace => {
            app.tasks.pop_search_char();
            app.refresh_view();
        }
        _ => {
            if let Some(c) = typed_char(&key) {
                app.tasks.push_search_char(c);
                app.refresh_view();
            }
        }
    }
}
