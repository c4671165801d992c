use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

const PAGE_ROWS: isize = 10;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything but quit
    if app.show_help {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc => app.show_help = false,
            KeyCode::Char('q') => app.should_quit = true,
            _ if is_force_quit(&key) => app.should_quit = true,
            _ => {}
        }
        return;
    }

    if is_force_quit(&key) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Modes
        KeyCode::Char('/') => app.mode = Mode::Searching,
        KeyCode::Char('f') => {
            app.mode = Mode::PickingProject {
                cursor: app.tasks.filter_position(),
            };
        }
        KeyCode::Char('a') => {
            app.mode = Mode::AddingTask {
                draft: String::new(),
            };
        }

        // Filter cycling
        KeyCode::Char('F') | KeyCode::BackTab => {
            app.tasks.prev_filter();
            app.refresh_view();
        }
        KeyCode::Tab => {
            app.tasks.next_filter();
            app.refresh_view();
        }

        // Esc only clears an active search
        KeyCode::Esc => {
            if app.tasks.clear_search() {
                app.refresh_view();
            }
        }

        // Task actions
        KeyCode::Enter | KeyCode::Char(' ') => toggle_selected(app),
        KeyCode::Char('d') => delete_selected(app),
        KeyCode::Char('r') => {
            app.tasks.reload();
            app.refresh_view();
            app.set_info("reloaded");
        }
        KeyCode::Char('?') => app.show_help = true,

        _ => navigate_table(app, key),
    }
}

/// Cursor movement within the table
fn navigate_table(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::PageUp => app.move_cursor(-PAGE_ROWS),
        KeyCode::PageDown => app.move_cursor(PAGE_ROWS),
        KeyCode::Home | KeyCode::Char('g') => app.cursor_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.cursor_to_bottom(),
        _ => {}
    }
}
