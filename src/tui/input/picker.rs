use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_project_picker(app: &mut App, key: KeyEvent) {
    let count = app.tasks.projects().len();
    let Mode::PickingProject { cursor } = &mut app.mode else {
        return;
    };

    if is_force_quit(&key) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => {
            *cursor = cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if *cursor + 1 < count {
                *cursor += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let chosen = app.tasks.projects().get(*cursor).cloned();
            if let Some(project) = chosen {
                app.tasks.set_filter(&project);
            }
            app.mode = Mode::Normal;
            app.refresh_view();
        }
        KeyCode::Esc => app.mode = Mode::Normal,
        _ => {}
    }
}
