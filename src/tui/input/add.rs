use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::*;

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    let Mode::AddingTask { draft } = &mut app.mode else {
        return;
    };

    // Quitting mid-draft discards the draft
    if is_force_quit(&key) {
        app.mode = Mode::Normal;
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Enter => {
            let text = std::mem::take(draft);
            app.mode = Mode::Normal;
            if !text.trim().is_empty() {
                submit_new_task(app, &text);
            }
        }
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Backspace => unicode::pop_grapheme(draft),
        _ => {
            if let Some(c) = typed_char(&key) {
                draft.push(c);
            }
        }
    }
}
