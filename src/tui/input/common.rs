use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::task_list::AddOutcome;
use crate::tui::app::App;

/// Terminals disagree on whether Shift+f arrives as `f`+SHIFT or `F`+SHIFT.
/// Normalize to the uppercase character.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

/// Ctrl-C quits from every mode
pub(super) fn is_force_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// The character a key press types into a text field, if any
pub(super) fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

/// Flip completion of the task under the cursor
pub(super) fn toggle_selected(app: &mut App) {
    let Some(task) = app.selected_task() else {
        return;
    };
    if let Err(e) = app.tasks.toggle_completion(&task) {
        app.set_error(format!("toggle failed: {}", e));
    }
    app.refresh_view();
}

/// Delete the task under the cursor
pub(super) fn delete_selected(app: &mut App) {
    let Some(task) = app.selected_task() else {
        return;
    };
    match app.tasks.delete_task(&task) {
        Ok(()) => app.set_info(format!("deleted: {}", task.description)),
        Err(e) => app.set_error(format!("delete failed: {}", e)),
    }
    app.refresh_view();
}

/// Hand the add-form draft to the task list and report the outcome
pub(super) fn submit_new_task(app: &mut App, draft: &str) {
    match app.tasks.add_task(draft) {
        Ok(AddOutcome::Added { .. }) => app.set_info("task added"),
        Ok(AddOutcome::AddedWithoutId) => {
            app.set_info("task added, but the store did not report an id")
        }
        Ok(AddOutcome::Rejected) => {}
        Err(e) => app.set_error(format!("add failed: {}", e)),
    }
    app.refresh_view();
}
