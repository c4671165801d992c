mod add;
mod common;
mod navigate;
mod picker;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use add::*;
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use picker::*;
#[allow(unused_imports)]
use search::*;

/// Handle a key event in the current mode.
///
/// Exactly one mode handler runs per event; the text-entry modes come first
/// so typed characters never reach the Normal bindings.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.clear_status();

    let key = normalize_key(key);
    match &app.mode {
        Mode::AddingTask { .. } => handle_add(app, key),
        Mode::PickingProject { .. } => handle_project_picker(app, key),
        Mode::Searching => handle_search(app, key),
        Mode::Normal => handle_navigate(app, key),
    }
}
