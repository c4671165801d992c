use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::Task;
use crate::ops::task_list::TaskList;
use crate::store::MemoryStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// `n` pending tasks `Task {i}` in project `p{i}`, id `t{i}`, created at `i`.
/// The newest (`Task {n-1}`) sorts first.
pub fn sample_tasks(n: usize) -> Vec<Task> {
    (0..n)
        .map(|i| Task {
            id: format!("t{}", i),
            ..Task::new(format!("Task {}", i), format!("p{}", i), i as i64)
        })
        .collect()
}

/// An app over a loaded in-memory store, plus a handle to that store.
pub fn app_and_store(n: usize) -> (App, MemoryStore) {
    let store = MemoryStore::new();
    for task in sample_tasks(n) {
        store.insert(task);
    }
    let mut tasks = TaskList::new(Box::new(store.clone()));
    tasks.reload();
    (App::new(tasks), store)
}

pub fn app_with_tasks(n: usize) -> App {
    app_and_store(n).0
}
