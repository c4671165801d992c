use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::TableState;

use crate::model::Task;
use crate::ops::task_list::TaskList;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode. Transient input belongs to the variant that
/// uses it, so leaving a mode drops its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the table
    Normal,
    /// Typing into the live search filter
    Searching,
    /// Choosing a project filter from the popup
    PickingProject { cursor: usize },
    /// Typing a new task
    AddingTask { draft: String },
}

/// Main application state
pub struct App {
    pub tasks: TaskList,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Table cursor and scroll offset
    pub table_state: TableState,
    /// Help overlay visible
    pub show_help: bool,
    /// Transient message for the status row, cleared on the next key press
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(tasks: TaskList) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        App {
            tasks,
            mode: Mode::Normal,
            should_quit: false,
            theme: Theme::default(),
            table_state,
            show_help: false,
            status_message: None,
            status_is_error: false,
        }
    }

    /// Row of the table cursor within the filtered view
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// The task under the table cursor, if the filtered view has one
    pub fn selected_task(&self) -> Option<Task> {
        self.tasks
            .filtered_view()
            .get(self.cursor())
            .map(|t| (*t).clone())
    }

    /// Keep the cursor inside the filtered view after the list or filters changed
    pub fn refresh_view(&mut self) {
        let len = self.tasks.filtered_view().len();
        let cursor = self.cursor().min(len.saturating_sub(1));
        self.table_state.select(Some(cursor));
    }

    /// Move the cursor by `delta` rows, clamped to the filtered view
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.tasks.filtered_view().len();
        if len == 0 {
            self.table_state.select(Some(0));
            return;
        }
        let target = self.cursor().saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(target));
    }

    pub fn cursor_to_top(&mut self) {
        self.table_state.select(Some(0));
    }

    pub fn cursor_to_bottom(&mut self) {
        let len = self.tasks.filtered_view().len();
        self.table_state.select(Some(len.saturating_sub(1)));
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }
}

/// Run the TUI over an already loaded task list
pub fn run(tasks: TaskList) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(tasks);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
