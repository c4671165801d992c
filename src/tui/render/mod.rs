pub mod add_form;
pub mod header;
pub mod help_overlay;
pub mod project_picker;
pub mod status_row;
pub mod task_table;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use super::app::{App, Mode};
use crate::util::unicode;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (1 row) | table | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // filter, search and count
            Constraint::Min(1),    // task table
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    task_table::render_task_table(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    match &app.mode {
        Mode::PickingProject { .. } => project_picker::render_project_picker(frame, app, area),
        Mode::AddingTask { .. } => add_form::render_add_form(frame, app, area),
        Mode::Normal | Mode::Searching => {}
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Pad spans to fill `target_width` with background.
pub(super) fn pad_to_width(spans: &mut Vec<Span<'_>>, target_width: usize, pad_style: Style) {
    let used = spans_width(spans);
    if used < target_width {
        spans.push(Span::styled(" ".repeat(target_width - used), pad_style));
    }
}

/// Total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
