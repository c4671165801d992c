use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::model::Task;
use crate::tui::app::App;
use crate::util::unicode;

const STATUS_W: u16 = 6;
const PROJECT_W: u16 = 14;
const DATE_W: u16 = 10;
const COLUMN_SPACING: u16 = 1;

/// `YYYY-MM-DD` in local time, blank when the timestamp is unknown
pub(super) fn local_date(timestamp: i64) -> String {
    if timestamp == 0 {
        return String::new();
    }
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Render the filtered task list as a table with the cursor row highlighted
pub fn render_task_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let view = app.tasks.filtered_view();

    if view.is_empty() {
        let y = area.y + area.height / 2;
        let line_area = Rect::new(area.x, y, area.width, area.height.min(1));
        let empty = Paragraph::new(Line::from(Span::styled(
            "No tasks",
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg));
        frame.render_widget(empty, line_area);
        return;
    }

    let task_w = area
        .width
        .saturating_sub(STATUS_W + PROJECT_W + DATE_W * 2 + COLUMN_SPACING * 4)
        as usize;

    let header_style = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Task"),
        Cell::from("Project"),
        Cell::from("Added"),
        Cell::from("Done"),
    ])
    .style(header_style);

    let rows: Vec<Row> = view
        .iter()
        .map(|task| task_row(app, task, task_w))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(STATUS_W),
            Constraint::Min(10),
            Constraint::Length(PROJECT_W),
            Constraint::Length(DATE_W),
            Constraint::Length(DATE_W),
        ],
    )
    .header(header)
    .column_spacing(COLUMN_SPACING)
    .style(Style::default().bg(bg))
    .row_highlight_style(
        Style::default()
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn task_row<'a>(app: &App, task: &Task, task_w: usize) -> Row<'a> {
    let theme = &app.theme;
    let bg = theme.background;
    let (text_fg, check_fg, project_fg) = if task.completed {
        (theme.dim, theme.dim, theme.dim)
    } else {
        (
            theme.text_bright,
            theme.highlight,
            theme.project_color(&task.project),
        )
    };

    let mut description = Style::default().fg(text_fg).bg(bg);
    if task.completed {
        description = description.add_modifier(Modifier::CROSSED_OUT);
    }

    Row::new(vec![
        Cell::from(Span::styled(
            format!(" {}", task.checkbox()),
            Style::default().fg(check_fg).bg(bg),
        )),
        Cell::from(Span::styled(
            unicode::truncate_to_width(&task.description, task_w),
            description,
        )),
        Cell::from(Span::styled(
            unicode::truncate_to_width(&task.project, PROJECT_W as usize),
            Style::default().fg(project_fg).bg(bg),
        )),
        Cell::from(Span::styled(
            local_date(task.created_at),
            Style::default().fg(theme.dim).bg(bg),
        )),
        Cell::from(Span::styled(
            if task.completed {
                local_date(task.end)
            } else {
                String::new()
            },
            Style::default().fg(theme.dim).bg(bg),
        )),
    ])
}
