use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

fn hint_for(mode: &Mode) -> &'static str {
    match mode {
        Mode::Normal => "a add  Enter toggle  d delete  / search  f filter  ? help  q quit",
        Mode::Searching => "type to filter  Enter/Esc done  Ctrl-C quit",
        Mode::PickingProject { .. } => "\u{2191}\u{2193}/jk move  Enter select  Esc cancel",
        Mode::AddingTask { .. } => "Enter save  Esc cancel",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match &app.status_message {
        Some(message) => {
            let fg = if app.status_is_error {
                app.theme.red
            } else {
                app.theme.green
            };
            let text = unicode::truncate_to_width(&format!(" {}", message), width);
            Line::from(Span::styled(text, Style::default().fg(fg).bg(bg)))
        }
        None => {
            // Key hints, right-aligned and dimmed
            let hint = hint_for(&app.mode);
            let hint_width = unicode::display_width(hint) + 1;
            if hint_width <= width {
                Line::from(vec![
                    Span::styled(" ".repeat(width - hint_width), Style::default().bg(bg)),
                    Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)),
                ])
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
