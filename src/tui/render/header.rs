use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ALL_PROJECTS;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::spans_width;

/// Render the header: active filter, search text and the visible/total count
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let value_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let filter = app.tasks.filter();
    let filter_label = if filter == ALL_PROJECTS {
        "all projects"
    } else {
        filter
    };

    let mut spans = vec![
        Span::styled(" Filter: ", label_style),
        Span::styled(filter_label.to_string(), value_style),
    ];

    let searching = app.mode == Mode::Searching;
    if searching || !app.tasks.search().is_empty() {
        spans.push(Span::styled(" \u{2022} Search: ", label_style));
        spans.push(Span::styled(
            app.tasks.search().to_string(),
            Style::default().fg(app.theme.text).bg(bg),
        ));
        if searching {
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
        }
    }

    let count = format!(
        "{}/{} ",
        app.tasks.filtered_view().len(),
        app.tasks.tasks().len()
    );
    let count_width = unicode::display_width(&count);
    let used = spans_width(&spans);
    if used + count_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - count_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(count, label_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
