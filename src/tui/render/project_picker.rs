use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::ALL_PROJECTS;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::pad_to_width;

/// Render the project filter popup over `area`
pub fn render_project_picker(frame: &mut Frame, app: &App, area: Rect) {
    let Mode::PickingProject { cursor } = app.mode else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let bg_style = Style::default().bg(bg);
    let projects = app.tasks.projects();
    let active = app.tasks.filter();

    // Sizing: 50% width, min 30, max 42 (inner 40 + 2 borders)
    let target_w = area.width / 2;
    let popup_w = target_w.clamp(30, 42).min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    // Height: content-sized up to 70%, leaving room for blank + hint rows
    let max_h = (area.height as u32 * 7 / 10) as u16;
    let popup_h = (projects.len() as u16 + 4)
        .min(max_h)
        .min(area.height.saturating_sub(2));
    let visible = popup_h.saturating_sub(4).max(1) as usize;
    let scroll = cursor.saturating_sub(visible - 1);

    let mut lines: Vec<Line> = Vec::new();
    for (i, project) in projects.iter().enumerate().skip(scroll).take(visible) {
        let is_selected = i == cursor;
        let is_active = project == active;
        let row_bg = if is_selected { theme.selection_bg } else { bg };
        let row_pad = Style::default().bg(row_bg);

        let mut spans: Vec<Span> = Vec::new();
        let indicator = if is_selected { " \u{25B6} " } else { "   " };
        spans.push(Span::styled(
            indicator,
            Style::default().fg(theme.highlight).bg(row_bg),
        ));

        let label = if project == ALL_PROJECTS {
            "all projects"
        } else {
            project.as_str()
        };
        let name_color = if project == ALL_PROJECTS {
            theme.text
        } else {
            theme.project_color(project)
        };
        let mut name_style = Style::default().fg(name_color).bg(row_bg);
        if is_selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(
            unicode::truncate_to_width(label, inner_w.saturating_sub(6)),
            name_style,
        ));

        if is_active {
            spans.push(Span::styled(
                " \u{2713}",
                Style::default().fg(theme.green).bg(row_bg),
            ));
        }

        pad_to_width(&mut spans, inner_w, row_pad);
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(" ".repeat(inner_w), bg_style)));
    lines.push(Line::from(Span::styled(
        unicode::truncate_to_width(" Enter select  Esc cancel", inner_w),
        Style::default().fg(theme.dim).bg(bg),
    )));

    // Position: centered
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + area.height.saturating_sub(popup_h) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let title_style = Style::default()
        .fg(theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .title(Span::styled(" Filter by project ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text).bg(bg))
        .style(bg_style);

    let paragraph = Paragraph::new(lines).block(block).style(bg_style);
    frame.render_widget(paragraph, popup_area);
}
