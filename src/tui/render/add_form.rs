use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the new-task popup with the draft being typed
pub fn render_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let Mode::AddingTask { draft } = &app.mode else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let bg_style = Style::default().bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let popup_w = ((area.width as u32 * 7 / 10) as u16)
        .clamp(30, 70)
        .min(area.width.saturating_sub(2));
    let popup_h = area.height.min(7);
    let inner_w = popup_w.saturating_sub(2) as usize;

    // Keep the end of a long draft visible next to the cursor
    let draft_view = unicode::tail_to_width(draft, inner_w.saturating_sub(4));

    let lines = vec![
        Line::from(Span::styled(" ".repeat(inner_w), bg_style)),
        Line::from(vec![
            Span::styled(" > ", Style::default().fg(theme.highlight).bg(bg)),
            Span::styled(draft_view, Style::default().fg(theme.text_bright).bg(bg)),
            Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
        ]),
        Line::from(Span::styled(" ".repeat(inner_w), bg_style)),
        Line::from(Span::styled(
            unicode::truncate_to_width(" e.g. Fix login bug project:myapp", inner_w),
            dim_style,
        )),
        Line::from(Span::styled(
            unicode::truncate_to_width(" Enter save  Esc cancel", inner_w),
            dim_style,
        )),
    ];

    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + area.height.saturating_sub(popup_h) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let title_style = Style::default()
        .fg(theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .title(Span::styled(" New task ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(bg_style);

    let paragraph = Paragraph::new(lines).block(block).style(bg_style);
    frame.render_widget(paragraph, popup_area);
}
