use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    match &app.status {
        Some(msg) => spans.push(Span::styled(
            msg.clone(),
            Style::default().fg(app.theme.highlight).bg(bg),
        )),
        None => {
            let hint = if app.combobox.is_open() {
                "\u{2191}\u{2193} move  Enter select  Bksp remove  Esc close"
            } else {
                "Enter open  q quit"
            };
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let count = format!("{} selected", app.combobox.selection().len());
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let count_width = count.chars().count();
    if content_width + count_width < width {
        let padding = width - content_width - count_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            count,
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
