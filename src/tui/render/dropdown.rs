use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::filter::Row;
use crate::ops::highlight::highlight;
use crate::tui::app::App;
use crate::util::unicode;

const NEW_VALUE_MARKER: &str = "(new value)";

/// Render the dropdown under the input (or above it when there is no room below).
///
/// Returns the panel rect and the visible rows with the row index each one
/// shows. Returns nothing while the combobox is closed.
pub fn render_dropdown(
    frame: &mut Frame,
    app: &App,
    anchor: Rect,
    bounds: Rect,
) -> (Option<Rect>, Vec<(Rect, usize)>) {
    let cb = &app.combobox;
    if !cb.is_open() || anchor.width < 3 {
        return (None, Vec::new());
    }

    let bg = app.theme.background;
    let text_color = app.theme.text;
    let bright = app.theme.text_bright;
    let dim = app.theme.dim;

    let view = cb.view();
    let rows = view.rows();
    let max_visible = app.max_visible;

    let content_h = if rows.is_empty() {
        1
    } else {
        rows.len().min(max_visible)
    };
    let popup_w = anchor.width;
    let inner_w = popup_w.saturating_sub(2) as usize;
    let popup_h = (content_h as u16) + 2; // +2 for borders

    let y = if anchor.bottom() + popup_h <= bounds.bottom() {
        anchor.bottom()
    } else if anchor.y >= bounds.y + popup_h {
        anchor.y - popup_h
    } else {
        anchor.bottom()
    };
    let popup_h = popup_h.min(bounds.bottom().saturating_sub(y));
    if popup_h < 3 {
        return (None, Vec::new());
    }
    let popup_area = Rect::new(anchor.x, y, popup_w, popup_h);
    let visible = (popup_h - 2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    let mut hits = Vec::new();

    if let Some(empty) = &view.empty_state {
        let msg = unicode::truncate_to_width(&empty.to_string(), inner_w);
        let msg_len = unicode::display_width(&msg);
        let left_pad = inner_w.saturating_sub(msg_len) / 2;
        lines.push(Line::from(vec![
            Span::styled(" ".repeat(left_pad), Style::default().bg(bg)),
            Span::styled(msg, Style::default().fg(dim).bg(bg)),
        ]));
    } else {
        // Scroll window around the highlighted row
        let active = cb.active();
        let scroll_start = if active >= visible {
            active - visible + 1
        } else {
            0
        };

        for (i, row) in rows.iter().skip(scroll_start).take(visible).enumerate() {
            let index = scroll_start + i;
            let is_active = index == active;
            let row_bg = if is_active { app.theme.selection_bg } else { bg };

            let style = if is_active {
                Style::default()
                    .fg(bright)
                    .bg(row_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(text_color).bg(row_bg)
            };
            let pad = Style::default().bg(row_bg);

            let prefix = if is_active { " \u{25B8} " } else { "   " };
            let mut spans = vec![Span::styled(prefix, style)];
            let mut used = 3;

            match row {
                Row::CreateNew(option) => {
                    let marker_w = NEW_VALUE_MARKER.len() + 1;
                    let room = inner_w.saturating_sub(used + marker_w + 1);
                    let label = unicode::truncate_to_width(&option.label, room.max(1));
                    used += unicode::display_width(&label);
                    spans.push(Span::styled(label, style));
                    let gap = inner_w.saturating_sub(used + marker_w).max(1);
                    spans.push(Span::styled(" ".repeat(gap), pad));
                    spans.push(Span::styled(NEW_VALUE_MARKER, Style::default().fg(dim).bg(row_bg)));
                    spans.push(Span::styled(" ", pad));
                }
                Row::Candidate(option) => {
                    let room = inner_w.saturating_sub(used + 1);
                    let label = unicode::truncate_to_width(&option.label, room.max(1));
                    used += unicode::display_width(&label);
                    for segment in highlight(&label, &view.query) {
                        let seg_style = if segment.matched {
                            style.add_modifier(Modifier::UNDERLINED)
                        } else {
                            style
                        };
                        spans.push(Span::styled(segment.text, seg_style));
                    }
                    if used < inner_w {
                        spans.push(Span::styled(" ".repeat(inner_w - used), pad));
                    }
                }
            }

            lines.push(Line::from(spans));
            hits.push((
                Rect::new(
                    popup_area.x + 1,
                    popup_area.y + 1 + i as u16,
                    popup_area.width.saturating_sub(2),
                    1,
                ),
                index,
            ));
        }
    }

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);

    (Some(popup_area), hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn closed_renders_nothing() {
        let app = demo_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            let (panel, rows) = render_dropdown(frame, &app, Rect::new(2, 2, 40, 3), area);
            assert!(panel.is_none());
            assert!(rows.is_empty());
        });
        assert_eq!(output, "");
    }

    #[test]
    fn lists_unselected_options() {
        let mut app = demo_app();
        app.combobox.focus();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            let (panel, rows) = render_dropdown(frame, &app, Rect::new(2, 2, 40, 3), area);
            assert_eq!(panel, Some(Rect::new(2, 5, 40, 9)));
            assert_eq!(rows.len(), 7);
            assert_eq!(rows[0], (Rect::new(3, 6, 38, 1), 0));
        });
        assert!(output.contains(" \u{25B8} Column chart"));
        assert!(output.contains("   Area chart"));
        assert!(output.contains("Bubble chart"));
        assert!(!output.contains("Line chart"));
    }

    #[test]
    fn new_value_row_is_marked() {
        let mut app = demo_app();
        app.combobox.focus();
        app.combobox.insert_str("Gantt");
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_dropdown(frame, &app, Rect::new(2, 2, 40, 3), area);
        });
        assert!(output.contains("Gantt"));
        assert!(output.contains("(new value)"));
        assert!(!output.contains("No options available"));
    }

    #[test]
    fn already_selected_message() {
        let mut app = demo_app();
        app.combobox.focus();
        app.combobox.insert_str("Pie chart");
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_dropdown(frame, &app, Rect::new(2, 2, 40, 3), area);
        });
        assert!(output.contains("Pie chart already selected"));
        assert!(!output.contains("(new value)"));
    }

    #[test]
    fn match_is_underlined() {
        let mut app = demo_app();
        app.combobox.focus();
        app.combobox.insert_str("nut");
        let buf = render_to_buffer(TERM_W, TERM_H, |frame, area| {
            render_dropdown(frame, &app, Rect::new(2, 2, 40, 3), area);
        });
        // Row text starts after the border and the 3-cell indicator: "Dough" then "nut"
        let row_y = 6;
        let first = 3 + 3;
        assert!(
            !buf[(first, row_y)]
                .modifier
                .contains(Modifier::UNDERLINED)
        );
        for x in first + 5..first + 8 {
            assert!(buf[(x, row_y)].modifier.contains(Modifier::UNDERLINED));
        }
    }

    #[test]
    fn scrolls_to_keep_active_row_visible() {
        let mut app = demo_app();
        app.max_visible = 3;
        app.combobox.focus();
        app.combobox.move_active(5);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            let (_, rows) = render_dropdown(frame, &app, Rect::new(2, 2, 40, 3), area);
            let indices: Vec<usize> = rows.iter().map(|(_, i)| *i).collect();
            assert_eq!(indices, vec![3, 4, 5]);
        });
        assert!(output.contains(" \u{25B8} Polar chart"));
        assert!(!output.contains("Column chart"));
    }
}
