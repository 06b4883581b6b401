pub mod dropdown;
pub mod input_box;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;
use super::combobox::HitMap;

/// Widest the picker grows on large terminals
const MAX_WIDTH: u16 = 60;

/// Main render function. Dispatches to sub-renderers and records the
/// hit map the combobox uses for pointer input.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let content = chunks[0];

    let width = content.width.saturating_sub(4).min(MAX_WIDTH);
    let x = content.x + 2u16.min(content.width);
    let mut y = content.y + 1u16.min(content.height);

    if let Some(label) = &app.label
        && y < content.bottom()
    {
        let line = Line::from(Span::styled(
            label.clone(),
            Style::default()
                .fg(app.theme.text)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), Rect::new(x, y, width, 1));
        y += 1;
    }

    let layout = input_box::measure(app, width.saturating_sub(2));
    let box_h = (layout.lines + 2).min(content.bottom().saturating_sub(y));
    let input_area = Rect::new(x, y, width, box_h);
    let chip_removes = input_box::render_input_box(frame, app, input_area, &layout);

    // Dropdown overlays the content below (or above) the input
    let (dropdown, rows) = dropdown::render_dropdown(frame, app, input_area, content);

    app.combobox.set_hit_map(HitMap {
        input: input_area,
        dropdown,
        rows,
        chip_removes,
    });

    status_row::render_status_row(frame, app, chunks[1]);
}
