use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

/// Remove affordance drawn at the end of each chip
const REMOVE_GLYPH: &str = "\u{00D7}";
/// Padding and glyph around a chip label: " label × "
const CHIP_CHROME: usize = 4;

/// Position of one chip inside the input box (relative to its inner area)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSlot {
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

/// Flex-wrap placement of chips followed by the query input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipLayout {
    pub chips: Vec<ChipSlot>,
    /// Chip labels after truncation to the available width
    pub labels: Vec<String>,
    pub input_x: u16,
    pub input_y: u16,
    pub lines: u16,
}

/// Place items of `widths` left to right with a one-cell gap, wrapping
/// when the next one does not fit. The input comes last.
pub fn layout_chips(widths: &[usize], input_width: usize, inner_width: usize) -> ChipLayout {
    let inner = inner_width.max(1);
    let mut x = 0usize;
    let mut y = 0usize;
    let mut chips = Vec::with_capacity(widths.len());

    for &w in widths {
        let w = w.min(inner);
        if x > 0 && x + w > inner {
            x = 0;
            y += 1;
        }
        chips.push(ChipSlot {
            x: x as u16,
            y: y as u16,
            width: w as u16,
        });
        x += w + 1;
    }

    let input_w = input_width.clamp(1, inner);
    if x > 0 && x + input_w > inner {
        x = 0;
        y += 1;
    }

    ChipLayout {
        chips,
        labels: Vec::new(),
        input_x: x as u16,
        input_y: y as u16,
        lines: (y + 1) as u16,
    }
}

/// Text shown where the user types: the query, or the placeholder when
/// nothing is selected and nothing is typed.
fn input_text(app: &App) -> (String, bool) {
    let cb = &app.combobox;
    match cb.placeholder() {
        Some(p) if cb.query().is_empty() => (p.to_string(), true),
        _ => (cb.query().to_string(), false),
    }
}

/// Lay out the current chips and input for an inner width.
pub fn measure(app: &App, inner_width: u16) -> ChipLayout {
    let inner = inner_width as usize;
    let max_label = inner.saturating_sub(CHIP_CHROME).max(1);
    let labels: Vec<String> = app
        .combobox
        .selection()
        .iter()
        .map(|o| unicode::truncate_to_width(&o.label, max_label))
        .collect();
    let widths: Vec<usize> = labels
        .iter()
        .map(|l| unicode::display_width(l) + CHIP_CHROME)
        .collect();

    let (text, _) = input_text(app);
    // +1 for the cursor
    let input_w = unicode::display_width(&text) + 1;

    let mut layout = layout_chips(&widths, input_w, inner);
    layout.labels = labels;
    layout
}

/// Render the bordered input with chips and the query. Returns the chip
/// remove affordances (screen rect, option value).
pub fn render_input_box(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    layout: &ChipLayout,
) -> Vec<(Rect, String)> {
    let bg = app.theme.background;
    let open = app.combobox.is_open();
    let inner = Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );

    let chip_style = Style::default().fg(app.theme.chip_fg).bg(app.theme.chip_bg);
    let remove_style = Style::default()
        .fg(app.theme.dim)
        .bg(app.theme.chip_bg)
        .add_modifier(Modifier::BOLD);
    let blank = Style::default().bg(bg);

    let mut rows: Vec<Vec<Span>> = vec![Vec::new(); layout.lines as usize];
    let mut cols: Vec<u16> = vec![0; layout.lines as usize];
    let mut removes = Vec::new();

    let selection = app.combobox.selection();
    for ((slot, label), option) in layout
        .chips
        .iter()
        .zip(&layout.labels)
        .zip(selection.iter())
    {
        let row = slot.y as usize;
        if slot.x > cols[row] {
            rows[row].push(Span::styled(" ".repeat((slot.x - cols[row]) as usize), blank));
        }
        rows[row].push(Span::styled(format!(" {} ", label), chip_style));
        rows[row].push(Span::styled(REMOVE_GLYPH, remove_style));
        rows[row].push(Span::styled(" ", chip_style));
        cols[row] = slot.x + slot.width;

        let glyph_x = slot.x + slot.width.saturating_sub(2);
        if slot.y < inner.height {
            removes.push((
                Rect::new(inner.x + glyph_x, inner.y + slot.y, 1, 1),
                option.value.clone(),
            ));
        }
    }

    let (text, is_placeholder) = input_text(app);
    let row = layout.input_y as usize;
    if layout.input_x > cols[row] {
        rows[row].push(Span::styled(
            " ".repeat((layout.input_x - cols[row]) as usize),
            blank,
        ));
    }
    let text_style = if is_placeholder {
        Style::default().fg(app.theme.dim).bg(bg)
    } else {
        Style::default().fg(app.theme.text_bright).bg(bg)
    };
    if open && is_placeholder {
        // Cursor sits before the placeholder
        rows[row].push(Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)));
        rows[row].push(Span::styled(text, text_style));
    } else {
        rows[row].push(Span::styled(text, text_style));
        if open {
            rows[row].push(Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)));
        }
    }

    let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();

    let border_color = if open {
        app.theme.focus_border
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);

    removes
}
