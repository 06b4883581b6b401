use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
/// Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Start of the grapheme cluster ending at `byte_offset`. None at the start of the string.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset.min(s.len())]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_cells() {
        assert_eq!(display_width("Pie chart"), 9);
        assert_eq!(display_width("图表"), 4);
        assert_eq!(display_width("cafe\u{0301}"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits_untouched() {
        assert_eq!(truncate_to_width("Bar chart", 9), "Bar chart");
        assert_eq!(truncate_to_width("Bar chart", 20), "Bar chart");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Doughnut chart", 6), "Dough\u{2026}");
        assert_eq!(truncate_to_width("Doughnut chart", 1), "\u{2026}");
        assert_eq!(truncate_to_width("Doughnut chart", 0), "");
    }

    #[test]
    fn truncate_respects_wide_chars() {
        // "图" is 2 cells: only one fits before the ellipsis in 4 cells
        assert_eq!(truncate_to_width("图表图表", 4), "图\u{2026}");
    }

    #[test]
    fn prev_boundary_steps_over_clusters() {
        assert_eq!(prev_grapheme_boundary("abc", 3), Some(2));
        assert_eq!(prev_grapheme_boundary("abc", 0), None);
        let s = "cafe\u{0301}";
        assert_eq!(prev_grapheme_boundary(s, s.len()), Some(3));
        let zwj = "a\u{1F468}\u{200D}\u{1F469}";
        assert_eq!(prev_grapheme_boundary(zwj, zwj.len()), Some(1));
    }
}
