use serde::Serialize;

use crate::model::{SelectOption, Selection};
use crate::ops::filter::{FilterView, Row};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RowJson<'a> {
    pub value: &'a str,
    pub label: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub new: bool,
}

#[derive(Serialize)]
pub struct FilterJson<'a> {
    pub query: &'a str,
    pub rows: Vec<RowJson<'a>>,
    pub already_selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct OptionJson<'a> {
    pub value: &'a str,
    pub label: &'a str,
    pub selected: bool,
}

pub fn filter_json(view: &FilterView) -> FilterJson<'_> {
    FilterJson {
        query: &view.query,
        rows: view
            .rows()
            .into_iter()
            .map(|row| RowJson {
                value: &row.option().value,
                label: &row.option().label,
                new: row.is_create_new(),
            })
            .collect(),
        already_selected: view.already_selected,
        message: view.empty_state.as_ref().map(|e| e.to_string()),
    }
}

pub fn options_json<'a>(options: &'a [SelectOption], selected: &Selection) -> Vec<OptionJson<'a>> {
    options
        .iter()
        .map(|o| OptionJson {
            value: &o.value,
            label: &o.label,
            selected: selected.contains_value(&o.value),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Dropdown rows, one per line: `+ label (new value)` or `  value<TAB>label`.
/// An empty dropdown prints its message instead.
pub fn format_filter_text(view: &FilterView) -> String {
    if let Some(empty) = &view.empty_state {
        return format!("{}\n", empty);
    }
    let mut out = String::new();
    for row in view.rows() {
        match row {
            Row::CreateNew(o) => out.push_str(&format!("+ {} (new value)\n", o.label)),
            Row::Candidate(o) => out.push_str(&format!("  {}\t{}\n", o.value, o.label)),
        }
    }
    out
}

/// Catalog listing; selected entries are starred.
pub fn format_options_text(options: &[SelectOption], selected: &Selection) -> String {
    let mut out = String::new();
    for o in options {
        let mark = if selected.contains_value(&o.value) { '*' } else { ' ' };
        out.push_str(&format!("{} {}\t{}\n", mark, o.value, o.label));
    }
    out
}

/// Final selection, one `value<TAB>label` per line.
pub fn format_selection_text(selection: &[SelectOption]) -> String {
    selection
        .iter()
        .map(|o| format!("{}\t{}\n", o.value, o.label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn charts() -> Vec<SelectOption> {
        vec![
            SelectOption::new("line_chart", "Line chart"),
            SelectOption::new("bar_chart", "Bar chart"),
            SelectOption::new("pie_chart", "Pie chart"),
        ]
    }

    fn view(query: &str) -> FilterView {
        FilterView::compute(&charts(), &Selection::from_options(&charts()[..2]), query)
    }

    #[test]
    fn filter_text_candidates() {
        assert_eq!(format_filter_text(&view("pie")), "  pie_chart\tPie chart\n");
    }

    #[test]
    fn filter_text_new_value() {
        assert_snapshot!(format_filter_text(&view("Gantt")), @"+ Gantt (new value)");
    }

    #[test]
    fn filter_text_already_selected() {
        assert_snapshot!(format_filter_text(&view("Bar chart")), @"Bar chart already selected");
    }

    #[test]
    fn options_text_marks_selected() {
        let selected = Selection::from_options(&charts()[..1]);
        assert_eq!(
            format_options_text(&charts(), &selected),
            "* line_chart\tLine chart\n  bar_chart\tBar chart\n  pie_chart\tPie chart\n"
        );
    }

    #[test]
    fn filter_json_shape() {
        let json = serde_json::to_value(filter_json(&view("Gantt"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "query": "Gantt",
                "rows": [{"value": "Gantt", "label": "Gantt", "new": true}],
                "already_selected": false
            })
        );

        let json = serde_json::to_value(filter_json(&view("line chart"))).unwrap();
        assert_eq!(json["message"], "line chart already selected");
        assert_eq!(json["rows"], serde_json::json!([]));
    }

    #[test]
    fn selection_text_is_tab_separated() {
        assert_eq!(
            format_selection_text(&charts()[2..]),
            "pie_chart\tPie chart\n"
        );
    }
}
