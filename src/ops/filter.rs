use std::fmt;

use crate::model::{SelectOption, Selection};

/// Trim and case-fold text for matching.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed containment of `query` in `label`.
/// An empty (or all-whitespace) query matches every label.
pub fn matches(label: &str, query: &str) -> bool {
    let needle = normalize(query);
    needle.is_empty() || label.to_lowercase().contains(&needle)
}

/// Catalog entries that are not selected and whose label matches the query.
/// Catalog order is preserved.
pub fn candidates(
    catalog: &[SelectOption],
    selected: &Selection,
    query: &str,
) -> Vec<SelectOption> {
    catalog
        .iter()
        .filter(|o| !selected.contains_value(&o.value))
        .filter(|o| matches(&o.label, query))
        .cloned()
        .collect()
}

/// Message shown when the dropdown has nothing to offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// Query is empty and every option is already selected (or the catalog is empty)
    NoOptions,
    /// Query names an option that is already a chip
    AlreadySelected(String),
    NoOptionsFor(String),
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyState::NoOptions => write!(f, "No options available"),
            EmptyState::AlreadySelected(q) => write!(f, "{} already selected", q),
            EmptyState::NoOptionsFor(q) => write!(f, "No options available for {}", q),
        }
    }
}

/// One rendered dropdown row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    /// Synthetic entry built from the query, marked "(new value)"
    CreateNew(&'a SelectOption),
    Candidate(&'a SelectOption),
}

impl<'a> Row<'a> {
    pub fn option(&self) -> &'a SelectOption {
        match self {
            Row::CreateNew(o) | Row::Candidate(o) => o,
        }
    }

    pub fn is_create_new(&self) -> bool {
        matches!(self, Row::CreateNew(_))
    }
}

/// Everything the dropdown needs for one frame, derived from
/// (catalog, selection, query). Recomputed on every change, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterView {
    /// The query, trimmed
    pub query: String,
    pub candidates: Vec<SelectOption>,
    pub create_new: Option<SelectOption>,
    pub already_selected: bool,
    pub empty_state: Option<EmptyState>,
}

impl FilterView {
    pub fn compute(catalog: &[SelectOption], selected: &Selection, query: &str) -> Self {
        let trimmed = query.trim().to_string();
        let candidates = candidates(catalog, selected, query);

        let already_selected = !trimmed.is_empty() && selected.contains_label_normalized(&trimmed);

        let needle = normalize(&trimmed);
        let catalog_has_label = catalog.iter().any(|o| normalize(&o.label) == needle);
        let offer_new = !trimmed.is_empty()
            && !candidates.iter().any(|o| matches(&o.label, &trimmed))
            && !already_selected
            && !catalog_has_label;
        let create_new = offer_new.then(|| SelectOption::ad_hoc(trimmed.clone()));

        let empty_state = if candidates.is_empty() && create_new.is_none() {
            Some(if trimmed.is_empty() {
                EmptyState::NoOptions
            } else if already_selected {
                EmptyState::AlreadySelected(trimmed.clone())
            } else {
                EmptyState::NoOptionsFor(trimmed.clone())
            })
        } else {
            None
        };

        FilterView {
            query: trimmed,
            candidates,
            create_new,
            already_selected,
            empty_state,
        }
    }

    /// Rows in display order: the create-new entry first, then candidates.
    pub fn rows(&self) -> Vec<Row<'_>> {
        self.create_new
            .iter()
            .map(Row::CreateNew)
            .chain(self.candidates.iter().map(Row::Candidate))
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.candidates.len() + usize::from(self.create_new.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn charts() -> Vec<SelectOption> {
        vec![
            SelectOption::new("line_chart", "Line chart"),
            SelectOption::new("bar_chart", "Bar chart"),
            SelectOption::new("pie_chart", "Pie chart"),
        ]
    }

    fn first_two_selected() -> Selection {
        Selection::from_options(&charts()[..2])
    }

    #[test]
    fn matching_is_trimmed_and_case_insensitive() {
        assert!(matches("Pie chart", "pie"));
        assert!(matches("Pie chart", "  CHART  "));
        assert!(matches("Pie chart", ""));
        assert!(matches("Pie chart", "   "));
        assert!(!matches("Pie chart", "bar"));
    }

    #[test]
    fn never_offers_selected_options() {
        let catalog = charts();
        let selected = first_two_selected();
        for q in ["", "chart", "line", "BAR", "e", "zzz"] {
            let list = candidates(&catalog, &selected, q);
            assert!(
                list.iter().all(|o| !selected.contains_value(&o.value)),
                "query {q:?} leaked a selected option"
            );
        }
    }

    #[test]
    fn empty_query_lists_everything_unselected() {
        let view = FilterView::compute(&charts(), &first_two_selected(), "");
        assert_eq!(view.candidates, vec![charts()[2].clone()]);
        assert_eq!(view.create_new, None);
        assert_eq!(view.empty_state, None);
    }

    #[test]
    fn empty_query_with_everything_selected_says_no_options() {
        let catalog = charts();
        let view = FilterView::compute(&catalog, &Selection::from_options(&catalog), "");
        assert!(view.candidates.is_empty());
        assert_eq!(view.empty_state, Some(EmptyState::NoOptions));
        assert_eq!(view.empty_state.unwrap().to_string(), "No options available");
    }

    #[test]
    fn typing_pie_narrows_to_pie_chart() {
        let view = FilterView::compute(&charts(), &first_two_selected(), "Pie");
        assert_eq!(view.candidates, vec![SelectOption::new("pie_chart", "Pie chart")]);
        assert_eq!(view.create_new, None);
        assert_eq!(view.empty_state, None);
    }

    #[test]
    fn unknown_text_offers_create_new_instead_of_message() {
        let view = FilterView::compute(&charts(), &Selection::new(), "Xyz");
        assert!(view.candidates.is_empty());
        assert_eq!(view.create_new, Some(SelectOption::ad_hoc("Xyz")));
        assert_eq!(view.empty_state, None);
        let rows = view.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_create_new());
    }

    #[test]
    fn create_new_uses_trimmed_query() {
        let view = FilterView::compute(&charts(), &Selection::new(), "  Gantt  ");
        assert_eq!(view.create_new, Some(SelectOption::ad_hoc("Gantt")));
    }

    #[test]
    fn exact_label_of_selected_option_reports_already_selected() {
        let view = FilterView::compute(&charts(), &first_two_selected(), "line chart");
        assert!(view.already_selected);
        assert_eq!(view.create_new, None);
        assert_eq!(
            view.empty_state.as_ref().map(|e| e.to_string()).as_deref(),
            Some("line chart already selected")
        );
    }

    #[test]
    fn ad_hoc_selection_also_counts_as_already_selected() {
        let mut selected = Selection::new();
        selected.insert(SelectOption::ad_hoc("Gantt"));
        let view = FilterView::compute(&charts(), &selected, "gantt");
        assert!(view.already_selected);
        assert_eq!(view.create_new, None);
        assert_eq!(view.empty_state, Some(EmptyState::AlreadySelected("gantt".into())));
    }

    #[test]
    fn partial_match_of_selected_option_offers_create_new() {
        // "Line" is contained in a selected label but equals none of them
        let view = FilterView::compute(&charts(), &first_two_selected(), "Line");
        assert!(view.candidates.is_empty());
        assert!(!view.already_selected);
        assert_eq!(view.create_new, Some(SelectOption::ad_hoc("Line")));
    }

    #[test]
    fn create_new_is_prepended_to_rows() {
        let catalog = vec![
            SelectOption::new("a", "Alpha"),
            SelectOption::new("b", "Beta"),
        ];
        // Nothing contains "q", so only the create-new row shows
        let view = FilterView::compute(&catalog, &Selection::new(), "q");
        assert_eq!(view.row_count(), 1);
        // A matching query has candidates and no create-new row
        let view = FilterView::compute(&catalog, &Selection::new(), "a");
        assert_eq!(view.rows().len(), 2);
        assert!(view.rows().iter().all(|r| !r.is_create_new()));
    }

    #[test]
    fn created_option_is_excluded_afterwards() {
        let catalog = charts();
        let mut selected = Selection::new();
        let view = FilterView::compute(&catalog, &selected, "Gantt");
        let created = view.create_new.clone().unwrap();
        selected.insert(created.clone());
        assert!(selected.contains_value("Gantt"));
        for q in ["", "Gantt", "g"] {
            let view = FilterView::compute(&catalog, &selected, q);
            assert!(!view.candidates.contains(&created));
            assert_ne!(view.create_new.as_ref().map(|o| o.value.as_str()), Some("Gantt"));
        }
    }

    #[test]
    fn empty_state_messages() {
        assert_eq!(EmptyState::NoOptions.to_string(), "No options available");
        assert_eq!(
            EmptyState::AlreadySelected("Pie chart".into()).to_string(),
            "Pie chart already selected"
        );
        assert_eq!(
            EmptyState::NoOptionsFor("Xyz".into()).to_string(),
            "No options available for Xyz"
        );
    }
}
