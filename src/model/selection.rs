use indexmap::IndexMap;

use super::option::SelectOption;
use crate::ops::filter::normalize;

/// Ordered set of chosen options, unique by `value`.
///
/// Iteration order is insertion order, which is also the chip display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: IndexMap<String, SelectOption>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Build a selection from a list, keeping the first occurrence of each value.
    pub fn from_options<'a>(options: impl IntoIterator<Item = &'a SelectOption>) -> Self {
        let mut selection = Selection::new();
        for option in options {
            selection.insert(option.clone());
        }
        selection
    }

    /// Append an option. Returns false (and changes nothing) if its value is present.
    pub fn insert(&mut self, option: SelectOption) -> bool {
        if self.items.contains_key(&option.value) {
            return false;
        }
        self.items.insert(option.value.clone(), option);
        true
    }

    /// Remove by value, preserving the order of the remaining chips.
    pub fn remove(&mut self, value: &str) -> Option<SelectOption> {
        self.items.shift_remove(value)
    }

    /// Remove and return the most recently added option.
    pub fn pop_last(&mut self) -> Option<SelectOption> {
        self.items.pop().map(|(_, option)| option)
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.items.contains_key(value)
    }

    /// True if some selected option's label equals `query` after trimming and case-folding.
    pub fn contains_label_normalized(&self, query: &str) -> bool {
        let needle = normalize(query);
        self.items.values().any(|o| normalize(&o.label) == needle)
    }

    pub fn get_index(&self, index: usize) -> Option<&SelectOption> {
        self.items.get_index(index).map(|(_, option)| option)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectOption> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_vec(&self) -> Vec<SelectOption> {
        self.items.values().cloned().collect()
    }
}
