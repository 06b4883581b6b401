use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::option::SelectOption;

/// The built-in demo picker (chart types).
pub const DEMO_CONFIG: &str = include_str!("../templates/demo.toml");

/// Configuration from a picker .toml file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub picker: PickerInfo,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerInfo {
    /// Caption rendered above the input
    #[serde(default)]
    pub label: Option<String>,
    /// Shown only while nothing is selected
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Initial selection, by option value. Unknown values become ad-hoc options.
    #[serde(default)]
    pub selected: Vec<String>,
}

impl Default for PickerInfo {
    fn default() -> Self {
        PickerInfo {
            label: None,
            placeholder: default_placeholder(),
            selected: Vec::new(),
        }
    }
}

fn default_placeholder() -> String {
    "typing to search...".to_string()
}

fn default_max_visible() -> usize {
    8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Dropdown rows shown before scrolling
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            colors: HashMap::new(),
            max_visible: default_max_visible(),
        }
    }
}

impl PickerConfig {
    /// Parse the embedded demo config.
    pub fn demo() -> Self {
        toml::from_str(DEMO_CONFIG).unwrap_or_default()
    }

    /// Resolve `picker.selected` against the catalog.
    pub fn initial_value(&self) -> Vec<SelectOption> {
        resolve_values(&self.options, &self.picker.selected)
    }
}

/// Map value ids to catalog options; ids missing from the catalog become ad-hoc options.
pub fn resolve_values(catalog: &[SelectOption], values: &[String]) -> Vec<SelectOption> {
    values
        .iter()
        .map(|v| {
            catalog
                .iter()
                .find(|o| &o.value == v)
                .cloned()
                .unwrap_or_else(|| SelectOption::ad_hoc(v.clone()))
        })
        .collect()
}
