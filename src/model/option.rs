use serde::{Deserialize, Serialize};

/// One selectable entry: `value` identifies it, `label` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An ad-hoc option typed by the user. Value and label are the same text.
    pub fn ad_hoc(text: impl Into<String>) -> Self {
        let text = text.into();
        SelectOption {
            value: text.clone(),
            label: text,
        }
    }
}
