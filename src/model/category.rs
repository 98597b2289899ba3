use serde::{Deserialize, Serialize};

use crate::model::types::{CategoryType, SortDirection};

/// A category (attribute display form) the data is sliced by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Display form uri; becomes the column element.
    pub display_form: String,
    /// Attribute uri behind the display form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, rename = "type")]
    pub category_type: CategoryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
}

impl Category {
    pub fn new(display_form: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            display_form: display_form.into(),
            attribute: Some(attribute.into()),
            category_type: CategoryType::Attribute,
            sort: None,
        }
    }

    /// A date category; its attribute anchors period-over-period metrics.
    pub fn date(display_form: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            category_type: CategoryType::Date,
            ..Self::new(display_form, attribute)
        }
    }

    pub fn with_sort(mut self, direction: SortDirection) -> Self {
        self.sort = Some(direction);
        self
    }

    pub fn is_date(&self) -> bool {
        self.category_type == CategoryType::Date
    }
}
