//! Attribute and date filters.
//!
//! Both filter kinds arrive wrapped in a single-key object:
//!
//! ```json
//! { "listAttributeFilter": { "attribute": "...", "displayForm": "...",
//!   "default": { "negativeSelection": false, "attributeElements": ["..."] } } }
//! { "dateFilter": { "dimension": "...", "granularity": "GDC.time.year", "from": -1, "to": 0 } }
//! ```

use serde::{Deserialize, Serialize};

/// A filter on the elements of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AttributeFilterBody", into = "AttributeFilterBody")]
pub struct AttributeFilter {
    /// Attribute uri, used in generated metric expressions.
    pub attribute: String,
    /// Display form uri, used as the key of `where` clauses.
    pub display_form: String,
    /// Selected element uris (`.../elements?id=<id>`).
    pub elements: Vec<String>,
    /// When true the selection excludes `elements`.
    pub negative_selection: bool,
}

impl AttributeFilter {
    /// Only filters with selected elements take part in execution.
    pub fn is_executable(&self) -> bool {
        !self.elements.is_empty()
    }

    /// Element ids: the part of each element uri after the last `=`.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements
            .iter()
            .map(|e| e.rsplit('=').next().unwrap_or(e.as_str()))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeFilterBody {
    #[serde(default)]
    attribute: String,
    #[serde(default)]
    display_form: String,
    #[serde(default)]
    default: ElementSelection,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementSelection {
    #[serde(default)]
    negative_selection: bool,
    #[serde(default)]
    attribute_elements: Vec<String>,
}

impl From<AttributeFilterBody> for AttributeFilter {
    fn from(body: AttributeFilterBody) -> Self {
        Self {
            attribute: body.attribute,
            display_form: body.display_form,
            elements: body.default.attribute_elements,
            negative_selection: body.default.negative_selection,
        }
    }
}

impl From<AttributeFilter> for AttributeFilterBody {
    fn from(filter: AttributeFilter) -> Self {
        Self {
            attribute: filter.attribute,
            display_form: filter.display_form,
            default: ElementSelection {
                negative_selection: filter.negative_selection,
                attribute_elements: filter.elements,
            },
        }
    }
}

/// One end of a date range: a relative offset or an absolute date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateBound {
    Offset(i64),
    Date(String),
}

/// A range filter on a date dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    /// Date dimension (data set) uri. Older payloads spell it `dataSet` or `dataset`.
    #[serde(alias = "dataSet", alias = "dataset")]
    pub dimension: String,
    /// Date attribute uri, used by period-over-period metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default)]
    pub granularity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<DateBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateBound>,
}

impl DateFilter {
    /// A date filter executes only when both ends of the range are set.
    pub fn is_executable(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}

/// A bucket-level filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    #[serde(rename = "listAttributeFilter")]
    Attribute(AttributeFilter),
    #[serde(rename = "dateFilter")]
    Date(DateFilter),
}

impl Filter {
    pub fn as_date(&self) -> Option<&DateFilter> {
        match self {
            Filter::Date(f) => Some(f),
            Filter::Attribute(_) => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeFilter> {
        match self {
            Filter::Attribute(f) => Some(f),
            Filter::Date(_) => None,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Filter::Date(_))
    }
}
