use serde::{Deserialize, Serialize};

use crate::model::category::Category;
use crate::model::filter::{DateFilter, Filter};
use crate::model::measure::Measure;
use crate::model::types::VisualizationType;
use crate::model::wire;

/// Measures, categories and filters of one visualization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buckets {
    #[serde(default, with = "wire::measures")]
    pub measures: Vec<Measure>,
    #[serde(default, with = "wire::categories")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl Buckets {
    /// Attribute of the first date category, or of the first date filter when
    /// there is no date category. Only that first item is consulted.
    pub fn date_attribute(&self) -> Option<&str> {
        match self.categories.iter().find(|c| c.is_date()) {
            Some(category) => category.attribute.as_deref(),
            None => self.date_filters().next().and_then(|f| f.attribute.as_deref()),
        }
    }

    /// Attribute of the first category, the `BY ALL` target of contribution metrics.
    pub fn contribution_attribute(&self) -> Option<&str> {
        self.categories.first().and_then(|c| c.attribute.as_deref())
    }

    pub fn date_filters(&self) -> impl Iterator<Item = &DateFilter> {
        self.filters.iter().filter_map(Filter::as_date)
    }
}

/// The visualization description compiled into an execution request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataObject {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub visualization_type: Option<VisualizationType>,
    #[serde(default)]
    pub buckets: Buckets,
}

impl MetadataObject {
    pub fn new(visualization_type: VisualizationType) -> Self {
        Self {
            visualization_type: Some(visualization_type),
            buckets: Buckets::default(),
        }
    }

    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.buckets.measures.push(measure);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.buckets.categories.push(category);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.buckets.filters.push(filter);
        self
    }

    pub fn is_bar_chart(&self) -> bool {
        self.visualization_type == Some(VisualizationType::Bar)
    }

    /// Parse a metadata object from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
