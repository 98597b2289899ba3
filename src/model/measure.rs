use serde::{Deserialize, Serialize};

use crate::model::filter::AttributeFilter;
use crate::model::types::{Aggregation, MeasureType, SortDirection};
use crate::model::wire;

/// A measure of the visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// Uri of the fact, attribute or metric (`/gdc/md/<project>/obj/<id>`).
    pub object_uri: String,
    #[serde(rename = "type")]
    pub measure_type: MeasureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<MeasureSort>,
    /// Also compute the value for the previous period.
    #[serde(default, rename = "showPoP")]
    pub show_pop: bool,
    /// Show the value as a share of the total across the first category.
    #[serde(default)]
    pub show_in_percent: bool,
    #[serde(default, with = "wire::attribute_filters")]
    pub measure_filters: Vec<AttributeFilter>,
}

impl Measure {
    /// Create a plain metric reference with no filters or flags.
    pub fn new(
        object_uri: impl Into<String>,
        measure_type: MeasureType,
        title: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            object_uri: object_uri.into(),
            measure_type,
            aggregation: None,
            title: title.into(),
            format: format.into(),
            sort: None,
            show_pop: false,
            show_in_percent: false,
            measure_filters: Vec::new(),
        }
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    pub fn with_sort(mut self, sort: MeasureSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_pop(mut self) -> Self {
        self.show_pop = true;
        self
    }

    pub fn in_percent(mut self) -> Self {
        self.show_in_percent = true;
        self
    }

    pub fn with_filter(mut self, filter: AttributeFilter) -> Self {
        self.measure_filters.push(filter);
        self
    }

    /// True when at least one measure filter selects elements.
    pub fn has_executable_filters(&self) -> bool {
        self.measure_filters.iter().any(AttributeFilter::is_executable)
    }

    /// Sort direction for the base metric or its period-over-period variant.
    pub fn sort_for(&self, is_pop: bool) -> Option<SortDirection> {
        self.sort.as_ref().and_then(|s| s.direction_for(is_pop))
    }
}

/// Sort setting of a measure.
///
/// The plain form (`"asc"`) sorts every metric generated for the measure.
/// The detailed form picks either the base metric or, with `sortByPoP`, the
/// period-over-period metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasureSort {
    Direction(SortDirection),
    Detailed {
        direction: SortDirection,
        #[serde(default, rename = "sortByPoP")]
        sort_by_pop: bool,
    },
}

impl MeasureSort {
    pub fn direction_for(&self, is_pop: bool) -> Option<SortDirection> {
        match self {
            MeasureSort::Direction(direction) => Some(*direction),
            MeasureSort::Detailed {
                direction,
                sort_by_pop,
            } => (is_pop == *sort_by_pop).then_some(*direction),
        }
    }
}
