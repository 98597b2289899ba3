//! Execution configuration: the compiled request payload.

pub mod assemble;
pub mod definitions;
pub mod order;

pub use assemble::ExecutionAssembler;
pub use definitions::{DefinitionSorter, DependencyOrder};
pub use order::{order_by, CategoryColumn, OrderBy};

use serde::{Deserialize, Serialize};

use crate::filter::WhereClause;
use crate::metric::{Definition, GeneratedMetric};

/// Links a result column back to the measure that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricMapping {
    pub element: String,
    pub measure_index: usize,
    #[serde(default, rename = "isPoP", skip_serializing_if = "Option::is_none")]
    pub is_pop: Option<bool>,
}

impl From<&GeneratedMetric> for MetricMapping {
    fn from(metric: &GeneratedMetric) -> Self {
        Self {
            element: metric.element.clone(),
            measure_index: metric.meta.measure_index,
            is_pop: metric.meta.is_pop.then_some(true),
        }
    }
}

/// Compiled execution of one visualization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionConfiguration {
    pub columns: Vec<String>,
    pub order_by: Vec<OrderBy>,
    pub definitions: Vec<Definition>,
    #[serde(rename = "where")]
    pub where_clause: WhereClause,
    pub metric_mappings: Vec<MetricMapping>,
}

impl ExecutionConfiguration {
    /// Mapping of a result column, if the column is a metric.
    pub fn mapping_for(&self, element: &str) -> Option<&MetricMapping> {
        self.metric_mappings.iter().find(|m| m.element == element)
    }
}
