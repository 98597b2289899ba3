//! Generated metric descriptors and their wire definitions.

use serde::{Deserialize, Serialize};

use crate::model::SortDirection;

/// Format forced on contribution metrics.
pub const CONTRIBUTION_FORMAT: &str = "#,##0.00%";

/// Body of a generated metric sent along with the execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub identifier: String,
    pub expression: String,
    pub title: String,
    pub format: String,
}

/// A definition in the execution request.
///
/// Serialized as `{ "metricDefinition": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Definition {
    #[serde(rename = "metricDefinition")]
    Metric(MetricDefinition),
}

impl Definition {
    pub fn identifier(&self) -> &str {
        match self {
            Definition::Metric(m) => &m.identifier,
        }
    }

    pub fn expression(&self) -> &str {
        match self {
            Definition::Metric(m) => &m.expression,
        }
    }
}

/// Which measure a generated metric came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricMeta {
    pub measure_index: usize,
    #[serde(default, rename = "isPoP", skip_serializing_if = "std::ops::Not::not")]
    pub is_pop: bool,
}

/// One metric column produced for a measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMetric {
    /// Column element: an object uri or a generated identifier.
    pub element: String,
    /// Present only for metrics synthesized by the compiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Definition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
    pub meta: MetricMeta,
}

impl GeneratedMetric {
    /// A metric referenced by uri, with nothing to generate.
    pub fn reference(element: impl Into<String>, sort: Option<SortDirection>, measure_index: usize) -> Self {
        Self {
            element: element.into(),
            definition: None,
            sort,
            meta: MetricMeta {
                measure_index,
                is_pop: false,
            },
        }
    }

    /// A generated metric; the element is the definition's identifier.
    pub fn generated(
        definition: MetricDefinition,
        sort: Option<SortDirection>,
        meta: MetricMeta,
    ) -> Self {
        Self {
            element: definition.identifier.clone(),
            definition: Some(Definition::Metric(definition)),
            sort,
            meta,
        }
    }

    pub fn expression(&self) -> Option<&str> {
        self.definition.as_ref().map(Definition::expression)
    }

    pub fn is_pop(&self) -> bool {
        self.meta.is_pop
    }
}
