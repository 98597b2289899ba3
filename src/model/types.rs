//! Enumerations shared by the metadata object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of object a measure points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureType {
    Fact,
    Attribute,
    Metric,
}

impl MeasureType {
    /// Token used as the prefix of generated identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureType::Fact => "fact",
            MeasureType::Attribute => "attribute",
            MeasureType::Metric => "metric",
        }
    }
}

impl fmt::Display for MeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an aggregation name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown aggregation: {0}")]
pub struct UnknownAggregation(pub String);

/// Aggregation function applied to a fact or attribute.
///
/// Parsed case-insensitively; serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Aggregation {
    Sum,
    Count,
    Avg,
    Min,
    Max,
    Median,
    Runsum,
}

impl Aggregation {
    /// Parse an aggregation name, ignoring case.
    pub fn from_str(s: &str) -> Result<Self, UnknownAggregation> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "count" => Ok(Aggregation::Count),
            "avg" => Ok(Aggregation::Avg),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            "median" => Ok(Aggregation::Median),
            "runsum" => Ok(Aggregation::Runsum),
            other => Err(UnknownAggregation(other.to_string())),
        }
    }

    /// Lowercase name, used in generated identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Count => "count",
            Aggregation::Avg => "avg",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Median => "median",
            Aggregation::Runsum => "runsum",
        }
    }

    /// Function name as written in query expressions.
    pub fn function_name(&self) -> &'static str {
        match self {
            Aggregation::Sum => "SUM",
            Aggregation::Count => "COUNT",
            Aggregation::Avg => "AVG",
            Aggregation::Min => "MIN",
            Aggregation::Max => "MAX",
            Aggregation::Median => "MEDIAN",
            Aggregation::Runsum => "RUNSUM",
        }
    }
}

impl TryFrom<String> for Aggregation {
    type Error = UnknownAggregation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Aggregation::from_str(&value)
    }
}

impl From<Aggregation> for String {
    fn from(value: Aggregation) -> Self {
        value.as_str().to_string()
    }
}

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Kind of category in the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    #[default]
    Attribute,
    Date,
}

/// Chart type of the visualization being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationType {
    Bar,
    Column,
    Line,
    Pie,
    Table,
    #[serde(other)]
    Other,
}
