//! Metric generation: from measures to metric columns and definitions.
//!
//! ```text
//! Measure ──▶ MetricDispatcher ──▶ MetricStrategy ──▶ [GeneratedMetric]
//!                                       │
//!                                       ├─ expr        (expression strings)
//!                                       ├─ identifier  (content-addressed names)
//!                                       └─ title       (suffix + truncation)
//! ```

pub mod definition;
pub mod dispatch;
pub mod expr;
pub mod hash;
pub mod identifier;
pub mod strategy;
pub mod title;

pub use definition::{
    Definition, GeneratedMetric, MetricDefinition, MetricMeta, CONTRIBUTION_FORMAT,
};
pub use dispatch::{MetricDispatcher, Predicate, Rule};
pub use strategy::MetricStrategy;
pub use title::{truncate_title, MAX_TITLE_LENGTH, POP_TITLE_SUFFIX};
