//! # vizexec
//!
//! Compiles visualization metadata into tabular-data execution requests.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          MetadataObject (measures, categories,           │
//! │                 filters, chart type)                     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metric: dispatch + strategies]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Generated metrics (expressions, identifiers, titles)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [execution + filter]
//! ┌─────────────────────────────────────────────────────────┐
//! │   ExecutionConfiguration (columns, orderBy, where,       │
//! │                definitions, metricMappings)              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [client: transport]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  ExecutionResult                         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything above the client is synchronous and free of I/O.

pub mod client;
pub mod compile;
pub mod config;
pub mod execution;
pub mod filter;
pub mod metric;
pub mod model;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{compile, compile_json, CompileError, CompileOptions, CompileResult};
    pub use crate::execution::{ExecutionAssembler, ExecutionConfiguration, MetricMapping, OrderBy};
    pub use crate::metric::{Definition, GeneratedMetric, MetricDispatcher, MetricStrategy};
    pub use crate::model::{
        Aggregation, AttributeFilter, Category, DateBound, DateFilter, Filter, Measure,
        MeasureSort, MeasureType, MetadataObject, SortDirection, VisualizationType,
    };
}

pub use compile::{compile, CompileError, CompileOptions};
pub use execution::{ExecutionAssembler, ExecutionConfiguration};
pub use model::MetadataObject;
