//! Visualization metadata: the input of the compiler.

pub mod bucket;
pub mod category;
pub mod filter;
pub mod measure;
pub mod types;
mod wire;

pub use bucket::{Buckets, MetadataObject};
pub use category::Category;
pub use filter::{AttributeFilter, DateBound, DateFilter, Filter};
pub use measure::{Measure, MeasureSort};
pub use types::{
    Aggregation, CategoryType, MeasureType, SortDirection, UnknownAggregation, VisualizationType,
};
