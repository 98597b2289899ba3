//! Compilation of visualization metadata into an execution configuration.
//!
//! ```text
//! MetadataObject → dispatch per measure → generated metrics
//!                → columns / orderBy / definitions / where → ExecutionConfiguration
//! ```
//!
//! # Example
//!
//! ```
//! use vizexec::compile::{compile_json, CompileOptions};
//!
//! let md = r##"{
//!     "type": "table",
//!     "buckets": {
//!         "measures": [{ "measure": {
//!             "objectUri": "/gdc/md/p1/obj/5", "type": "metric",
//!             "title": "Revenue", "format": "#,##0"
//!         } }],
//!         "categories": [],
//!         "filters": []
//!     }
//! }"##;
//!
//! let config = compile_json(md, CompileOptions::default())?;
//! assert_eq!(config.columns, vec!["/gdc/md/p1/obj/5"]);
//! # Ok::<(), vizexec::CompileError>(())
//! ```

use crate::execution::{ExecutionAssembler, ExecutionConfiguration};
use crate::model::MetadataObject;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// No rule of the dispatcher matched the measure.
    #[error("Unknown metric strategy for measure {measure_index} ({object_uri})")]
    UnknownMetricStrategy {
        measure_index: usize,
        object_uri: String,
    },

    /// A period-over-period measure has neither a date category nor a date filter.
    #[error("Measure {measure_index} compares to the previous period but no date attribute is available")]
    MissingDateAttribute { measure_index: usize },

    /// A contribution measure has no category to compute the total over.
    #[error("Measure {measure_index} is shown in percent but no category attribute is available")]
    MissingContributionCategory { measure_index: usize },

    #[error("Object uri has no project and object id: {0}")]
    MalformedObjectUri(String),

    #[error("Invalid metadata object: {0}")]
    InvalidMetadata(#[from] serde_json::Error),
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Options
// ============================================================================

/// Options for compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Leave date categories and date filters out of the columns and `where`.
    pub remove_date_items: bool,
}

impl CompileOptions {
    pub fn with_remove_date_items(mut self, remove: bool) -> Self {
        self.remove_date_items = remove;
        self
    }
}

// ============================================================================
// Compilation Functions
// ============================================================================

/// Compile a metadata object with the standard rule table.
pub fn compile(md: &MetadataObject, options: &CompileOptions) -> CompileResult<ExecutionConfiguration> {
    ExecutionAssembler::new().assemble(md, options)
}

/// Parse a metadata object from JSON and compile it.
pub fn compile_json(json: &str, options: CompileOptions) -> CompileResult<ExecutionConfiguration> {
    let md = MetadataObject::from_json(json)?;
    compile(&md, &options)
}
