//! Content-addressed identifiers of generated metrics.
//!
//! ```text
//! <type>_<projectId>_<objectId>.generated.<hash>[_filtered]_<aggregation>
//! ```
//!
//! Equal definitions always map to the same identifier, which lets the
//! server reuse a metric it has already materialized.

use crate::compile::{CompileError, CompileResult};
use crate::metric::hash::definition_hash;
use crate::model::Measure;

/// Aggregation token of contribution metrics.
pub const PERCENT_TOKEN: &str = "percent";
/// Aggregation token of period-over-period metrics.
pub const POP_TOKEN: &str = "pop";
/// Aggregation token of derived metrics without an aggregation function.
pub const BASE_TOKEN: &str = "base";

/// Project and object ids parsed from `/gdc/md/<projectId>/obj/<objectId>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRef<'a> {
    pub project_id: &'a str,
    pub object_id: &'a str,
}

impl<'a> ObjectRef<'a> {
    pub fn parse(uri: &'a str) -> CompileResult<Self> {
        let segments: Vec<&str> = uri.split('/').collect();

        match (segments.get(3), segments.get(5)) {
            (Some(&project_id), Some(&object_id))
                if !project_id.is_empty() && !object_id.is_empty() =>
            {
                Ok(Self {
                    project_id,
                    object_id,
                })
            }
            _ => Err(CompileError::MalformedObjectUri(uri.to_string())),
        }
    }
}

/// Aggregation token of a derived metric: the lowercase aggregation or `base`.
pub fn derived_token(measure: &Measure) -> &'static str {
    measure
        .aggregation
        .map(|a| a.as_str())
        .unwrap_or(BASE_TOKEN)
}

/// Identifier of a generated metric built from `measure`.
pub fn generated_identifier(
    measure: &Measure,
    token: &str,
    expression: &str,
    title: &str,
    format: &str,
) -> CompileResult<String> {
    let object = ObjectRef::parse(&measure.object_uri)?;
    let hash = definition_hash(expression, title, format);
    let filtered = if measure.has_executable_filters() {
        "_filtered"
    } else {
        ""
    };

    Ok(format!(
        "{}_{}_{}.generated.{}{}_{}",
        measure.measure_type, object.project_id, object.object_id, hash, filtered, token
    ))
}
