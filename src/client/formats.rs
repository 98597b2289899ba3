//! Lookup of the original format of measures.
//!
//! Generated metrics (period-over-period, filtered) carry the format of the
//! metric they derive from, which the metadata object may not hold.

use serde_json::Value;
use tracing::debug;

use super::error::ClientResult;
use super::transport::Transport;
use crate::model::{Measure, MetadataObject};

/// Measures compared to the previous period or filtered need their format
/// read back from the server.
pub fn needs_original_format(measure: &Measure) -> bool {
    measure.show_pop || !measure.measure_filters.is_empty()
}

/// `metric.content.format` of an object, if the object is a metric.
fn metric_format(object: &Value) -> Option<&str> {
    object
        .get("metric")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.get("format"))
        .and_then(Value::as_str)
}

/// Copy of `measure` carrying the format of the object it references.
pub async fn with_original_format<T: Transport + ?Sized>(
    transport: &T,
    measure: &Measure,
) -> ClientResult<Measure> {
    if !needs_original_format(measure) {
        return Ok(measure.clone());
    }

    let object = transport
        .get_json(&measure.object_uri)
        .await?
        .into_json(&measure.object_uri)?;

    let mut resolved = measure.clone();
    match metric_format(&object) {
        Some(format) => resolved.format = format.to_string(),
        None => debug!(object_uri = %measure.object_uri, "no metric format, keeping measure format"),
    }
    Ok(resolved)
}

/// Copy of `md` whose measures carry their original formats.
///
/// All lookups are issued at once and awaited together; the first failure
/// fails the whole batch.
pub async fn with_original_formats<T: Transport + ?Sized>(
    transport: &T,
    md: &MetadataObject,
) -> ClientResult<MetadataObject> {
    let futures: Vec<_> = md
        .buckets
        .measures
        .iter()
        .map(|measure| with_original_format(transport, measure))
        .collect();

    let results = futures::future::join_all(futures).await;
    let measures = results.into_iter().collect::<ClientResult<Vec<_>>>()?;

    let mut resolved = md.clone();
    resolved.buckets.measures = measures;
    Ok(resolved)
}
