//! Structured `where` clause of the execution request.
//!
//! ```json
//! {
//!   "<date dimension uri>": { "$between": [-1, 0], "$granularity": "GDC.time.year" },
//!   "$and": [
//!     { "<display form uri>": { "$in": [{ "id": "1" }] } },
//!     { "<display form uri>": { "$not": { "$in": [{ "id": "2" }] } } }
//!   ]
//! }
//! ```

use serde_json::{json, Map, Value};

use crate::model::{AttributeFilter, DateFilter, Filter};

/// The `where` object: date clauses keyed by dimension plus an `$and` list.
pub type WhereClause = Map<String, Value>;

/// Clause of one attribute filter, keyed by its display form.
pub fn attribute_filter_clause(filter: &AttributeFilter) -> Value {
    let ids: Vec<Value> = filter.element_ids().map(|id| json!({ "id": id })).collect();
    let selection = if filter.negative_selection {
        json!({ "$not": { "$in": ids } })
    } else {
        json!({ "$in": ids })
    };

    let mut clause = Map::new();
    clause.insert(filter.display_form.clone(), selection);
    Value::Object(clause)
}

/// `(dimension, { $between, $granularity })` of one date filter.
pub fn date_filter_clause(filter: &DateFilter) -> (String, Value) {
    (
        filter.dimension.clone(),
        json!({
            "$between": [filter.from, filter.to],
            "$granularity": filter.granularity,
        }),
    )
}

/// Build the `where` clause from the executable filters.
///
/// Date clauses are merged by key, a later filter on the same dimension
/// replacing an earlier one. Attribute clauses are listed under `$and`, which
/// is left out when there are none.
pub fn build_where(filters: &[Filter]) -> WhereClause {
    let mut clause = WhereClause::new();
    let mut conjunction = Vec::new();

    for filter in filters {
        match filter {
            Filter::Date(date) if date.is_executable() => {
                let (key, value) = date_filter_clause(date);
                clause.insert(key, value);
            }
            Filter::Attribute(attribute) if attribute.is_executable() => {
                conjunction.push(attribute_filter_clause(attribute));
            }
            _ => {}
        }
    }

    if !conjunction.is_empty() {
        clause.insert("$and".to_string(), Value::Array(conjunction));
    }

    clause
}
