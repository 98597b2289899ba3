//! Query-language expressions for generated metrics.
//!
//! ```text
//! derived        SELECT SUM([<uri>]) WHERE [<attr>] IN ([<el>],[<el>])
//! contribution   SELECT (<inner> WHERE ..) / (<inner> BY ALL [<attr>] WHERE ..)
//! pop            SELECT <inner> FOR PREVIOUS ([<date attr>])
//! ```

use crate::model::{AttributeFilter, Measure};

/// `[<uri>]`
pub fn object_ref(uri: &str) -> String {
    format!("[{uri}]")
}

/// Condition of one measure filter, or `None` when it selects no elements.
///
/// `[<attributeUri>] [NOT ]IN ([<e1>],[<e2>])`
pub fn filter_condition(filter: &AttributeFilter) -> Option<String> {
    if !filter.is_executable() {
        return None;
    }

    let elements: Vec<String> = filter.elements.iter().map(|e| object_ref(e)).collect();
    let negation = if filter.negative_selection { "NOT " } else { "" };

    Some(format!(
        "{} {}IN ({})",
        object_ref(&filter.attribute),
        negation,
        elements.join(",")
    ))
}

/// ` WHERE <c1> AND <c2>` for the executable filters, empty otherwise.
pub fn where_suffix(filters: &[AttributeFilter]) -> String {
    let conditions: Vec<String> = filters.iter().filter_map(filter_condition).collect();

    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

/// `SELECT <AGG>([<uri>])`, or `SELECT [<uri>]` without an aggregation.
pub fn aggregate_expression(measure: &Measure) -> String {
    let reference = object_ref(&measure.object_uri);

    match measure.aggregation {
        Some(aggregation) => format!("SELECT {}({})", aggregation.function_name(), reference),
        None => format!("SELECT {reference}"),
    }
}

/// Generated aggregate including the measure filters.
pub fn derived_expression(measure: &Measure) -> String {
    format!(
        "{}{}",
        aggregate_expression(measure),
        where_suffix(&measure.measure_filters)
    )
}

/// Share of the measure in its total across `category_attribute`.
///
/// The filter clause is applied identically to numerator and denominator.
/// Plain metrics are referenced as they are; facts, attributes and filtered
/// metrics go through [`aggregate_expression`].
pub fn contribution_expression(measure: &Measure, is_derived: bool, category_attribute: &str) -> String {
    let inner = if is_derived {
        aggregate_expression(measure)
    } else {
        format!("SELECT {}", object_ref(&measure.object_uri))
    };
    let filters = where_suffix(&measure.measure_filters);

    format!(
        "SELECT ({inner}{filters}) / ({inner} BY ALL {}{filters})",
        object_ref(category_attribute)
    )
}

/// Wrap `inner` (already bracketed or parenthesized) for the previous period.
pub fn pop_expression(date_attribute: &str, inner: &str) -> String {
    format!("SELECT {inner} FOR PREVIOUS ({})", object_ref(date_attribute))
}
