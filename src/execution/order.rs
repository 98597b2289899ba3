//! `orderBy` of the execution request.

use serde::{Deserialize, Serialize};

use crate::metric::GeneratedMetric;
use crate::model::{Category, SortDirection};

/// One `orderBy` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

/// A category column with its sort setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryColumn {
    pub element: String,
    pub sort: Option<SortDirection>,
}

impl From<&Category> for CategoryColumn {
    fn from(category: &Category) -> Self {
        Self {
            element: category.display_form.clone(),
            sort: category.sort,
        }
    }
}

/// Compute the ordering of the result.
///
/// Bar charts always sort descending by the first metric and ignore every
/// per-item sort. Otherwise each sorted column contributes one entry,
/// categories first, in column order.
pub fn order_by(
    categories: &[CategoryColumn],
    metrics: &[GeneratedMetric],
    is_bar_chart: bool,
) -> Vec<OrderBy> {
    if is_bar_chart {
        if let Some(first) = metrics.iter().find(|m| !m.element.is_empty()) {
            return vec![OrderBy {
                column: first.element.clone(),
                direction: SortDirection::Desc,
            }];
        }
    }

    let category_sorts = categories
        .iter()
        .filter_map(|c| c.sort.map(|direction| (&c.element, direction)));
    let metric_sorts = metrics
        .iter()
        .filter_map(|m| m.sort.map(|direction| (&m.element, direction)));

    category_sorts
        .chain(metric_sorts)
        .map(|(column, direction)| OrderBy {
            column: column.clone(),
            direction,
        })
        .collect()
}
