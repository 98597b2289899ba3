//! Metric construction strategies.
//!
//! Each strategy turns one measure into the metric columns that represent it.
//! Period-over-period strategies emit two metrics, the previous-period metric
//! first and the metric it is derived from second; every other strategy emits
//! exactly one.

use std::fmt;

use crate::compile::{CompileError, CompileResult};
use crate::metric::definition::{GeneratedMetric, MetricDefinition, MetricMeta, CONTRIBUTION_FORMAT};
use crate::metric::dispatch::is_derived;
use crate::metric::expr;
use crate::metric::identifier::{self, PERCENT_TOKEN, POP_TOKEN};
use crate::metric::title::{base_metric_title, pop_metric_title};
use crate::model::{Buckets, Measure};

/// How a measure becomes metric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricStrategy {
    /// Previous-period value of the contribution metric.
    ContributionPop,
    /// Previous-period value of the measure.
    Pop,
    /// Share of the measure in its total across the first category.
    Contribution,
    /// Generated aggregate over a fact, attribute or filtered metric.
    Derived,
    /// The metric object itself, by uri.
    Pure,
}

impl MetricStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            MetricStrategy::ContributionPop => "contribution_pop",
            MetricStrategy::Pop => "pop",
            MetricStrategy::Contribution => "contribution",
            MetricStrategy::Derived => "derived",
            MetricStrategy::Pure => "pure",
        }
    }

    /// Build the metrics of the measure at `measure_index`.
    ///
    /// `buckets` supplies the categories and filters the contribution and
    /// period-over-period variants anchor to.
    pub fn build(
        self,
        measure: &Measure,
        buckets: &Buckets,
        measure_index: usize,
    ) -> CompileResult<Vec<GeneratedMetric>> {
        match self {
            MetricStrategy::ContributionPop => contribution_pop_metrics(measure, buckets, measure_index),
            MetricStrategy::Pop => pop_metrics(measure, buckets, measure_index),
            MetricStrategy::Contribution => {
                Ok(vec![contribution_metric(measure, buckets, measure_index)?])
            }
            MetricStrategy::Derived => Ok(vec![derived_metric(measure, measure_index)?]),
            MetricStrategy::Pure => Ok(vec![pure_metric(measure, measure_index)]),
        }
    }
}

impl fmt::Display for MetricStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn base_meta(measure_index: usize) -> MetricMeta {
    MetricMeta {
        measure_index,
        is_pop: false,
    }
}

fn pop_meta(measure_index: usize) -> MetricMeta {
    MetricMeta {
        measure_index,
        is_pop: true,
    }
}

/// Assemble a generated metric, naming it by its content.
fn generated(
    measure: &Measure,
    token: &str,
    expression: String,
    title: String,
    format: String,
    meta: MetricMeta,
) -> CompileResult<GeneratedMetric> {
    let identifier =
        identifier::generated_identifier(measure, token, &expression, &title, &format)?;
    let definition = MetricDefinition {
        identifier,
        expression,
        title,
        format,
    };
    Ok(GeneratedMetric::generated(
        definition,
        measure.sort_for(meta.is_pop),
        meta,
    ))
}

pub fn pure_metric(measure: &Measure, measure_index: usize) -> GeneratedMetric {
    GeneratedMetric::reference(
        measure.object_uri.clone(),
        measure.sort_for(false),
        measure_index,
    )
}

pub fn derived_metric(measure: &Measure, measure_index: usize) -> CompileResult<GeneratedMetric> {
    generated(
        measure,
        identifier::derived_token(measure),
        expr::derived_expression(measure),
        base_metric_title(&measure.title),
        measure.format.clone(),
        base_meta(measure_index),
    )
}

pub fn contribution_metric(
    measure: &Measure,
    buckets: &Buckets,
    measure_index: usize,
) -> CompileResult<GeneratedMetric> {
    let category_attribute = buckets
        .contribution_attribute()
        .ok_or(CompileError::MissingContributionCategory { measure_index })?;

    generated(
        measure,
        PERCENT_TOKEN,
        expr::contribution_expression(measure, is_derived(measure), category_attribute),
        base_metric_title(&measure.title),
        CONTRIBUTION_FORMAT.to_string(),
        base_meta(measure_index),
    )
}

pub fn pop_metrics(
    measure: &Measure,
    buckets: &Buckets,
    measure_index: usize,
) -> CompileResult<Vec<GeneratedMetric>> {
    let date_attribute = buckets
        .date_attribute()
        .ok_or(CompileError::MissingDateAttribute { measure_index })?;

    let (inner, base) = if is_derived(measure) {
        let base = derived_metric(measure, measure_index)?;
        (
            format!("({})", expr::derived_expression(measure)),
            base,
        )
    } else {
        (
            expr::object_ref(&measure.object_uri),
            pure_metric(measure, measure_index),
        )
    };

    let pop = generated(
        measure,
        POP_TOKEN,
        expr::pop_expression(date_attribute, &inner),
        pop_metric_title(&measure.title),
        measure.format.clone(),
        pop_meta(measure_index),
    )?;

    Ok(vec![pop, base])
}

pub fn contribution_pop_metrics(
    measure: &Measure,
    buckets: &Buckets,
    measure_index: usize,
) -> CompileResult<Vec<GeneratedMetric>> {
    let date_attribute = buckets
        .date_attribute()
        .ok_or(CompileError::MissingDateAttribute { measure_index })?;
    let base = contribution_metric(measure, buckets, measure_index)?;
    let inner = format!("({})", base.expression().unwrap_or_default());

    let pop = generated(
        measure,
        POP_TOKEN,
        expr::pop_expression(date_attribute, &inner),
        pop_metric_title(&measure.title),
        CONTRIBUTION_FORMAT.to_string(),
        pop_meta(measure_index),
    )?;

    Ok(vec![pop, base])
}
