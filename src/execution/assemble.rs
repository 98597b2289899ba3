//! Assembly of the execution configuration from a metadata object.

use tracing::debug;

use crate::compile::{CompileOptions, CompileResult};
use crate::execution::definitions::{DefinitionSorter, DependencyOrder};
use crate::execution::order::{order_by, CategoryColumn};
use crate::execution::{ExecutionConfiguration, MetricMapping};
use crate::filter::{build_where, WhereClause};
use crate::metric::{GeneratedMetric, MetricDispatcher};
use crate::model::{Filter, MetadataObject};

/// Compiles metadata objects into execution configurations.
///
/// Holds the rule table and the definition sorter; both are fixed at
/// construction and the assembler is shareable between threads.
pub struct ExecutionAssembler {
    dispatcher: MetricDispatcher,
    sorter: Box<dyn DefinitionSorter>,
}

impl ExecutionAssembler {
    /// Assembler with the standard rule table and [`DependencyOrder`].
    pub fn new() -> Self {
        Self::with_parts(MetricDispatcher::new(), Box::new(DependencyOrder))
    }

    pub fn with_parts(dispatcher: MetricDispatcher, sorter: Box<dyn DefinitionSorter>) -> Self {
        Self { dispatcher, sorter }
    }

    pub fn dispatcher(&self) -> &MetricDispatcher {
        &self.dispatcher
    }

    /// Generated metrics of every measure, in measure order.
    pub fn metrics(&self, md: &MetadataObject) -> CompileResult<Vec<GeneratedMetric>> {
        let buckets = &md.buckets;
        let mut metrics = Vec::new();

        for (index, measure) in buckets.measures.iter().enumerate() {
            let strategy = self.dispatcher.dispatch(measure, index)?;
            metrics.extend(strategy.build(measure, buckets, index)?);
        }

        Ok(metrics)
    }

    /// Compile `md` into the payload of an execution request.
    pub fn assemble(
        &self,
        md: &MetadataObject,
        options: &CompileOptions,
    ) -> CompileResult<ExecutionConfiguration> {
        let metrics = self.metrics(md)?;

        let (categories, filters): (Vec<CategoryColumn>, Vec<Filter>) = if options.remove_date_items {
            (
                md.buckets
                    .categories
                    .iter()
                    .filter(|c| !c.is_date())
                    .map(CategoryColumn::from)
                    .collect(),
                md.buckets
                    .filters
                    .iter()
                    .filter(|f| !f.is_date())
                    .cloned()
                    .collect(),
            )
        } else {
            (
                md.buckets.categories.iter().map(CategoryColumn::from).collect(),
                md.buckets.filters.clone(),
            )
        };

        let columns: Vec<String> = categories
            .iter()
            .map(|c| c.element.as_str())
            .chain(metrics.iter().map(|m| m.element.as_str()))
            .filter(|element| !element.is_empty())
            .map(str::to_string)
            .collect();

        let order_by = order_by(&categories, &metrics, md.is_bar_chart());

        let definitions = self
            .sorter
            .sort_definitions(metrics.iter().filter_map(|m| m.definition.clone()).collect());

        let where_clause = if columns.is_empty() {
            WhereClause::new()
        } else {
            build_where(&filters)
        };

        let metric_mappings: Vec<MetricMapping> = metrics.iter().map(MetricMapping::from).collect();

        debug!(
            columns = columns.len(),
            definitions = definitions.len(),
            order_by = order_by.len(),
            "assembled execution configuration"
        );

        Ok(ExecutionConfiguration {
            columns,
            order_by,
            definitions,
            where_clause,
            metric_mappings,
        })
    }
}

impl Default for ExecutionAssembler {
    fn default() -> Self {
        Self::new()
    }
}
