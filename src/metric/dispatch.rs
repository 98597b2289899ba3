//! Rule table choosing the metric strategy of each measure.

use std::fmt;

use tracing::debug;

use crate::compile::{CompileError, CompileResult};
use crate::metric::strategy::MetricStrategy;
use crate::model::{Measure, MeasureType};

/// A boolean test over a measure.
pub type Predicate = fn(&Measure) -> bool;

pub fn is_pop(measure: &Measure) -> bool {
    measure.show_pop
}

pub fn is_contribution(measure: &Measure) -> bool {
    measure.show_in_percent
}

/// Facts, attributes and any measure with selected filter elements need a
/// generated aggregate.
pub fn is_derived(measure: &Measure) -> bool {
    matches!(
        measure.measure_type,
        MeasureType::Fact | MeasureType::Attribute
    ) || measure.has_executable_filters()
}

pub fn is_calculated_measure(measure: &Measure) -> bool {
    measure.measure_type == MeasureType::Metric
}

/// A strategy guarded by predicates that must all hold.
#[derive(Clone)]
pub struct Rule {
    pub predicates: Vec<Predicate>,
    pub strategy: MetricStrategy,
}

impl Rule {
    pub fn new(predicates: Vec<Predicate>, strategy: MetricStrategy) -> Self {
        Self {
            predicates,
            strategy,
        }
    }

    pub fn matches(&self, measure: &Measure) -> bool {
        self.predicates.iter().all(|p| p(measure))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("predicates", &self.predicates.len())
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// Ordered rule table. Rules are tried in registration order and the first
/// rule whose predicates all hold wins; there is no fallback.
#[derive(Debug, Clone)]
pub struct MetricDispatcher {
    rules: Vec<Rule>,
}

impl MetricDispatcher {
    /// The standard rule table.
    ///
    /// Order is priority: a measure that is both period-over-period and
    /// contribution must hit the combined rule before either single rule, and
    /// the flag rules must precede the type rules.
    pub fn new() -> Self {
        Self::empty()
            .with_rule(&[is_pop, is_contribution], MetricStrategy::ContributionPop)
            .with_rule(&[is_pop], MetricStrategy::Pop)
            .with_rule(&[is_contribution], MetricStrategy::Contribution)
            .with_rule(&[is_derived], MetricStrategy::Derived)
            .with_rule(&[is_calculated_measure], MetricStrategy::Pure)
    }

    /// A dispatcher with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule after the existing ones.
    pub fn with_rule(mut self, predicates: &[Predicate], strategy: MetricStrategy) -> Self {
        self.rules.push(Rule::new(predicates.to_vec(), strategy));
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Strategy for the measure at `measure_index`.
    ///
    /// # Errors
    ///
    /// [`CompileError::UnknownMetricStrategy`] when no rule matches, which
    /// means the measure is malformed.
    pub fn dispatch(&self, measure: &Measure, measure_index: usize) -> CompileResult<MetricStrategy> {
        let strategy = self
            .rules
            .iter()
            .find(|rule| rule.matches(measure))
            .map(|rule| rule.strategy)
            .ok_or_else(|| CompileError::UnknownMetricStrategy {
                measure_index,
                object_uri: measure.object_uri.clone(),
            })?;

        debug!(
            measure_index,
            object_uri = %measure.object_uri,
            %strategy,
            "dispatched measure"
        );
        Ok(strategy)
    }
}

impl Default for MetricDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
