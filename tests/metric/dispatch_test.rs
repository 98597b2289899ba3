use vizexec::compile::CompileError;
use vizexec::metric::dispatch::{is_calculated_measure, is_derived};
use vizexec::metric::{MetricDispatcher, MetricStrategy};
use vizexec::model::{AttributeFilter, Measure, MeasureType};

fn metric() -> Measure {
    Measure::new("/gdc/md/p1/obj/5", MeasureType::Metric, "Revenue", "#,##0")
}

fn fact() -> Measure {
    Measure::new("/gdc/md/p1/obj/7", MeasureType::Fact, "Amount", "#,##0.00")
}

fn region_filter(elements: &[&str]) -> AttributeFilter {
    AttributeFilter {
        attribute: "/gdc/md/p1/obj/3".to_string(),
        display_form: "/gdc/md/p1/obj/4".to_string(),
        elements: elements.iter().map(|e| e.to_string()).collect(),
        negative_selection: false,
    }
}

fn strategy_of(measure: &Measure) -> MetricStrategy {
    MetricDispatcher::new().dispatch(measure, 0).unwrap()
}

#[test]
fn test_plain_metric_is_pure() {
    assert_eq!(strategy_of(&metric()), MetricStrategy::Pure);
}

#[test]
fn test_fact_and_attribute_are_derived() {
    assert_eq!(strategy_of(&fact()), MetricStrategy::Derived);

    let attribute = Measure::new("/gdc/md/p1/obj/9", MeasureType::Attribute, "Customers", "#,##0");
    assert_eq!(strategy_of(&attribute), MetricStrategy::Derived);
}

#[test]
fn test_filtered_metric_is_derived() {
    let measure = metric().with_filter(region_filter(&["/gdc/md/p1/obj/3/elements?id=1"]));
    assert_eq!(strategy_of(&measure), MetricStrategy::Derived);
}

#[test]
fn test_filter_without_elements_keeps_metric_pure() {
    let measure = metric().with_filter(region_filter(&[]));
    assert!(!is_derived(&measure));
    assert!(is_calculated_measure(&measure));
    assert_eq!(strategy_of(&measure), MetricStrategy::Pure);
}

#[test]
fn test_flags_take_priority_over_type() {
    assert_eq!(strategy_of(&metric().with_pop()), MetricStrategy::Pop);
    assert_eq!(strategy_of(&fact().with_pop()), MetricStrategy::Pop);
    assert_eq!(strategy_of(&metric().in_percent()), MetricStrategy::Contribution);
    assert_eq!(strategy_of(&fact().in_percent()), MetricStrategy::Contribution);
}

#[test]
fn test_pop_and_contribution_combined() {
    assert_eq!(
        strategy_of(&metric().with_pop().in_percent()),
        MetricStrategy::ContributionPop
    );
    assert_eq!(
        strategy_of(&fact().in_percent().with_pop()),
        MetricStrategy::ContributionPop
    );
}

#[test]
fn test_registration_order() {
    let dispatcher = MetricDispatcher::new();
    let order: Vec<MetricStrategy> = dispatcher.rules().iter().map(|r| r.strategy).collect();

    assert_eq!(
        order,
        vec![
            MetricStrategy::ContributionPop,
            MetricStrategy::Pop,
            MetricStrategy::Contribution,
            MetricStrategy::Derived,
            MetricStrategy::Pure,
        ]
    );
}

#[test]
fn test_dispatch_is_deterministic() {
    let dispatcher = MetricDispatcher::new();
    let measure = fact().with_filter(region_filter(&["/gdc/md/p1/obj/3/elements?id=1"]));

    let first = dispatcher.dispatch(&measure, 0).unwrap();
    for _ in 0..10 {
        assert_eq!(dispatcher.dispatch(&measure, 0).unwrap(), first);
    }
}

#[test]
fn test_no_matching_rule_is_an_error() {
    let dispatcher = MetricDispatcher::empty();
    let err = dispatcher.dispatch(&metric(), 3).unwrap_err();

    match err {
        CompileError::UnknownMetricStrategy {
            measure_index,
            object_uri,
        } => {
            assert_eq!(measure_index, 3);
            assert_eq!(object_uri, "/gdc/md/p1/obj/5");
        }
        other => panic!("Expected UnknownMetricStrategy, got {:?}", other),
    }
}

#[test]
fn test_custom_rule_table() {
    let dispatcher = MetricDispatcher::empty().with_rule(&[is_derived], MetricStrategy::Derived);

    assert_eq!(dispatcher.dispatch(&fact(), 0).unwrap(), MetricStrategy::Derived);
    assert!(dispatcher.dispatch(&metric(), 1).is_err());
}
