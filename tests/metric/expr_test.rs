use vizexec::metric::expr::{
    contribution_expression, derived_expression, filter_condition, pop_expression,
};
use vizexec::model::{Aggregation, AttributeFilter, Measure, MeasureType};

const DATE_ATTRIBUTE: &str = "/gdc/md/p1/obj/20";
const CATEGORY_ATTRIBUTE: &str = "/gdc/md/p1/obj/10";

fn filter(attribute: &str, elements: &[&str], negative: bool) -> AttributeFilter {
    AttributeFilter {
        attribute: attribute.to_string(),
        display_form: format!("{attribute}/df"),
        elements: elements.iter().map(|e| e.to_string()).collect(),
        negative_selection: negative,
    }
}

fn amount() -> Measure {
    Measure::new("/gdc/md/p1/obj/7", MeasureType::Fact, "Amount", "#,##0")
}

#[test]
fn test_filter_condition_brackets_each_element() {
    let positive = filter("/gdc/md/p1/obj/3", &["a", "b"], false);
    let negative = filter("/gdc/md/p1/obj/3", &["a"], true);

    insta::assert_snapshot!(filter_condition(&positive).unwrap(), @"[/gdc/md/p1/obj/3] IN ([a],[b])");
    insta::assert_snapshot!(filter_condition(&negative).unwrap(), @"[/gdc/md/p1/obj/3] NOT IN ([a])");
}

#[test]
fn test_derived_with_aggregation_and_filters() {
    let measure = amount()
        .with_aggregation(Aggregation::Sum)
        .with_filter(filter("/gdc/md/p1/obj/3", &["e1", "e2"], false))
        .with_filter(filter("/gdc/md/p1/obj/8", &[], false))
        .with_filter(filter("/gdc/md/p1/obj/9", &["e5"], true));

    insta::assert_snapshot!(
        derived_expression(&measure),
        @"SELECT SUM([/gdc/md/p1/obj/7]) WHERE [/gdc/md/p1/obj/3] IN ([e1],[e2]) AND [/gdc/md/p1/obj/9] NOT IN ([e5])"
    );
}

#[test]
fn test_derived_without_aggregation() {
    insta::assert_snapshot!(derived_expression(&amount()), @"SELECT [/gdc/md/p1/obj/7]");
}

#[test]
fn test_contribution_of_plain_metric() {
    let measure = Measure::new("/gdc/md/p1/obj/5", MeasureType::Metric, "Revenue", "#,##0");

    insta::assert_snapshot!(
        contribution_expression(&measure, false, CATEGORY_ATTRIBUTE),
        @"SELECT (SELECT [/gdc/md/p1/obj/5]) / (SELECT [/gdc/md/p1/obj/5] BY ALL [/gdc/md/p1/obj/10])"
    );
}

#[test]
fn test_contribution_repeats_filter_on_both_sides() {
    let measure = amount()
        .with_aggregation(Aggregation::Avg)
        .with_filter(filter("/gdc/md/p1/obj/3", &["e1"], false));

    insta::assert_snapshot!(
        contribution_expression(&measure, true, CATEGORY_ATTRIBUTE),
        @"SELECT (SELECT AVG([/gdc/md/p1/obj/7]) WHERE [/gdc/md/p1/obj/3] IN ([e1])) / (SELECT AVG([/gdc/md/p1/obj/7]) BY ALL [/gdc/md/p1/obj/10] WHERE [/gdc/md/p1/obj/3] IN ([e1]))"
    );
}

#[test]
fn test_pop_wraps_inner_expression() {
    insta::assert_snapshot!(
        pop_expression(DATE_ATTRIBUTE, "[/gdc/md/p1/obj/5]"),
        @"SELECT [/gdc/md/p1/obj/5] FOR PREVIOUS ([/gdc/md/p1/obj/20])"
    );
    insta::assert_snapshot!(
        pop_expression(DATE_ATTRIBUTE, "(SELECT SUM([/gdc/md/p1/obj/7]))"),
        @"SELECT (SELECT SUM([/gdc/md/p1/obj/7])) FOR PREVIOUS ([/gdc/md/p1/obj/20])"
    );
}
