//! Integration tests for rolling aggregation and day selection.

use covid_common::test_utils::{assert_approx_eq, property_testing, series_fixtures};
use covid_common::{Divisor, Metric};
use covid_series::{
    aggregate_series, latest_informative, AggregationConfig, Selection, TrackedMetric,
};
use proptest::prelude::*;

fn confirmed_config(window: usize) -> AggregationConfig {
    AggregationConfig::new(vec![TrackedMetric::cumulative(Metric::Confirmed)], window).unwrap()
}

#[test]
fn test_reference_week() {
    let series = series_fixtures::cumulative_series(
        "Ontario",
        Metric::Confirmed,
        &[100.0, 110.0, 110.0, 125.0],
    );
    let out = aggregate_series(&confirmed_config(7), &series).unwrap();

    let deltas: Vec<f64> = out
        .iter()
        .map(|r| r.delta(Metric::Confirmed).unwrap())
        .collect();
    assert_eq!(deltas, vec![100.0, 10.0, 0.0, 15.0]);

    let averages: Vec<f64> = out
        .iter()
        .map(|r| r.rolling_average(Metric::Confirmed).unwrap())
        .collect();
    for (got, want) in averages.iter().zip([100.0 / 7.0, 110.0 / 7.0, 110.0 / 7.0, 125.0 / 7.0]) {
        assert_approx_eq(*got, want, 1e-9);
    }
}

#[test]
fn test_window_forgets_old_days() {
    let series = series_fixtures::cumulative_series(
        "Test",
        Metric::Confirmed,
        &[3.0, 6.0, 9.0, 19.0, 29.0],
    );
    let out = aggregate_series(&confirmed_config(2), &series).unwrap();

    let last = out.last().unwrap();
    assert_approx_eq(last.rolling_average(Metric::Confirmed).unwrap(), 10.0, 1e-9);
}

#[test]
fn test_samples_seen_divisor_removes_warmup_bias() {
    let series = series_fixtures::cumulative_series("Test", Metric::Confirmed, &[10.0, 20.0]);
    let config = confirmed_config(7).with_divisor(Divisor::SamplesSeen);
    let out = aggregate_series(&config, &series).unwrap();

    assert_approx_eq(out[0].rolling_average(Metric::Confirmed).unwrap(), 10.0, 1e-9);
    assert_approx_eq(out[1].rolling_average(Metric::Confirmed).unwrap(), 10.0, 1e-9);
}

#[test]
fn test_aggregate_then_select() {
    let series = series_fixtures::cumulative_series(
        "Test",
        Metric::Confirmed,
        &[0.0, 5.0, 12.0, 12.0, 12.0],
    );
    let out = aggregate_series(&confirmed_config(7), &series).unwrap();

    match latest_informative(&out, &[Metric::Confirmed]) {
        Selection::Found { index, today, previous } => {
            assert_eq!(index, 2);
            assert_eq!(today.delta(Metric::Confirmed), Some(7.0));
            assert_eq!(previous.and_then(|p| p.delta(Metric::Confirmed)), Some(5.0));
        }
        Selection::NoValidData => panic!("expected day 2 to be selected"),
    }
}

proptest! {
    #[test]
    fn prop_output_matches_input_days(values in property_testing::cumulative_strategy(40)) {
        let series = series_fixtures::cumulative_series("Prop", Metric::Confirmed, &values);
        let out = aggregate_series(&confirmed_config(7), &series).unwrap();

        prop_assert_eq!(out.len(), series.len());
        for (aggregated, record) in out.iter().zip(series.records()) {
            prop_assert_eq!(aggregated.date(), record.date);
        }
    }

    #[test]
    fn prop_deltas_sum_to_last_total(values in property_testing::cumulative_strategy(40)) {
        let series = series_fixtures::cumulative_series("Prop", Metric::Confirmed, &values);
        let out = aggregate_series(&confirmed_config(7), &series).unwrap();

        let total: f64 = out.iter().filter_map(|r| r.delta(Metric::Confirmed)).sum();
        prop_assert!((total - values.last().copied().unwrap_or(0.0)).abs() < 1e-6);
    }

    #[test]
    fn prop_constant_increase_settles(step in 1u32..1000, window in 1usize..10) {
        let step = f64::from(step);
        let values: Vec<f64> = (1..=window * 2).map(|i| step * i as f64).collect();
        let series = series_fixtures::cumulative_series("Prop", Metric::Confirmed, &values);
        let out = aggregate_series(&confirmed_config(window), &series).unwrap();

        for record in &out[window - 1..] {
            let average = record.rolling_average(Metric::Confirmed).unwrap();
            prop_assert!((average - step).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_constant_total_settles_to_zero(
        total in 0u32..1_000_000,
        window in 1usize..10,
        extra in 0usize..20,
    ) {
        let values = vec![f64::from(total); window + extra + 1];
        let series = series_fixtures::cumulative_series("Prop", Metric::Confirmed, &values);
        let out = aggregate_series(&confirmed_config(window), &series).unwrap();

        for (k, record) in out.iter().enumerate() {
            if k >= 1 {
                prop_assert_eq!(record.delta(Metric::Confirmed), Some(0.0));
            }
            if k >= window {
                prop_assert_eq!(record.rolling_average(Metric::Confirmed), Some(0.0));
            }
        }
    }

    #[test]
    fn prop_warmup_divides_by_full_width(values in property_testing::cumulative_strategy(7)) {
        let series = series_fixtures::cumulative_series("Prop", Metric::Confirmed, &values);
        let out = aggregate_series(&confirmed_config(7), &series).unwrap();

        for (i, record) in out.iter().enumerate() {
            let expected = values[i] / 7.0;
            let average = record.rolling_average(Metric::Confirmed).unwrap();
            prop_assert!((average - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_missing_readings_never_produce_nan(values in property_testing::sparse_strategy(30)) {
        let series = series_fixtures::sparse_series("Prop", Metric::Confirmed, &values);
        let out = aggregate_series(&confirmed_config(5), &series).unwrap();

        for record in &out {
            prop_assert!(record.delta(Metric::Confirmed).unwrap().is_finite());
            prop_assert!(record.rolling_average(Metric::Confirmed).unwrap().is_finite());
        }
    }
}
