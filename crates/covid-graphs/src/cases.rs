//! Rolling averages of daily cases and deaths

use crate::{Axis, Chart, ChartConfig, ChartData, ChartLine};
use chrono::NaiveDate;
use covid_common::{title_case, Divisor, Metric, Result, Series};
use covid_series::{aggregate_series, AggregationConfig, TrackedMetric};

/// Case chart of one country or province
#[derive(Debug, Clone, PartialEq)]
pub struct CaseChart {
    /// Country or province shown
    pub entity: String,
    /// Rolling window in days
    pub window: usize,
    /// Day of each point
    pub dates: Vec<NaiveDate>,
    /// Rolling average of new cases
    pub cases: Vec<f64>,
    /// Rolling average of new deaths
    pub deaths: Vec<f64>,
}

impl CaseChart {
    /// Aggregates cumulative cases and deaths of `series`
    pub fn from_series(series: &Series, window: usize, divisor: Divisor) -> Result<Self> {
        let config = AggregationConfig::new(
            vec![
                TrackedMetric::cumulative(Metric::Confirmed),
                TrackedMetric::cumulative(Metric::Deaths),
            ],
            window,
        )?
        .with_divisor(divisor);

        let aggregated = aggregate_series(&config, series)?;
        let average = |metric| -> Vec<f64> {
            aggregated
                .iter()
                .map(|day| day.rolling_average(metric).unwrap_or(0.0))
                .collect()
        };

        Ok(Self {
            entity: series.entity().to_string(),
            window,
            dates: aggregated.iter().map(|day| day.date()).collect(),
            cases: average(Metric::Confirmed),
            deaths: average(Metric::Deaths),
        })
    }
}

impl Chart for CaseChart {
    fn chart_config(&self) -> ChartConfig {
        let title = title_case(&format!("COVID Cases for {}", self.entity));
        ChartConfig::titled(format!("{title} ({}-day Average)", self.window)).with_axes("Cases", "Deaths")
    }

    fn chart_data(&self) -> ChartData {
        ChartData {
            dates: self.dates.clone(),
            lines: vec![
                ChartLine::new("Cases", Axis::Primary, self.cases.clone()).with_color("#1f77b4"),
                ChartLine::new("Deaths", Axis::Secondary, self.deaths.clone()).with_color("#ff0000"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covid_common::test_utils::{assert_approx_eq, series_fixtures};

    #[test]
    fn test_case_chart_averages() {
        let series = series_fixtures::case_series(
            "new zealand",
            &[(70.0, 7.0), (140.0, 7.0), (140.0, 14.0)],
        );
        let chart = CaseChart::from_series(&series, 7, Divisor::FixedWindow).unwrap();

        assert_eq!(chart.dates.len(), 3);
        assert_approx_eq(chart.cases[0], 10.0, 1e-9);
        assert_approx_eq(chart.cases[2], 20.0, 1e-9);
        assert_approx_eq(chart.deaths[1], 1.0, 1e-9);
        assert_approx_eq(chart.deaths[2], 2.0, 1e-9);
    }

    #[test]
    fn test_case_chart_titles() {
        let series = series_fixtures::case_series("ontario", &[(1.0, 0.0)]);
        let chart = CaseChart::from_series(&series, 7, Divisor::FixedWindow).unwrap();
        let config = chart.chart_config();

        assert_eq!(config.title, "Covid Cases For Ontario (7-day Average)");
        assert_eq!(config.primary_label, "Cases");
        assert_eq!(config.secondary_label, "Deaths");

        let data = chart.chart_data();
        assert!(data.validate().is_ok());
        assert_eq!(data.lines[1].axis, Axis::Secondary);
    }

    #[test]
    fn test_empty_series_yields_unrenderable_chart() {
        let chart = CaseChart::from_series(&Series::new("Nowhere", Vec::new()), 7, Divisor::FixedWindow)
            .unwrap();
        assert!(chart.chart_data().validate().is_err());
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let series = series_fixtures::case_series("Test", &[(1.0, 0.0)]);
        assert!(CaseChart::from_series(&series, 0, Divisor::FixedWindow).is_err());
    }
}
