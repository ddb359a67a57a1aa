//! Test utilities and shared fixtures for the workspace.
//!
//! Enabled for other crates through the `testing` feature.

use crate::{DailyRecord, Metric, Series};
use chrono::{Duration, NaiveDate};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests once per test binary.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for a calendar date.
pub fn mock_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Series fixtures built on consecutive days.
pub mod series_fixtures {
    use super::*;

    /// First day of every fixture series.
    pub fn start_date() -> NaiveDate {
        mock_date(2021, 1, 1)
    }

    /// A series with one metric set per day from `values`.
    pub fn cumulative_series(entity: &str, metric: Metric, values: &[f64]) -> Series {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, &v)| DailyRecord::new(day(i)).with(metric, v))
            .collect();
        Series::new(entity, records)
    }

    /// A series with optional readings, `None` leaving the day empty.
    pub fn sparse_series(entity: &str, metric: Metric, values: &[Option<f64>]) -> Series {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut record = DailyRecord::new(day(i));
                record.set(metric, *v);
                record
            })
            .collect();
        Series::new(entity, records)
    }

    /// Cases and deaths with their reported daily changes.
    ///
    /// `rows` holds `(confirmed, deaths)` totals per day.
    pub fn case_series(entity: &str, rows: &[(f64, f64)]) -> Series {
        let mut previous = (0.0, 0.0);
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, &(confirmed, deaths))| {
                let record = DailyRecord::new(day(i))
                    .with(Metric::Confirmed, confirmed)
                    .with(Metric::Deaths, deaths)
                    .with(Metric::ChangeConfirmed, confirmed - previous.0)
                    .with(Metric::ChangeDeaths, deaths - previous.1);
                previous = (confirmed, deaths);
                record
            })
            .collect();
        Series::new(entity, records)
    }

    /// Date of the `offset`-th fixture day.
    pub fn day(offset: usize) -> NaiveDate {
        start_date() + Duration::days(i64::try_from(offset).unwrap_or(i64::MAX))
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal configuration file in TOML.
    pub fn minimal_config_toml() -> &'static str {
        r#"
[sources]
tracker_url = "https://api.covid19tracker.ca"
owid_csv_path = "owid-covid-data.csv"

[aggregation]
window_size = 7
"#
    }

    /// A configuration file setting every section.
    pub fn full_config_toml() -> &'static str {
        concat!(
            "[sources]\n",
            "tracker_url = \"http://localhost:9000\"\n",
            "owid_csv_path = \"/tmp/owid.csv\"\n",
            "owid_csv_url = \"http://localhost:9000/owid.csv\"\n",
            "timeout_seconds = 10\n",
            "\n",
            "[aggregation]\n",
            "window_size = 14\n",
            "divisor = \"samples_seen\"\n",
            "\n",
            "[charts]\n",
            "output_dir = \"/tmp/charts\"\n",
            "width = 1024\n",
            "height = 768\n",
            "background_color = \"#f8f9fa\"\n",
            "vaccination_cutoff = \"2021-01-01\"\n",
            "\n",
            "[telegram]\n",
            "token = \"123:abc\"\n",
            "chat_id = \"-1001234\"\n",
            "api_url = \"http://localhost:9001\"\n",
            "\n",
            "[logging]\n",
            "level = \"debug\"\n",
            "json_format = true\n",
        )
    }
}

/// Property-based testing strategies.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Non-decreasing cumulative readings, as a well-behaved source reports them.
    pub fn cumulative_strategy(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0u32..10_000, 0..max_len).prop_map(|steps| {
            steps
                .into_iter()
                .scan(0.0, |total, step| {
                    *total += f64::from(step);
                    Some(*total)
                })
                .collect()
        })
    }

    /// Readings where roughly a quarter of the days are missing.
    pub fn sparse_strategy(max_len: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
        prop::collection::vec(
            prop_oneof![1 => Just(None), 3 => (0u32..1_000_000).prop_map(|v| Some(f64::from(v)))],
            0..max_len,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_case_series_changes() {
        let series = series_fixtures::case_series("Test", &[(100.0, 1.0), (110.0, 1.0)]);
        assert_eq!(series.len(), 2);
        let second = &series.records()[1];
        assert_eq!(second.change_confirmed, Some(10.0));
        assert_eq!(second.change_deaths, Some(0.0));
        assert_eq!(second.date, series_fixtures::day(1));
    }
}
