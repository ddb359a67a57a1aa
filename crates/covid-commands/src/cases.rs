//! Daily case and death summary.

use crate::summary::Summary;
use covid_common::{format_count, format_thousands, per_million, DailyRecord, Metric, Series};
use covid_series::{latest_informative, Selection};
use tracing::debug;

/// Metrics whose reported change marks a day as worth summarizing.
pub const CASE_GATES: [Metric; 2] = [Metric::ChangeConfirmed, Metric::ChangeDeaths];

/// Reply sent when no day carries any new cases or deaths.
pub const NO_VALID_DATA: &str = "Couldn't find valid data.";

const ROWS: [(&str, Metric); 2] = [("- Cases", Metric::Confirmed), ("- Deaths", Metric::Deaths)];

/// Builds the "Summary for {entity}" table of the latest informative day.
///
/// Returns `None` when every day has zero or missing changes.
pub fn case_summary(series: &Series) -> Option<Summary> {
    let Selection::Found { index, today, .. } = latest_informative(series.records(), &CASE_GATES)
    else {
        debug!("No informative day for {}", series.entity());
        return None;
    };
    debug!("Summarizing {} as of day {}", series.entity(), index);

    let mut summary = Summary::new(
        format!("Summary for {}", series.entity()),
        today.date,
        "Stat",
        "Count",
    );

    summary.section("Today");
    for (label, metric) in ROWS {
        if let Some(current) = today.get(metric) {
            let before = last_known(&series.records()[..index], metric).unwrap_or(0.0);
            summary.row(label, format_count(current - before));
        }
    }

    let population = today.population.or_else(|| series.latest_population());
    summary.section("Total");
    for (label, metric) in ROWS {
        let Some(current) = today.get(metric) else {
            continue;
        };
        summary.row(label, format_count(current));
        if metric == Metric::Confirmed {
            if let Some(rate) = per_million(current, population) {
                summary.row("- Cases/mil", format_thousands(rate));
            }
        }
    }

    Some(summary)
}

/// Most recent reading of `metric` among `earlier` days.
fn last_known(earlier: &[DailyRecord], metric: Metric) -> Option<f64> {
    earlier.iter().rev().find_map(|record| record.get(metric))
}

/// Rendered case summary, or the no-data reply.
pub fn case_reply(series: &Series) -> String {
    case_summary(series).map_or_else(|| NO_VALID_DATA.to_string(), |summary| summary.render())
}
