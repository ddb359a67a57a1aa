//! Backward scan for the most recent day with informative deltas.
//!
//! Sources sometimes publish trailing days with placeholder or zero values
//! before the real update lands. Reporting one of those as "today" would show
//! an all-zero summary, so the scan walks back to the last day on which at
//! least one gating metric moved.

use crate::aggregator::AggregatedRecord;
use chrono::NaiveDate;
use covid_common::{DailyRecord, Metric};
use tracing::debug;

/// Anything that exposes per-day deltas for gating metrics.
pub trait DeltaSource {
    /// Day the deltas belong to.
    fn date(&self) -> NaiveDate;

    /// Delta of `metric` for the day, `None` when not available.
    fn delta(&self, metric: Metric) -> Option<f64>;
}

/// Raw records gate on the source-reported change fields themselves,
/// e.g. `Metric::ChangeConfirmed`.
impl DeltaSource for DailyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn delta(&self, metric: Metric) -> Option<f64> {
        self.get(metric)
    }
}

/// Aggregated records gate on computed deltas of tracked metrics and fall
/// back to the raw reading for anything untracked.
impl DeltaSource for AggregatedRecord<'_> {
    fn date(&self) -> NaiveDate {
        self.record.date
    }

    fn delta(&self, metric: Metric) -> Option<f64> {
        AggregatedRecord::delta(self, metric).or_else(|| self.record.get(metric))
    }
}

/// Outcome of [`latest_informative`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a, T> {
    /// The most recent informative day.
    Found {
        /// Position of the day in the input.
        index: usize,
        /// The informative day itself.
        today: &'a T,
        /// The day right before it, absent when `today` is the first day.
        previous: Option<&'a T>,
    },
    /// Every day had all gating metrics missing or zero.
    NoValidData,
}

impl<'a, T> Selection<'a, T> {
    /// The selected day and its predecessor, if one was found.
    pub const fn found(&self) -> Option<(&'a T, Option<&'a T>)> {
        match *self {
            Self::Found {
                today, previous, ..
            } => Some((today, previous)),
            Self::NoValidData => None,
        }
    }

    /// Whether an informative day exists.
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

fn is_informative<T: DeltaSource>(day: &T, gating: &[Metric]) -> bool {
    gating.iter().any(|&metric| {
        day.delta(metric)
            .is_some_and(|value| !value.is_nan() && value != 0.0)
    })
}

/// Walks back from the last day while every gating metric is missing or
/// exactly zero, and returns the first day that breaks the streak.
///
/// With no gating metrics nothing is informative and the result is
/// [`Selection::NoValidData`].
pub fn latest_informative<'a, T: DeltaSource>(records: &'a [T], gating: &[Metric]) -> Selection<'a, T> {
    let Some(index) = records.iter().rposition(|day| is_informative(day, gating)) else {
        debug!("No informative day among {} records", records.len());
        return Selection::NoValidData;
    };

    let skipped = records.len() - 1 - index;
    if skipped > 0 {
        debug!("Skipped {} trailing uninformative days", skipped);
    }

    Selection::Found {
        index,
        today: &records[index],
        previous: index.checked_sub(1).map(|i| &records[i]),
    }
}
