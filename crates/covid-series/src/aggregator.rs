//! Rolling-window aggregation of daily series into deltas and averages

use chrono::NaiveDate;
use covid_common::{CovidError, DailyRecord, Divisor, Metric, Result, Series};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How a tracked metric turns into a daily delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Running total; the delta is today's reading minus the last one seen
    Cumulative,
    /// Already a daily change; the delta is the reading itself
    Change,
}

/// A metric to aggregate and how to read it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedMetric {
    /// Metric read from each record
    pub metric: Metric,
    /// How the reading becomes a delta
    pub kind: MetricKind,
}

impl TrackedMetric {
    /// Tracks a running total
    pub const fn cumulative(metric: Metric) -> Self {
        Self {
            metric,
            kind: MetricKind::Cumulative,
        }
    }

    /// Tracks a source-reported daily change
    pub const fn change(metric: Metric) -> Self {
        Self {
            metric,
            kind: MetricKind::Change,
        }
    }
}

/// Configuration for one aggregation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Metrics aggregated side by side
    pub metrics: Vec<TrackedMetric>,
    /// Width of the rolling window in days
    pub window_size: usize,
    /// Divisor applied to the window sum
    pub divisor: Divisor,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            metrics: vec![
                TrackedMetric::cumulative(Metric::Confirmed),
                TrackedMetric::cumulative(Metric::Deaths),
            ],
            window_size: 7,
            divisor: Divisor::FixedWindow,
        }
    }
}

impl AggregationConfig {
    /// Creates a configuration, rejecting an empty window
    pub fn new(metrics: Vec<TrackedMetric>, window_size: usize) -> Result<Self> {
        let config = Self {
            metrics,
            window_size,
            divisor: Divisor::FixedWindow,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the divisor
    #[must_use]
    pub fn with_divisor(mut self, divisor: Divisor) -> Self {
        self.divisor = divisor;
        self
    }

    /// Checks the window width
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(CovidError::validation_field(
                "Rolling window must span at least one day",
                "window_size",
            ));
        }
        Ok(())
    }
}

/// Fixed-size circular buffer of the most recent daily deltas.
///
/// Slots start at zero, so before the window fills the sum only covers the
/// days seen so far.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    slots: Vec<f64>,
    index: usize,
    seen: usize,
}

impl RollingWindow {
    /// Creates a zero-filled window of `width` slots; `width` must be positive
    pub fn new(width: usize) -> Self {
        Self {
            slots: vec![0.0; width.max(1)],
            index: 0,
            seen: 0,
        }
    }

    /// Overwrites the slot at the rotating index and advances it
    pub fn push(&mut self, value: f64) {
        self.slots[self.index] = value;
        self.index = (self.index + 1) % self.slots.len();
        self.seen += 1;
    }

    /// Number of slots
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Sum of every slot
    pub fn sum(&self) -> f64 {
        self.slots.iter().sum()
    }

    /// Mean of the window under `divisor`
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self, divisor: Divisor) -> f64 {
        let count = match divisor {
            Divisor::FixedWindow => self.width(),
            Divisor::SamplesSeen => self.seen.min(self.width()),
        };
        if count == 0 {
            0.0
        } else {
            self.sum() / count as f64
        }
    }
}

/// One metric's values for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStep {
    /// Metric the values belong to
    pub metric: Metric,
    /// Day-over-day change
    pub delta: f64,
    /// Trailing rolling average of the delta
    pub rolling_average: f64,
}

/// A day of input together with the derived values of every tracked metric
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord<'a> {
    /// The input day
    pub record: &'a DailyRecord,
    /// Derived values, one per tracked metric
    pub steps: Vec<MetricStep>,
}

impl AggregatedRecord<'_> {
    /// Day of the input record
    pub const fn date(&self) -> NaiveDate {
        self.record.date
    }

    fn step(&self, metric: Metric) -> Option<&MetricStep> {
        self.steps.iter().find(|step| step.metric == metric)
    }

    /// Day-over-day change of a tracked metric
    pub fn delta(&self, metric: Metric) -> Option<f64> {
        self.step(metric).map(|step| step.delta)
    }

    /// Rolling average of a tracked metric
    pub fn rolling_average(&self, metric: Metric) -> Option<f64> {
        self.step(metric).map(|step| step.rolling_average)
    }
}

#[derive(Debug, Clone)]
struct MetricState {
    tracked: TrackedMetric,
    window: RollingWindow,
    last_cumulative: f64,
}

impl MetricState {
    fn new(tracked: TrackedMetric, window_size: usize) -> Self {
        Self {
            tracked,
            window: RollingWindow::new(window_size),
            last_cumulative: 0.0,
        }
    }

    fn step(&mut self, record: &DailyRecord, divisor: Divisor) -> MetricStep {
        let reading = record.get(self.tracked.metric).filter(|v| !v.is_nan());
        let delta = match (self.tracked.kind, reading) {
            (MetricKind::Cumulative, Some(current)) => {
                let delta = current - self.last_cumulative;
                self.last_cumulative = current;
                delta
            }
            (MetricKind::Change, Some(change)) => change,
            (_, None) => 0.0,
        };

        self.window.push(delta);

        MetricStep {
            metric: self.tracked.metric,
            delta,
            rolling_average: self.window.average(divisor),
        }
    }
}

/// Stateful aggregator for a single pass over one series
#[derive(Debug, Clone)]
pub struct SeriesAggregator {
    divisor: Divisor,
    states: Vec<MetricState>,
}

impl SeriesAggregator {
    /// Creates an aggregator with fresh windows
    pub fn new(config: &AggregationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            divisor: config.divisor,
            states: config
                .metrics
                .iter()
                .map(|&tracked| MetricState::new(tracked, config.window_size))
                .collect(),
        })
    }

    /// Feeds the next day and returns the derived values of every metric
    pub fn push(&mut self, record: &DailyRecord) -> Vec<MetricStep> {
        let divisor = self.divisor;
        self.states
            .iter_mut()
            .map(|state| state.step(record, divisor))
            .collect()
    }
}

/// Lazy aggregation over a slice of records, one output per input day
#[derive(Debug, Clone)]
pub struct Aggregate<'a> {
    aggregator: SeriesAggregator,
    records: std::slice::Iter<'a, DailyRecord>,
}

impl<'a> Iterator for Aggregate<'a> {
    type Item = AggregatedRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        let steps = self.aggregator.push(record);
        Some(AggregatedRecord { record, steps })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Aggregate<'_> {}

/// Starts a fresh aggregation pass over `records`, which must be in
/// ascending date order
pub fn aggregate<'a>(config: &AggregationConfig, records: &'a [DailyRecord]) -> Result<Aggregate<'a>> {
    Ok(Aggregate {
        aggregator: SeriesAggregator::new(config)?,
        records: records.iter(),
    })
}

/// Aggregates a whole series eagerly
#[instrument(skip(config, series), fields(entity = %series.entity(), days = series.len()))]
pub fn aggregate_series<'a>(
    config: &AggregationConfig,
    series: &'a Series,
) -> Result<Vec<AggregatedRecord<'a>>> {
    let aggregated: Vec<_> = aggregate(config, series.records())?.collect();
    debug!(
        "Aggregated {} days over a {}-day window",
        aggregated.len(),
        config.window_size
    );
    Ok(aggregated)
}
