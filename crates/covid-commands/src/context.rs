//! Shared state every command runs against.

use chrono::NaiveDate;
use covid_common::{Divisor, Result};
use covid_config::Config;
use covid_graphs::{ChartManager, ChartRenderer, DualAxisRenderer};
use covid_sources::{OwidConfig, OwidSource, SeriesSource, TrackerClient, TrackerConfig};
use std::path::PathBuf;
use tracing::info;

/// What a command answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// HTML-formatted message text.
    Text(String),
    /// A rendered chart image.
    Photo(PathBuf),
}

impl Reply {
    /// The message text, if this is a text reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Photo(_) => None,
        }
    }
}

/// Sources, chart output and aggregation settings of a run.
pub struct CommandContext<R = DualAxisRenderer> {
    /// Country-level series.
    pub countries: Box<dyn SeriesSource>,
    /// Canada and its provinces.
    pub regions: Box<dyn SeriesSource>,
    /// Chart writer.
    pub charts: ChartManager<R>,
    /// Rolling window width in days.
    pub window: usize,
    /// Rolling average divisor before the window fills.
    pub divisor: Divisor,
    /// Vaccination charts start after this day.
    pub vaccination_cutoff: NaiveDate,
}

impl<R> std::fmt::Debug for CommandContext<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("countries", &self.countries.name())
            .field("regions", &self.regions.name())
            .field("window", &self.window)
            .field("divisor", &self.divisor)
            .field("vaccination_cutoff", &self.vaccination_cutoff)
            .finish_non_exhaustive()
    }
}

impl CommandContext {
    /// Wires the OWID and tracker sources and the chart manager from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let sources = &config.sources;
        let tracker = TrackerClient::new(
            &TrackerConfig::new(sources.tracker_url.clone()).with_timeout(sources.timeout_seconds),
        )?;
        let owid = OwidSource::new(OwidConfig {
            csv_path: sources.owid_csv_path.clone(),
            csv_url: sources.owid_csv_url.clone(),
            timeout_secs: sources.timeout_seconds,
        })?;

        let charts = ChartManager::new(config.charts.output_dir.clone())
            .with_size(config.charts.width, config.charts.height)
            .with_background(config.charts.background_color.clone());

        info!(
            "Command context ready: {}-day window, charts in {}",
            config.aggregation.window_size,
            config.charts.output_dir.display()
        );

        Ok(Self::new(Box::new(owid), Box::new(tracker), charts)
            .with_aggregation(config.aggregation.window_size, config.aggregation.divisor)
            .with_vaccination_cutoff(config.charts.vaccination_cutoff))
    }
}

impl<R: ChartRenderer> CommandContext<R> {
    /// Context with a 7-day fixed-divisor window and the default cutoff.
    pub fn new(
        countries: Box<dyn SeriesSource>,
        regions: Box<dyn SeriesSource>,
        charts: ChartManager<R>,
    ) -> Self {
        let defaults = Config::default();
        Self {
            countries,
            regions,
            charts,
            window: defaults.aggregation.window_size,
            divisor: defaults.aggregation.divisor,
            vaccination_cutoff: defaults.charts.vaccination_cutoff,
        }
    }

    /// Sets the rolling window and its divisor
    #[must_use]
    pub const fn with_aggregation(mut self, window: usize, divisor: Divisor) -> Self {
        self.window = window;
        self.divisor = divisor;
        self
    }

    /// Sets the first day shown on vaccination charts
    #[must_use]
    pub const fn with_vaccination_cutoff(mut self, cutoff: NaiveDate) -> Self {
        self.vaccination_cutoff = cutoff;
        self
    }
}
