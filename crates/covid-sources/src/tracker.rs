//! covid19tracker.ca API client
//!
//! Fetches the daily report history of Canada or a single province and
//! normalizes it to a [`Series`]. Requests carry a timeout and are not
//! retried.

use crate::regions::Region;
use chrono::NaiveDate;
use covid_common::{CovidError, DailyRecord, Metric, Result, Series};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Configuration for the tracker client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Base URL of the API (e.g. "https://api.covid19tracker.ca")
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.covid19tracker.ca".to_string(),
            timeout_secs: 30,
        }
    }
}

impl TrackerConfig {
    /// Create a configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub const fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// covid19tracker.ca API client
#[derive(Debug, Clone)]
pub struct TrackerClient {
    client: Client,
    base_url: Url,
}

impl TrackerClient {
    /// Create a new client with the given configuration
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CovidError::network_with_source("Failed to create HTTP client", e))?;

        // A trailing slash keeps `join` from dropping the last path segment
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base).map_err(|e| {
            CovidError::config_with_source(format!("Invalid tracker URL: {}", config.base_url), e)
        })?;

        Ok(Self { client, base_url })
    }

    /// URL of a region's report history
    pub fn reports_url(&self, region: &Region) -> Result<Url> {
        self.base_url
            .join(&region.reports_path())
            .map_err(|e| CovidError::config_with_source("Invalid tracker endpoint", e))
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn make_request(&self, url: Url) -> Result<Response> {
        debug!("Making request to: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                CovidError::network_with_source("Request timeout", e)
            } else {
                CovidError::network_with_source("Request failed", e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Tracker answered with {}", status);
            return Err(CovidError::data_source_with_status(
                format!("Tracker API returned {status}"),
                status.as_u16(),
            ));
        }

        debug!("Request successful: {}", status);
        Ok(response)
    }

    /// Fetch the full report history of a region
    #[instrument(skip(self), fields(region = %region))]
    pub async fn fetch_reports(&self, region: &Region) -> Result<Vec<TrackerReport>> {
        info!("Fetching tracker reports");
        let url = self.reports_url(region)?;
        let response = self.make_request(url).await?;
        let text = response
            .text()
            .await
            .map_err(|e| CovidError::network_with_source("Failed to read response body", e))?;

        let parsed = parse_reports(&text)?;
        debug!("Received {} daily reports", parsed.len());
        Ok(parsed)
    }

    /// Fetch a region's history as a series
    pub async fn fetch_series(&self, region: &Region) -> Result<Series> {
        let reports = self.fetch_reports(region).await?;
        Ok(reports_to_series(region, reports))
    }
}

/// Envelope of every reports response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerResponse {
    /// Daily reports, oldest first
    pub data: Vec<TrackerReport>,
}

/// One day of a tracker report. Any numeric field may be null or absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerReport {
    /// Report day
    pub date: Option<NaiveDate>,
    /// Cumulative cases
    pub total_cases: Option<f64>,
    /// Cumulative deaths
    pub total_fatalities: Option<f64>,
    /// New cases
    pub change_cases: Option<f64>,
    /// New deaths
    pub change_fatalities: Option<f64>,
    /// Cumulative doses
    pub total_vaccinations: Option<f64>,
    /// Cumulative people fully vaccinated
    pub total_vaccinated: Option<f64>,
    /// Cumulative first boosters
    pub total_boosters_1: Option<f64>,
    /// Doses given on the day
    pub change_vaccinations: Option<f64>,
    /// People newly fully vaccinated
    pub change_vaccinated: Option<f64>,
    /// First boosters given on the day
    pub change_boosters_1: Option<f64>,
}

impl TrackerReport {
    /// Convert to a daily record, `None` when the report has no date
    pub fn to_record(&self, population: Option<f64>) -> Option<DailyRecord> {
        let mut record = DailyRecord::new(self.date?);
        record.set(Metric::Confirmed, self.total_cases);
        record.set(Metric::Deaths, self.total_fatalities);
        record.set(Metric::ChangeConfirmed, self.change_cases);
        record.set(Metric::ChangeDeaths, self.change_fatalities);
        record.set(Metric::TotalVaccinations, self.total_vaccinations);
        record.set(Metric::TotalVaccinated, self.total_vaccinated);
        record.set(Metric::TotalBoosters, self.total_boosters_1);
        record.set(Metric::ChangeVaccinations, self.change_vaccinations);
        record.set(Metric::ChangeVaccinated, self.change_vaccinated);
        record.set(Metric::ChangeBoosters, self.change_boosters_1);
        record.set(Metric::Population, population);
        Some(record)
    }
}

/// Parse a reports response body
pub fn parse_reports(body: &str) -> Result<Vec<TrackerReport>> {
    let response: TrackerResponse = serde_json::from_str(body)?;
    Ok(response.data)
}

/// Build a series from reports, stamping every day with the region's
/// population. Reports without a date are dropped.
#[allow(clippy::cast_precision_loss)]
pub fn reports_to_series(region: &Region, reports: Vec<TrackerReport>) -> Series {
    let population = Some(region.population() as f64);
    let total = reports.len();
    let records: Vec<DailyRecord> = reports
        .iter()
        .filter_map(|report| report.to_record(population))
        .collect();

    if records.len() < total {
        debug!("Dropped {} undated reports", total - records.len());
    }

    Series::new(region.name(), records)
}
