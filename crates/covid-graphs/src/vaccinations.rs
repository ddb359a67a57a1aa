//! Vaccination coverage and rolling dose counts

use crate::{Axis, Chart, ChartConfig, ChartData, ChartLine};
use chrono::NaiveDate;
use covid_common::{CovidError, DailyRecord, Divisor, Metric, Result, Series};
use covid_series::{aggregate, AggregationConfig, TrackedMetric};
use tracing::debug;

/// Vaccination chart of Canada or a province
#[derive(Debug, Clone, PartialEq)]
pub struct VaccinationChart {
    /// Canada or the province shown
    pub entity: String,
    /// Rolling window in days
    pub window: usize,
    /// Day of each point, starting at the cutoff
    pub dates: Vec<NaiveDate>,
    /// Share of the population with exactly one dose, in percent
    pub one_shot_percent: Vec<f64>,
    /// Share of the population fully vaccinated, in percent
    pub two_shot_percent: Vec<f64>,
    /// Rolling average of doses given
    pub new_vaccinations: Vec<f64>,
    /// Rolling average of people newly fully vaccinated
    pub new_vaccinated: Vec<f64>,
}

fn reading(record: &DailyRecord, metric: Metric) -> f64 {
    record.get(metric).filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl VaccinationChart {
    /// Builds the chart from the days of `series` after `cutoff`.
    ///
    /// Fails with a validation error when the series carries no population.
    pub fn from_series(
        series: &Series,
        cutoff: NaiveDate,
        window: usize,
        divisor: Divisor,
    ) -> Result<Self> {
        let population = series
            .latest_population()
            .filter(|p| *p > 0.0)
            .ok_or_else(|| {
                CovidError::validation_field(
                    "Population data missing for plotting the vaccination data",
                    "population",
                )
            })?;

        let config = AggregationConfig::new(
            vec![
                TrackedMetric::change(Metric::ChangeVaccinations),
                TrackedMetric::change(Metric::ChangeVaccinated),
            ],
            window,
        )?
        .with_divisor(divisor);

        let recent = series.clone().after(cutoff);
        debug!(
            "Charting {} of {} days after {}",
            recent.len(),
            series.len(),
            cutoff
        );

        let mut chart = Self {
            entity: series.entity().to_string(),
            window,
            dates: Vec::with_capacity(recent.len()),
            one_shot_percent: Vec::with_capacity(recent.len()),
            two_shot_percent: Vec::with_capacity(recent.len()),
            new_vaccinations: Vec::with_capacity(recent.len()),
            new_vaccinated: Vec::with_capacity(recent.len()),
        };

        for day in aggregate(&config, recent.records())? {
            let record = day.record;
            let total = reading(record, Metric::TotalVaccinations) * 100.0 / population;
            let full = reading(record, Metric::TotalVaccinated) * 100.0 / population;
            let boosters = reading(record, Metric::TotalBoosters) * 100.0 / population;

            chart.dates.push(day.date());
            chart.one_shot_percent.push(total - full - boosters);
            chart.two_shot_percent.push(full);
            chart
                .new_vaccinations
                .push(day.rolling_average(Metric::ChangeVaccinations).unwrap_or(0.0));
            chart
                .new_vaccinated
                .push(day.rolling_average(Metric::ChangeVaccinated).unwrap_or(0.0));
        }

        Ok(chart)
    }
}

impl Chart for VaccinationChart {
    fn chart_config(&self) -> ChartConfig {
        ChartConfig::titled(format!("Vaccinations for {}", self.entity))
            .with_axes("Total Vaccinations", "New Vaccinations")
    }

    fn chart_data(&self) -> ChartData {
        ChartData {
            dates: self.dates.clone(),
            lines: vec![
                ChartLine::new("1-shot %", Axis::Primary, self.one_shot_percent.clone())
                    .with_color("#00bfbf"),
                ChartLine::new("2-shot %", Axis::Primary, self.two_shot_percent.clone())
                    .with_color("#bf00bf"),
                ChartLine::new(
                    format!("New Vaccinations ({}-day avg)", self.window),
                    Axis::Secondary,
                    self.new_vaccinations.clone(),
                )
                .with_color("#0000ff"),
                ChartLine::new(
                    format!("New Fully Vaxxed ({}-day avg)", self.window),
                    Axis::Secondary,
                    self.new_vaccinated.clone(),
                )
                .with_color("#000000"),
            ],
        }
    }
}
