//! Daily record and series types shared by sources, aggregation and output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric field a data source may report for a day.
///
/// Cumulative metrics are running totals; `Change*` metrics hold the daily
/// change as reported by the source itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Cumulative confirmed cases.
    Confirmed,
    /// Cumulative deaths.
    Deaths,
    /// Reported daily change in confirmed cases.
    ChangeConfirmed,
    /// Reported daily change in deaths.
    ChangeDeaths,
    /// Cumulative doses administered.
    TotalVaccinations,
    /// Cumulative fully vaccinated people.
    TotalVaccinated,
    /// Cumulative first booster doses.
    TotalBoosters,
    /// Reported daily doses administered.
    ChangeVaccinations,
    /// Reported daily change in fully vaccinated people.
    ChangeVaccinated,
    /// Reported daily first booster doses.
    ChangeBoosters,
    /// People with at least one dose.
    PeopleVaccinated,
    /// People with a full primary course.
    PeopleFullyVaccinated,
    /// People with at least one dose, per hundred inhabitants.
    PeopleVaccinatedPerHundred,
    /// Fully vaccinated people, per hundred inhabitants.
    PeopleFullyVaccinatedPerHundred,
    /// Doses administered on the day.
    NewVaccinations,
    /// Population of the entity.
    Population,
}

impl Metric {
    /// Every declared metric, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Confirmed,
        Self::Deaths,
        Self::ChangeConfirmed,
        Self::ChangeDeaths,
        Self::TotalVaccinations,
        Self::TotalVaccinated,
        Self::TotalBoosters,
        Self::ChangeVaccinations,
        Self::ChangeVaccinated,
        Self::ChangeBoosters,
        Self::PeopleVaccinated,
        Self::PeopleFullyVaccinated,
        Self::PeopleVaccinatedPerHundred,
        Self::PeopleFullyVaccinatedPerHundred,
        Self::NewVaccinations,
        Self::Population,
    ];

    /// Snake-case name of the metric, as used in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Deaths => "deaths",
            Self::ChangeConfirmed => "change_confirmed",
            Self::ChangeDeaths => "change_deaths",
            Self::TotalVaccinations => "total_vaccinations",
            Self::TotalVaccinated => "total_vaccinated",
            Self::TotalBoosters => "total_boosters",
            Self::ChangeVaccinations => "change_vaccinations",
            Self::ChangeVaccinated => "change_vaccinated",
            Self::ChangeBoosters => "change_boosters",
            Self::PeopleVaccinated => "people_vaccinated",
            Self::PeopleFullyVaccinated => "people_fully_vaccinated",
            Self::PeopleVaccinatedPerHundred => "people_vaccinated_per_hundred",
            Self::PeopleFullyVaccinatedPerHundred => "people_fully_vaccinated_per_hundred",
            Self::NewVaccinations => "new_vaccinations",
            Self::Population => "population",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a rolling average divides its window sum by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Divisor {
    /// Always the window width, even before the window has filled.
    #[default]
    FixedWindow,
    /// The number of days seen so far, up to the window width.
    SamplesSeen,
}

/// One day of readings for one entity.
///
/// Every metric is optional; `None` means the source did not report it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Day of the readings
    pub date: NaiveDate,
    /// Cumulative confirmed cases
    pub confirmed: Option<f64>,
    /// Cumulative deaths
    pub deaths: Option<f64>,
    /// New cases reported for the day
    pub change_confirmed: Option<f64>,
    /// New deaths reported for the day
    pub change_deaths: Option<f64>,
    /// Cumulative doses administered
    pub total_vaccinations: Option<f64>,
    /// Cumulative people fully vaccinated
    pub total_vaccinated: Option<f64>,
    /// Cumulative first booster doses
    pub total_boosters: Option<f64>,
    /// Doses administered on the day
    pub change_vaccinations: Option<f64>,
    /// People newly fully vaccinated on the day
    pub change_vaccinated: Option<f64>,
    /// First booster doses given on the day
    pub change_boosters: Option<f64>,
    /// People with at least one dose
    pub people_vaccinated: Option<f64>,
    /// People with a full primary course
    pub people_fully_vaccinated: Option<f64>,
    /// People with at least one dose per hundred residents
    pub people_vaccinated_per_hundred: Option<f64>,
    /// Fully vaccinated people per hundred residents
    pub people_fully_vaccinated_per_hundred: Option<f64>,
    /// Doses administered on the day, as published by OWID
    pub new_vaccinations: Option<f64>,
    /// Population of the entity
    pub population: Option<f64>,
}

impl DailyRecord {
    /// Creates a record for `date` with no readings.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// Returns the reading for `metric`, if the source reported one.
    pub const fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Confirmed => self.confirmed,
            Metric::Deaths => self.deaths,
            Metric::ChangeConfirmed => self.change_confirmed,
            Metric::ChangeDeaths => self.change_deaths,
            Metric::TotalVaccinations => self.total_vaccinations,
            Metric::TotalVaccinated => self.total_vaccinated,
            Metric::TotalBoosters => self.total_boosters,
            Metric::ChangeVaccinations => self.change_vaccinations,
            Metric::ChangeVaccinated => self.change_vaccinated,
            Metric::ChangeBoosters => self.change_boosters,
            Metric::PeopleVaccinated => self.people_vaccinated,
            Metric::PeopleFullyVaccinated => self.people_fully_vaccinated,
            Metric::PeopleVaccinatedPerHundred => self.people_vaccinated_per_hundred,
            Metric::PeopleFullyVaccinatedPerHundred => self.people_fully_vaccinated_per_hundred,
            Metric::NewVaccinations => self.new_vaccinations,
            Metric::Population => self.population,
        }
    }

    /// Sets the reading for `metric`.
    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::Confirmed => &mut self.confirmed,
            Metric::Deaths => &mut self.deaths,
            Metric::ChangeConfirmed => &mut self.change_confirmed,
            Metric::ChangeDeaths => &mut self.change_deaths,
            Metric::TotalVaccinations => &mut self.total_vaccinations,
            Metric::TotalVaccinated => &mut self.total_vaccinated,
            Metric::TotalBoosters => &mut self.total_boosters,
            Metric::ChangeVaccinations => &mut self.change_vaccinations,
            Metric::ChangeVaccinated => &mut self.change_vaccinated,
            Metric::ChangeBoosters => &mut self.change_boosters,
            Metric::PeopleVaccinated => &mut self.people_vaccinated,
            Metric::PeopleFullyVaccinated => &mut self.people_fully_vaccinated,
            Metric::PeopleVaccinatedPerHundred => &mut self.people_vaccinated_per_hundred,
            Metric::PeopleFullyVaccinatedPerHundred => {
                &mut self.people_fully_vaccinated_per_hundred
            }
            Metric::NewVaccinations => &mut self.new_vaccinations,
            Metric::Population => &mut self.population,
        };
        *slot = value;
    }

    /// Builder-style variant of [`DailyRecord::set`].
    #[must_use]
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }
}

/// Ordered daily records for one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    entity: String,
    records: Vec<DailyRecord>,
}

impl Series {
    /// Creates a series, ordering the records by ascending date.
    pub fn new(entity: impl Into<String>, mut records: Vec<DailyRecord>) -> Self {
        records.sort_by_key(|record| record.date);
        Self {
            entity: entity.into(),
            records,
        }
    }

    /// Name of the entity this series describes.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Records in ascending date order.
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Number of days
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series has no days
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&DailyRecord> {
        self.records.last()
    }

    /// Keeps only the records dated strictly after `cutoff`.
    #[must_use]
    pub fn after(mut self, cutoff: NaiveDate) -> Self {
        self.records.retain(|record| record.date > cutoff);
        self
    }

    /// Latest population reading in the series.
    pub fn latest_population(&self) -> Option<f64> {
        self.records.iter().rev().find_map(|record| record.population)
    }

    /// Index of the last record holding any of `metrics`.
    pub fn last_valid_index(&self, metrics: &[Metric]) -> Option<usize> {
        self.records
            .iter()
            .rposition(|record| metrics.iter().any(|&m| record.get(m).is_some()))
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a DailyRecord;
    type IntoIter = std::slice::Iter<'a, DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
    }

    #[test]
    fn test_get_and_set_cover_every_metric() {
        let mut record = DailyRecord::new(date(1));
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(record.get(*metric), None);
            record.set(*metric, Some(i as f64));
        }
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(record.get(*metric), Some(i as f64), "{metric}");
        }
    }

    #[test]
    fn test_series_sorts_records() {
        let series = Series::new(
            "Canada",
            vec![
                DailyRecord::new(date(3)),
                DailyRecord::new(date(1)),
                DailyRecord::new(date(2)),
            ],
        );
        let dates: Vec<_> = series.records().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
        assert_eq!(series.entity(), "Canada");
    }

    #[test]
    fn test_after_is_exclusive() {
        let series = Series::new(
            "Ontario",
            (1..=5).map(|d| DailyRecord::new(date(d))).collect(),
        )
        .after(date(3));
        assert_eq!(series.len(), 2);
        assert_eq!(series.records()[0].date, date(4));
    }

    #[test]
    fn test_last_valid_index_and_population() {
        let series = Series::new(
            "Chile",
            vec![
                DailyRecord::new(date(1)).with(Metric::PeopleVaccinated, 10.0),
                DailyRecord::new(date(2)).with(Metric::Population, 19_000_000.0),
                DailyRecord::new(date(3)),
            ],
        );
        assert_eq!(series.last_valid_index(&[Metric::PeopleVaccinated]), Some(0));
        assert_eq!(series.last_valid_index(&[Metric::Deaths]), None);
        assert_eq!(series.latest_population(), Some(19_000_000.0));
    }

    #[test]
    fn test_metric_serde_names() {
        let json = serde_json::to_string(&Metric::ChangeVaccinated).unwrap();
        assert_eq!(json, "\"change_vaccinated\"");
        assert_eq!(Metric::ChangeVaccinated.to_string(), "change_vaccinated");
    }
}
