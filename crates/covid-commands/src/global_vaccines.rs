//! Vaccination summary of any country in the OWID dataset.

use crate::summary::Summary;
use covid_common::{format_count, format_percent, CovidError, Metric, Result, Series};

/// Columns the summary reports, in table order.
pub const GLOBAL_VACCINE_METRICS: [Metric; 5] = [
    Metric::NewVaccinations,
    Metric::PeopleVaccinated,
    Metric::PeopleVaccinatedPerHundred,
    Metric::PeopleFullyVaccinated,
    Metric::PeopleFullyVaccinatedPerHundred,
];

const MISSING: &str = "n/a";

fn count_cell(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), format_count)
}

fn percent_cell(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), format_percent)
}

/// Builds the vaccination table of the last day reporting any of
/// [`GLOBAL_VACCINE_METRICS`].
///
/// Fails with [`CovidError::NoValidData`] when no day reports any.
pub fn global_vaccination_summary(series: &Series) -> Result<Summary> {
    let index = series
        .last_valid_index(&GLOBAL_VACCINE_METRICS)
        .ok_or_else(|| CovidError::no_valid_data(series.entity()))?;
    let day = &series.records()[index];

    let mut summary = Summary::new(
        format!("Summary for {}", series.entity()),
        day.date,
        "Vaccinated",
        "Count",
    );
    summary
        .section("1-shot")
        .row("- Today", count_cell(day.new_vaccinations))
        .row("- Total", count_cell(day.people_vaccinated))
        .row("- Vax %", percent_cell(day.people_vaccinated_per_hundred))
        .section("2-shot")
        .row("- Total", count_cell(day.people_fully_vaccinated))
        .row("- Vax %", percent_cell(day.people_fully_vaccinated_per_hundred));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use covid_common::test_utils::series_fixtures::day;
    use covid_common::DailyRecord;

    #[test]
    fn test_last_reporting_day_is_used() {
        let reporting = DailyRecord::new(day(0))
            .with(Metric::NewVaccinations, 1_500_000.0)
            .with(Metric::PeopleVaccinated, 120_000_000.0)
            .with(Metric::PeopleVaccinatedPerHundred, 36.25)
            .with(Metric::PeopleFullyVaccinated, 60_000_000.0)
            .with(Metric::PeopleFullyVaccinatedPerHundred, 18.1);
        let blank = DailyRecord::new(day(1)).with(Metric::Confirmed, 10.0);
        let series = Series::new("United States", vec![reporting, blank]);

        let summary = global_vaccination_summary(&series).unwrap();
        assert_eq!(summary.title, "Summary for United States");
        assert_eq!(summary.as_of, day(0));
        assert_eq!(summary.value("1-shot", "- Today"), Some("1,500,000"));
        assert_eq!(summary.value("1-shot", "- Vax %"), Some("36.25%"));
        assert_eq!(summary.value("2-shot", "- Total"), Some("60,000,000"));
        assert_eq!(summary.value("2-shot", "- Vax %"), Some("18.10%"));
    }

    #[test]
    fn test_missing_cells_render_as_na() {
        let partial = DailyRecord::new(day(0)).with(Metric::PeopleVaccinated, 42.0);
        let summary = global_vaccination_summary(&Series::new("Chad", vec![partial])).unwrap();
        assert_eq!(summary.value("1-shot", "- Today"), Some("n/a"));
        assert_eq!(summary.value("1-shot", "- Total"), Some("42"));
        assert_eq!(summary.value("2-shot", "- Vax %"), Some("n/a"));
    }

    #[test]
    fn test_no_reporting_day_is_error() {
        let series = Series::new("Atlantis", vec![DailyRecord::new(day(0))]);
        let err = global_vaccination_summary(&series).unwrap_err();
        assert!(matches!(err, CovidError::NoValidData(ref name) if name == "Atlantis"));
    }
}
