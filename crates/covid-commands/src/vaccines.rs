//! Vaccination summary of Canada or a province.

use crate::summary::Summary;
use covid_common::{format_count, format_percent, percent_of, DailyRecord, Metric, Series};
use covid_series::{latest_informative, Selection};

/// Daily dose changes that mark a day as worth summarizing.
pub const VACCINE_GATES: [Metric; 3] = [
    Metric::ChangeVaccinations,
    Metric::ChangeVaccinated,
    Metric::ChangeBoosters,
];

/// Today and total dose counts of one vaccination stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoseCounts {
    /// Doses reported for the day
    pub today: f64,
    /// Running total of doses
    pub total: f64,
}

fn reading(record: &DailyRecord, metric: Metric) -> f64 {
    record.get(metric).filter(|v| !v.is_nan()).unwrap_or(0.0)
}

/// Splits a day's readings into first-dose, fully vaccinated and booster
/// counts. Missing readings count as zero.
pub fn dose_counts(record: &DailyRecord) -> [(&'static str, DoseCounts); 3] {
    let r = |metric| reading(record, metric);
    let one_shot = DoseCounts {
        today: r(Metric::ChangeVaccinations) - r(Metric::ChangeVaccinated) - r(Metric::ChangeBoosters),
        total: r(Metric::TotalVaccinations) - r(Metric::TotalVaccinated) - r(Metric::TotalBoosters),
    };
    let two_shot = DoseCounts {
        today: r(Metric::ChangeVaccinated),
        total: r(Metric::TotalVaccinated),
    };
    let booster = DoseCounts {
        today: r(Metric::ChangeBoosters),
        total: r(Metric::TotalBoosters),
    };
    [("1-shot", one_shot), ("2-shot", two_shot), ("Booster 1", booster)]
}

/// Builds the "{entity} Vaccinations" table of the latest day with any
/// dose change. `Vax %` rows need a population.
pub fn vaccination_summary(series: &Series) -> Option<Summary> {
    let Selection::Found { today, .. } = latest_informative(series.records(), &VACCINE_GATES) else {
        return None;
    };
    let population = today.population.or_else(|| series.latest_population());

    let mut summary = Summary::new(
        format!("{} Vaccinations", series.entity()),
        today.date,
        "Vaccinated",
        "Count",
    );
    for (section, counts) in dose_counts(today) {
        summary
            .section(section)
            .row("- Today", format_count(counts.today))
            .row("- Total", format_count(counts.total));
        if let Some(percent) = population.and_then(|p| percent_of(counts.total, p)) {
            summary.row("- Vax %", format_percent(percent));
        }
    }
    Some(summary)
}
