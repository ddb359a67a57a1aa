//! Command set and dispatch.

use crate::cases::{case_reply, NO_VALID_DATA};
use crate::context::{CommandContext, Reply};
use crate::global_vaccines::global_vaccination_summary;
use crate::listings::listing;
use crate::summary::escape_html;
use crate::vaccines::vaccination_summary;
use covid_common::{CovidError, Result};
use covid_graphs::{CaseChart, ChartKind, ChartRenderer, VaccinationChart};
use tracing::{info, instrument, warn};

/// Every command the bot answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Case summary of a country.
    Cases {
        /// Country name as listed by OWID
        country: String,
    },
    /// Case summary of a Canadian province or territory.
    RegionCases {
        /// Province or territory name or code
        region: String,
    },
    /// Case chart of a country.
    PlotCases {
        /// Country name as listed by OWID
        country: String,
    },
    /// Case chart of a Canadian province or territory.
    PlotRegionCases {
        /// Province or territory name or code
        region: String,
    },
    /// Vaccination summary of Canada, or of a province when given.
    Vaccines {
        /// Province or territory; Canada when absent
        region: Option<String>,
    },
    /// Vaccination chart of Canada, or of a province when given.
    PlotVaccines {
        /// Province or territory; Canada when absent
        region: Option<String>,
    },
    /// Vaccination summary of any country.
    GlobalVaccines {
        /// Country name as listed by OWID
        country: String,
    },
    /// Every known country.
    Countries,
    /// Every Canadian province and territory.
    Regions,
}

/// Vaccination commands without a region, or naming Canada itself,
/// cover the whole country.
fn vaccine_target(region: Option<&str>) -> (&str, bool) {
    match region.map(str::trim) {
        None | Some("") => ("Canada", true),
        Some(name) => (name, name.eq_ignore_ascii_case("canada")),
    }
}

/// Text shown for errors that are the user's to fix.
pub fn user_message(error: &CovidError) -> String {
    match error {
        CovidError::NotFound(name) => format!("Couldn't find data for {}.", escape_html(name)),
        CovidError::NoValidData(_) => NO_VALID_DATA.to_string(),
        other => escape_html(&other.to_string()),
    }
}

impl Command {
    /// Command name as typed on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cases { .. } => "cases",
            Self::RegionCases { .. } => "region-cases",
            Self::PlotCases { .. } => "plot-cases",
            Self::PlotRegionCases { .. } => "plot-region-cases",
            Self::Vaccines { .. } => "vaccines",
            Self::PlotVaccines { .. } => "plot-vaccines",
            Self::GlobalVaccines { .. } => "global-vaccines",
            Self::Countries => "countries",
            Self::Regions => "regions",
        }
    }

    /// Runs the command.
    ///
    /// Unknown entities and series without usable days become text replies;
    /// every other failure is returned.
    #[instrument(skip(self, ctx), fields(command = self.name()))]
    pub async fn execute<R: ChartRenderer>(&self, ctx: &CommandContext<R>) -> Result<Reply> {
        match self.run(ctx).await {
            Err(e) if e.is_user_facing() => {
                warn!("Command answered with an error message: {}", e);
                Ok(Reply::Text(user_message(&e)))
            }
            result => result,
        }
    }

    async fn run<R: ChartRenderer>(&self, ctx: &CommandContext<R>) -> Result<Reply> {
        match self {
            Self::Cases { country } => {
                let series = ctx.countries.series(country).await?;
                Ok(Reply::Text(case_reply(&series)))
            }
            Self::RegionCases { region } => {
                let series = ctx.regions.series(region).await?;
                Ok(Reply::Text(case_reply(&series)))
            }
            Self::PlotCases { country } => {
                let series = ctx.countries.series(country).await?;
                let chart = CaseChart::from_series(&series, ctx.window, ctx.divisor)?;
                let path = ctx.charts.render(ChartKind::CountryCases, &chart).await?;
                Ok(Reply::Photo(path))
            }
            Self::PlotRegionCases { region } => {
                let series = ctx.regions.series(region).await?;
                let chart = CaseChart::from_series(&series, ctx.window, ctx.divisor)?;
                let path = ctx.charts.render(ChartKind::StateCases, &chart).await?;
                Ok(Reply::Photo(path))
            }
            Self::Vaccines { region } => {
                let (name, _) = vaccine_target(region.as_deref());
                let series = ctx.regions.series(name).await?;
                let text = vaccination_summary(&series)
                    .map_or_else(|| NO_VALID_DATA.to_string(), |summary| summary.render());
                Ok(Reply::Text(text))
            }
            Self::PlotVaccines { region } => {
                let (name, whole_country) = vaccine_target(region.as_deref());
                let kind = if whole_country {
                    ChartKind::CanadaVaccines
                } else {
                    ChartKind::StateVaccines
                };
                let series = ctx.regions.series(name).await?;
                let chart = VaccinationChart::from_series(
                    &series,
                    ctx.vaccination_cutoff,
                    ctx.window,
                    ctx.divisor,
                )?;
                let path = ctx.charts.render(kind, &chart).await?;
                Ok(Reply::Photo(path))
            }
            Self::GlobalVaccines { country } => {
                let series = ctx.countries.series(country).await?;
                Ok(Reply::Text(global_vaccination_summary(&series)?.render()))
            }
            Self::Countries => {
                let names = ctx.countries.entities().await?;
                info!("Listing {} countries", names.len());
                Ok(Reply::Text(escape_html(&listing(&names))))
            }
            Self::Regions => {
                let names = ctx.regions.entities().await?;
                Ok(Reply::Text(listing(&names)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vaccine_target() {
        assert_eq!(vaccine_target(None), ("Canada", true));
        assert_eq!(vaccine_target(Some(" ")), ("Canada", true));
        assert_eq!(vaccine_target(Some("canada")), ("canada", true));
        assert_eq!(vaccine_target(Some("Ontario")), ("Ontario", false));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            user_message(&CovidError::not_found("<Gondor>")),
            "Couldn't find data for &lt;Gondor&gt;."
        );
        assert_eq!(user_message(&CovidError::no_valid_data("X")), NO_VALID_DATA);
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::PlotRegionCases { region: "ON".into() }.name(), "plot-region-cases");
        assert_eq!(Command::Vaccines { region: None }.name(), "vaccines");
    }
}
