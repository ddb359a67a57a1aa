//! Canadian provinces and territories known to the tracker API.

use covid_common::{CovidError, Result};
use std::fmt;

/// A province or territory with its tracker code and population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Province {
    /// Full English name.
    pub name: &'static str,
    /// Two-letter code used in tracker URLs.
    pub code: &'static str,
    /// Population used for percentages.
    pub population: u64,
}

/// Every province and territory, alphabetical by name.
pub const PROVINCES: [Province; 13] = [
    Province { name: "Alberta", code: "AB", population: 4_428_112 },
    Province { name: "British Columbia", code: "BC", population: 5_145_851 },
    Province { name: "Manitoba", code: "MB", population: 1_379_584 },
    Province { name: "New Brunswick", code: "NB", population: 781_315 },
    Province { name: "Newfoundland and Labrador", code: "NL", population: 520_998 },
    Province { name: "Northwest Territories", code: "NT", population: 45_074 },
    Province { name: "Nova Scotia", code: "NS", population: 979_115 },
    Province { name: "Nunavut", code: "NU", population: 39_285 },
    Province { name: "Ontario", code: "ON", population: 14_733_119 },
    Province { name: "Prince Edward Island", code: "PE", population: 159_713 },
    Province { name: "Quebec", code: "QC", population: 8_575_779 },
    Province { name: "Saskatchewan", code: "SK", population: 1_177_884 },
    Province { name: "Yukon", code: "YT", population: 42_176 },
];

/// Extra spellings accepted on top of names and codes.
const ALIASES: [(&str, &str); 1] = [("PEI", "PE")];

/// Sum of every province and territory.
pub fn canada_population() -> u64 {
    PROVINCES.iter().map(|p| p.population).sum()
}

/// Finds a province by full name (any case), two-letter code, or alias.
pub fn find_province(query: &str) -> Option<&'static Province> {
    let query = query.trim();
    let code = ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(query))
        .map_or(query, |&(_, code)| code);

    PROVINCES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(code) || p.code.eq_ignore_ascii_case(code))
}

/// A reporting area of the tracker API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Country-wide reports.
    Canada,
    /// Reports of a single province or territory.
    Province(&'static Province),
}

impl Region {
    /// Resolves a user-supplied name. `Canada` is accepted in any case.
    pub fn resolve(query: &str) -> Result<Self> {
        if query.trim().eq_ignore_ascii_case("canada") {
            return Ok(Self::Canada);
        }
        find_province(query)
            .map(Self::Province)
            .ok_or_else(|| CovidError::not_found(query.trim()))
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Canada => "Canada",
            Self::Province(p) => p.name,
        }
    }

    /// Path of the region's reports relative to the API base.
    pub fn reports_path(&self) -> String {
        match self {
            Self::Canada => "reports".to_string(),
            Self::Province(p) => format!("reports/province/{}", p.code),
        }
    }

    /// Population used for per-capita figures
    pub fn population(&self) -> u64 {
        match self {
            Self::Canada => canada_population(),
            Self::Province(p) => p.population,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names of every province and territory, for listings.
pub fn region_names() -> Vec<&'static str> {
    PROVINCES.iter().map(|p| p.name).collect()
}
