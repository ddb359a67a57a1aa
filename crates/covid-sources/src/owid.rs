//! Our World in Data CSV adapter
//!
//! The dataset is a single CSV with one row per location and day. It is
//! read from a local path and downloaded first when the file is missing.

use chrono::NaiveDate;
use covid_common::{entity_key, title_case, CovidError, DailyRecord, Metric, Result, Series};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Short names users type for countries with long official names.
const COUNTRY_ALIASES: [(&str, &str); 4] = [
    ("USA", "United States"),
    ("US", "United States"),
    ("UK", "United Kingdom"),
    ("UAE", "United Arab Emirates"),
];

/// Maps a user-supplied country name to the spelling OWID uses.
///
/// Aliases are matched case-insensitively; anything else is title-cased.
pub fn canonical_country(query: &str) -> String {
    let query = query.trim();
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(query))
        .map_or_else(|| title_case(query), |(_, name)| (*name).to_string())
}

/// Configuration for the OWID adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwidConfig {
    /// Local path of the CSV
    pub csv_path: PathBuf,
    /// Where to download the CSV from when `csv_path` does not exist
    pub csv_url: String,
    /// Download timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OwidConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("owid-covid-data.csv"),
            csv_url: "https://covid.ourworldindata.org/data/owid-covid-data.csv".to_string(),
            timeout_secs: 30,
        }
    }
}

/// One row of the dataset. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwidRow {
    /// Country or aggregate name
    pub location: String,
    /// Day of the row
    pub date: NaiveDate,
    /// Cumulative confirmed cases
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub total_cases: Option<f64>,
    /// New confirmed cases
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub new_cases: Option<f64>,
    /// Cumulative deaths
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub total_deaths: Option<f64>,
    /// New deaths
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub new_deaths: Option<f64>,
    /// Cumulative doses administered
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub total_vaccinations: Option<f64>,
    /// People with at least one dose
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub people_vaccinated: Option<f64>,
    /// People with a full primary course
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub people_fully_vaccinated: Option<f64>,
    /// Doses administered on the day
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub new_vaccinations: Option<f64>,
    /// At least one dose, per hundred residents
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub people_vaccinated_per_hundred: Option<f64>,
    /// Fully vaccinated, per hundred residents
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub people_fully_vaccinated_per_hundred: Option<f64>,
    /// Population of the location
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub population: Option<f64>,
}

impl OwidRow {
    /// Convert to a daily record. New cases and deaths fill the change
    /// metrics the case summary gates on.
    pub fn to_record(&self) -> DailyRecord {
        let mut record = DailyRecord::new(self.date);
        record.set(Metric::Confirmed, self.total_cases);
        record.set(Metric::Deaths, self.total_deaths);
        record.set(Metric::ChangeConfirmed, self.new_cases);
        record.set(Metric::ChangeDeaths, self.new_deaths);
        record.set(Metric::TotalVaccinations, self.total_vaccinations);
        record.set(Metric::PeopleVaccinated, self.people_vaccinated);
        record.set(Metric::PeopleFullyVaccinated, self.people_fully_vaccinated);
        record.set(Metric::NewVaccinations, self.new_vaccinations);
        record.set(
            Metric::PeopleVaccinatedPerHundred,
            self.people_vaccinated_per_hundred,
        );
        record.set(
            Metric::PeopleFullyVaccinatedPerHundred,
            self.people_fully_vaccinated_per_hundred,
        );
        record.set(Metric::Population, self.population);
        record
    }
}

/// Parsed dataset grouped by location
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwidDataset {
    locations: BTreeMap<String, Vec<DailyRecord>>,
}

impl OwidDataset {
    /// Parse a CSV stream. Rows that fail to parse are skipped with a
    /// warning; a missing header row is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        reader.headers()?;

        let mut locations: BTreeMap<String, Vec<DailyRecord>> = BTreeMap::new();
        let mut skipped = 0usize;
        for (idx, result) in reader.deserialize::<OwidRow>().enumerate() {
            match result {
                Ok(row) => {
                    let record = row.to_record();
                    locations.entry(row.location).or_default().push(record);
                }
                Err(e) => {
                    // +2: header line and 1-based numbering
                    debug!("Skipping CSV line {}: {}", idx + 2, e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} unreadable OWID rows", skipped);
        }
        debug!("Loaded {} OWID locations", locations.len());
        Ok(Self { locations })
    }

    /// Read and parse a CSV file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            CovidError::with_source(format!("Failed to open CSV '{}'", path.display()), e)
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Every location in the dataset, sorted
    pub fn locations(&self) -> Vec<&str> {
        self.locations.keys().map(String::as_str).collect()
    }

    /// Finds the dataset's spelling of a user-supplied country name
    pub fn resolve(&self, query: &str) -> Result<&str> {
        let wanted = entity_key(&canonical_country(query));
        self.locations
            .keys()
            .find(|location| entity_key(location) == wanted)
            .map(String::as_str)
            .ok_or_else(|| CovidError::not_found(query.trim()))
    }

    /// The daily series of a country
    pub fn series(&self, query: &str) -> Result<Series> {
        let location = self.resolve(query)?;
        let records = self.locations.get(location).cloned().unwrap_or_default();
        Ok(Series::new(location, records))
    }
}

/// OWID dataset loader with download-on-missing
#[derive(Debug, Clone)]
pub struct OwidSource {
    client: Client,
    config: OwidConfig,
}

impl OwidSource {
    /// Create a new loader
    pub fn new(config: OwidConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CovidError::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { client, config })
    }

    /// Local path of the dataset
    pub fn csv_path(&self) -> &Path {
        &self.config.csv_path
    }

    /// Download the dataset unless it is already on disk
    #[instrument(skip(self), fields(path = %self.config.csv_path.display()))]
    pub async fn ensure_local_copy(&self) -> Result<&Path> {
        let path = self.config.csv_path.as_path();
        if tokio::fs::try_exists(path).await? {
            debug!("Using existing OWID dataset");
            return Ok(path);
        }

        info!("Downloading OWID dataset from {}", self.config.csv_url);
        let response = self
            .client
            .get(&self.config.csv_url)
            .send()
            .await
            .map_err(|e| CovidError::network_with_source("Dataset download failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CovidError::data_source_with_status(
                format!("Dataset download returned {status}"),
                status.as_u16(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CovidError::network_with_source("Failed to read dataset body", e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Write beside the target first so an interrupted download never
        // leaves a truncated dataset behind
        let partial = path.with_extension("csv.part");
        tokio::fs::write(&partial, &body).await?;
        tokio::fs::rename(&partial, path).await?;

        info!("Saved {} bytes", body.len());
        Ok(path)
    }

    /// Make sure the dataset is on disk and parse it
    pub async fn load(&self) -> Result<OwidDataset> {
        let path = self.ensure_local_copy().await?.to_path_buf();
        tokio::task::spawn_blocking(move || OwidDataset::from_path(&path))
            .await
            .map_err(|e| CovidError::with_source("Dataset parsing task failed", e))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
iso_code,continent,location,date,total_cases,new_cases,total_deaths,new_deaths,total_vaccinations,people_vaccinated,people_fully_vaccinated,new_vaccinations,people_vaccinated_per_hundred,people_fully_vaccinated_per_hundred,population
CAN,North America,Canada,2021-06-01,1385000,1500,25500,30,,,,,,,38067913
CAN,North America,Canada,2021-06-02,1386800,1800,25530,30,24000000,22000000,2500000,400000,57.79,6.57,38067913
USA,North America,United States,2021-06-01,33200000,12000,595000,400,,,,,,,332915074
OWID_WRL,,World,2021-06-01,171000000,480000,3550000,10000,,,,,,,7874965730
";

    #[test]
    fn test_canonical_country() {
        assert_eq!(canonical_country("usa"), "United States");
        assert_eq!(canonical_country("US"), "United States");
        assert_eq!(canonical_country("uk"), "United Kingdom");
        assert_eq!(canonical_country("Uae"), "United Arab Emirates");
        assert_eq!(canonical_country("new zealand"), "New Zealand");
    }

    #[test]
    fn test_rows_group_by_location() {
        let dataset = OwidDataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.locations(), vec!["Canada", "United States", "World"]);

        let canada = dataset.series("canada").unwrap();
        assert_eq!(canada.entity(), "Canada");
        assert_eq!(canada.len(), 2);
        let first = &canada.records()[0];
        assert_eq!(first.get(Metric::ChangeConfirmed), Some(1500.0));
        assert_eq!(first.get(Metric::PeopleVaccinated), None);
        let second = &canada.records()[1];
        assert_eq!(second.get(Metric::PeopleVaccinatedPerHundred), Some(57.79));
        assert_eq!(canada.latest_population(), Some(38_067_913.0));
    }

    #[test]
    fn test_alias_resolves_to_dataset_name() {
        let dataset = OwidDataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.resolve("USA").unwrap(), "United States");
        assert_eq!(dataset.series("us").unwrap().entity(), "United States");
    }

    #[test]
    fn test_unknown_country_is_not_found() {
        let dataset = OwidDataset::from_reader(CSV.as_bytes()).unwrap();
        let err = dataset.series("Narnia").unwrap_err();
        assert!(matches!(err, CovidError::NotFound(ref name) if name == "Narnia"));
    }

    #[test]
    fn test_malformed_cells_and_rows() {
        let csv = "\
location,date,total_cases,new_cases
Chile,2021-01-01,abc,5
Chile,not-a-date,10,5
Chile,2021-01-02,12,
";
        let dataset = OwidDataset::from_reader(csv.as_bytes()).unwrap();
        let chile = dataset.series("Chile").unwrap();
        assert_eq!(chile.len(), 2);
        assert_eq!(chile.records()[0].get(Metric::Confirmed), None);
        assert_eq!(chile.records()[1].get(Metric::ChangeConfirmed), None);
        assert_eq!(chile.records()[1].get(Metric::Deaths), None);
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = OwidDataset::from_path(&dir.path().join("absent.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV"));
    }

    #[tokio::test]
    async fn test_existing_file_is_not_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owid.csv");
        std::fs::write(&path, CSV).unwrap();

        let source = OwidSource::new(OwidConfig {
            csv_path: path.clone(),
            // Unroutable on purpose: any download attempt would fail
            csv_url: "http://127.0.0.1:9/owid.csv".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let dataset = source.load().await.unwrap();
        assert_eq!(dataset.locations().len(), 3);
        assert_eq!(source.csv_path(), path.as_path());
    }
}
