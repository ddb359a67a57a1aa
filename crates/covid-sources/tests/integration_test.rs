//! Integration tests for covid-sources crate.

use covid_common::{CovidError, Metric};
use covid_sources::{
    tracker, OwidConfig, OwidSource, Region, SeriesSource, TrackerClient, TrackerConfig,
};
use std::path::Path;

const OWID_CSV: &str = "\
location,date,total_cases,new_cases,total_deaths,new_deaths,people_vaccinated,population
Germany,2021-05-01,3400000,15000,83000,200,,83900471
Germany,2021-05-02,3410000,10000,83100,100,25000000,83900471
India,2021-05-01,19100000,400000,211000,3500,,1393409033
";

fn owid_source(path: &Path) -> OwidSource {
    OwidSource::new(OwidConfig {
        csv_path: path.to_path_buf(),
        csv_url: "http://127.0.0.1:9/unused.csv".to_string(),
        timeout_secs: 1,
    })
    .unwrap()
}

#[tokio::test]
async fn test_owid_source_through_trait() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("owid-covid-data.csv");
    std::fs::write(&path, OWID_CSV).unwrap();

    let source: Box<dyn SeriesSource> = Box::new(owid_source(&path));
    assert_eq!(source.entities().await.unwrap(), vec!["Germany", "India"]);

    let germany = source.series("GERMANY").await.unwrap();
    assert_eq!(germany.len(), 2);
    assert_eq!(
        germany.last().and_then(|r| r.get(Metric::PeopleVaccinated)),
        Some(25_000_000.0)
    );

    let err = source.series("Atlantis").await.unwrap_err();
    assert!(err.is_user_facing());
}

#[tokio::test]
async fn test_failed_download_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("owid.csv");

    let result = owid_source(&path).load().await;
    assert!(matches!(
        result,
        Err(CovidError::Network { .. } | CovidError::Source { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn test_tracker_body_to_series() {
    let body = r#"{"data": [
        {"date": "2021-01-02", "total_cases": 20, "change_cases": 10},
        {"date": "2021-01-01", "total_cases": 10, "change_cases": 10}
    ]}"#;
    let region = Region::resolve("Nunavut").unwrap();
    let series = tracker::reports_to_series(&region, tracker::parse_reports(body).unwrap());

    // Out-of-order days come back sorted
    assert_eq!(series.records()[0].get(Metric::Confirmed), Some(10.0));
    assert_eq!(series.latest_population(), Some(39_285.0));
}

#[test]
fn test_tracker_client_builds_endpoint_urls() {
    let client = TrackerClient::new(&TrackerConfig::new("https://api.covid19tracker.ca").with_timeout(5))
        .unwrap();
    let url = client
        .reports_url(&Region::resolve("Yukon").unwrap())
        .unwrap();
    assert_eq!(url.path(), "/reports/province/YT");
}
