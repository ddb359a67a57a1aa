//! Source trait shared by the tracker and OWID adapters.

use crate::owid::OwidSource;
use crate::regions::{region_names, Region};
use crate::tracker::TrackerClient;
use async_trait::async_trait;
use covid_common::{Result, Series};

/// Anything that can produce a daily series for a named entity.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Fetches the full history of `entity`.
    ///
    /// Unknown entities fail with [`covid_common::CovidError::NotFound`].
    async fn series(&self, entity: &str) -> Result<Series>;

    /// Names of every entity this source knows, sorted.
    async fn entities(&self) -> Result<Vec<String>>;

    /// Gets the name of this source.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl SeriesSource for TrackerClient {
    async fn series(&self, entity: &str) -> Result<Series> {
        let region = Region::resolve(entity)?;
        self.fetch_series(&region).await
    }

    async fn entities(&self) -> Result<Vec<String>> {
        Ok(region_names().into_iter().map(str::to_string).collect())
    }

    fn name(&self) -> &'static str {
        "covid19tracker.ca"
    }
}

#[async_trait]
impl SeriesSource for OwidSource {
    async fn series(&self, entity: &str) -> Result<Series> {
        self.load().await?.series(entity)
    }

    async fn entities(&self) -> Result<Vec<String>> {
        let dataset = self.load().await?;
        Ok(dataset.locations().into_iter().map(str::to_string).collect())
    }

    fn name(&self) -> &'static str {
        "Our World in Data"
    }
}
