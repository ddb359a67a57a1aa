//! Chart manager writing charts to the output directory.

use crate::{Chart, ChartRenderer, DualAxisRenderer};
use covid_common::Result;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Every chart the bot can post, each with a fixed file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Cases of a country
    CountryCases,
    /// Cases of a province or territory
    StateCases,
    /// Vaccinations of Canada as a whole
    CanadaVaccines,
    /// Vaccinations of a province or territory
    StateVaccines,
}

impl ChartKind {
    /// File name inside the output directory
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::CountryCases => "country_cases.png",
            Self::StateCases => "state_cases.png",
            Self::CanadaVaccines => "canada_vaccines.png",
            Self::StateVaccines => "state_vaccines.png",
        }
    }
}

/// Renders charts into one output directory, overwriting earlier runs.
#[derive(Debug, Clone)]
pub struct ChartManager<R = DualAxisRenderer> {
    output_dir: PathBuf,
    width: u32,
    height: u32,
    background: Option<String>,
    renderer: R,
}

impl ChartManager {
    /// Creates a manager with the dual-axis renderer.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_renderer(output_dir, DualAxisRenderer::new())
    }
}

impl<R: ChartRenderer> ChartManager<R> {
    /// Creates a manager with a custom renderer.
    pub fn with_renderer(output_dir: impl Into<PathBuf>, renderer: R) -> Self {
        Self {
            output_dir: output_dir.into(),
            width: 1600,
            height: 1200,
            background: None,
            renderer,
        }
    }

    /// Sets the image size of every chart.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the background color of every chart.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Directory charts are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where a chart of `kind` is written.
    pub fn path_for(&self, kind: ChartKind) -> PathBuf {
        self.output_dir.join(kind.file_name())
    }

    /// Renders `chart` and returns the written file.
    ///
    /// Charts without data fail before anything touches the disk.
    #[instrument(skip(self, chart))]
    pub async fn render(&self, kind: ChartKind, chart: &(dyn Chart + Sync)) -> Result<PathBuf> {
        let data = chart.chart_data();
        data.validate()?;

        let mut config = chart.chart_config().with_size(self.width, self.height);
        if let Some(background) = &self.background {
            config = config.with_background(background.clone());
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.path_for(kind);
        self.renderer.render_to_file(&config, &data, &path).await?;

        info!("Wrote {} with {} days", path.display(), data.dates.len());
        Ok(path)
    }
}
