//! Chart types and data structures

use chrono::NaiveDate;
use covid_common::{CovidError, Result};
use serde::{Deserialize, Serialize};

/// Which y-axis a line is plotted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Left axis
    Primary,
    /// Right axis
    Secondary,
}

/// One named line of values, one value per chart date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLine {
    /// Legend label
    pub name: String,
    /// Axis the line is scaled against
    pub axis: Axis,
    /// One value per chart date
    pub values: Vec<f64>,
    /// `#rrggbb` override of the palette color
    pub color: Option<String>,
}

impl ChartLine {
    /// Create a line without a color override
    pub fn new(name: impl Into<String>, axis: Axis, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            axis,
            values,
            color: None,
        }
    }

    /// Set a fixed color
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Dates shared by every line plus the lines themselves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// X-axis dates, oldest first
    pub dates: Vec<NaiveDate>,
    /// Lines in drawing order
    pub lines: Vec<ChartLine>,
}

impl ChartData {
    /// Checks that there is something to draw and that every line has
    /// one value per date
    pub fn validate(&self) -> Result<()> {
        if self.dates.is_empty() {
            return Err(CovidError::graph("No data to render"));
        }
        if self.lines.is_empty() {
            return Err(CovidError::graph("Chart has no lines"));
        }
        if let Some(line) = self.lines.iter().find(|l| l.values.len() != self.dates.len()) {
            return Err(CovidError::graph(format!(
                "Line '{}' has {} values for {} dates",
                line.name,
                line.values.len(),
                self.dates.len()
            )));
        }
        Ok(())
    }

    /// Lines drawn against `axis`
    pub fn lines_on(&self, axis: Axis) -> impl Iterator<Item = &ChartLine> {
        self.lines.iter().filter(move |line| line.axis == axis)
    }
}

/// Chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Caption above the plot
    pub title: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Description of the left axis
    pub primary_label: String,
    /// Description of the right axis
    pub secondary_label: String,
    /// Colors, fonts and margins
    pub style: StyleConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Chart".to_string(),
            width: 1600,
            height: 1200,
            primary_label: String::new(),
            secondary_label: String::new(),
            style: StyleConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Configuration with a title and default styling
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the axis descriptions
    #[must_use]
    pub fn with_axes(mut self, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        self.primary_label = primary.into();
        self.secondary_label = secondary.into();
        self
    }

    /// Set the image dimensions
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background color
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.style.background_color = Some(color.into());
        self
    }
}

/// Color scheme for chart lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    /// Matplotlib-like palette
    Default,
    /// Shades of gray
    Monochrome,
    /// `#rrggbb` colors used in order
    Custom(Vec<String>),
}

/// Font configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family name
    pub family: String,
    /// Font size in points
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 20,
        }
    }
}

/// Margin configuration, also used as label area sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Space above the plot
    pub top: u32,
    /// Right label area
    pub right: u32,
    /// Bottom label area
    pub bottom: u32,
    /// Left label area
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 100,
            bottom: 60,
            left: 100,
        }
    }
}

/// Styling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Palette for lines without a fixed color
    pub color_scheme: ColorScheme,
    /// `#rrggbb` background, white when unset
    pub background_color: Option<String>,
    /// Caption font
    pub title_font: FontConfig,
    /// Tick label, axis description and legend font
    pub axis_font: FontConfig,
    /// Margins and label areas
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 32,
            },
            axis_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covid_common::test_utils::series_fixtures::day;

    fn data(values: Vec<f64>) -> ChartData {
        ChartData {
            dates: vec![day(0), day(1)],
            lines: vec![ChartLine::new("Cases", Axis::Primary, values)],
        }
    }

    #[test]
    fn test_validate() {
        assert!(data(vec![1.0, 2.0]).validate().is_ok());
        assert!(data(vec![1.0]).validate().is_err());
        assert!(ChartData::default().validate().is_err());

        let no_lines = ChartData {
            dates: vec![day(0)],
            lines: Vec::new(),
        };
        assert!(no_lines.validate().is_err());
    }

    #[test]
    fn test_lines_on_axis() {
        let mut chart = data(vec![1.0, 2.0]);
        chart
            .lines
            .push(ChartLine::new("Deaths", Axis::Secondary, vec![0.0, 1.0]).with_color("#ff0000"));

        let secondary: Vec<_> = chart.lines_on(Axis::Secondary).map(|l| l.name.as_str()).collect();
        assert_eq!(secondary, vec!["Deaths"]);
        assert_eq!(chart.lines[1].color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_config_builders() {
        let config = ChartConfig::titled("Test")
            .with_axes("Cases", "Deaths")
            .with_size(800, 600)
            .with_background("#000000");
        assert_eq!(config.title, "Test");
        assert_eq!(config.secondary_label, "Deaths");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.style.background_color.as_deref(), Some("#000000"));
    }
}
