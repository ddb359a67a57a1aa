//! Chart rendering trait and the dual-axis line chart

use crate::{Axis, ChartConfig, ChartData, ColorScheme};
use chrono::NaiveDate;
use covid_common::{format_count, Result};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Trait for renderers that write a chart to an image file
#[async_trait::async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Render `data` to `path`, overwriting any existing file
    async fn render_to_file(&self, config: &ChartConfig, data: &ChartData, path: &Path) -> Result<()>;

    /// Gets the name of this chart type.
    fn name(&self) -> &'static str;
}

/// Palette of a color scheme
pub fn palette(scheme: &ColorScheme) -> Vec<RGBColor> {
    match scheme {
        ColorScheme::Default => vec![
            RGBColor(31, 119, 180),  // Blue
            RGBColor(214, 39, 40),   // Red
            RGBColor(23, 190, 207),  // Cyan
            RGBColor(227, 119, 194), // Magenta
            RGBColor(44, 160, 44),   // Green
            RGBColor(0, 0, 0),       // Black
        ],
        ColorScheme::Monochrome => vec![
            RGBColor(0, 0, 0),
            RGBColor(64, 64, 64),
            RGBColor(128, 128, 128),
            RGBColor(192, 192, 192),
        ],
        ColorScheme::Custom(colors) => colors.iter().map(|c| parse_color(c)).collect(),
    }
}

/// Parse a `#rrggbb` color, falling back to black
pub fn parse_color(color: &str) -> RGBColor {
    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

/// Y range covering every value on `axis`, always including zero and
/// padded by 10% at the top
pub fn axis_range(data: &ChartData, axis: Axis) -> Range<f64> {
    let (min, max) = data
        .lines_on(axis)
        .flat_map(|line| line.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let span = max - min;
    if span <= 0.0 {
        return min..min + 1.0;
    }
    min..max + span * 0.1
}

/// Label of the x position `x`, the date of the nearest data index
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::trivially_copy_pass_by_ref
)]
pub fn date_label(dates: &[NaiveDate], x: &f64) -> String {
    if !x.is_finite() || *x < -0.5 {
        return String::new();
    }
    dates
        .get(x.round() as usize)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn count_label(y: &f64) -> String {
    format_count(*y)
}

/// Line chart with a left and a right y-axis sharing a date x-axis
#[derive(Debug, Clone, Copy, Default)]
pub struct DualAxisRenderer;

impl DualAxisRenderer {
    /// Creates a new renderer.
    pub const fn new() -> Self {
        Self
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw(config: &ChartConfig, data: &ChartData, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let background = config
            .style
            .background_color
            .as_deref()
            .map_or(RGBColor(255, 255, 255), parse_color);
        root.fill(&background)?;

        let x_max = (data.dates.len().saturating_sub(1) as f64).max(1.0);
        let primary = axis_range(data, Axis::Primary);
        let secondary = axis_range(data, Axis::Secondary);
        let style = &config.style;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                &config.title,
                (
                    style.title_font.family.as_str(),
                    f64::from(style.title_font.size),
                ),
            )
            .margin(style.margins.top)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .right_y_label_area_size(style.margins.right)
            .build_cartesian_2d(0f64..x_max, primary)?
            .set_secondary_coord(0f64..x_max, secondary);

        let axis_font = (style.axis_font.family.as_str(), f64::from(style.axis_font.size));
        let x_formatter = |x: &f64| date_label(&data.dates, x);

        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&count_label)
            .y_desc(config.primary_label.as_str())
            .label_style(axis_font)
            .draw()?;

        chart
            .configure_secondary_axes()
            .y_label_formatter(&count_label)
            .y_desc(config.secondary_label.as_str())
            .label_style(axis_font)
            .draw()?;

        let colors = palette(&style.color_scheme);
        for (i, line) in data.lines.iter().enumerate() {
            let color = line
                .color
                .as_deref()
                .map(parse_color)
                .or_else(|| colors.get(i % colors.len().max(1)).copied())
                .unwrap_or(RGBColor(0, 0, 0));
            let points: Vec<(f64, f64)> = line
                .values
                .iter()
                .enumerate()
                .map(|(x, y)| (x as f64, *y))
                .collect();
            let legend = move |(x, y): (i32, i32)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            };

            match line.axis {
                Axis::Primary => {
                    chart
                        .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                        .label(line.name.as_str())
                        .legend(legend);
                }
                Axis::Secondary => {
                    chart
                        .draw_secondary_series(LineSeries::new(points, color.stroke_width(2)))?
                        .label(line.name.as_str())
                        .legend(legend);
                }
            }
            debug!("Drew line '{}' with {} points", line.name, line.values.len());
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(axis_font)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ChartRenderer for DualAxisRenderer {
    async fn render_to_file(&self, config: &ChartConfig, data: &ChartData, path: &Path) -> Result<()> {
        data.validate()?;
        Self::draw(config, data, path)?;
        info!("Successfully rendered chart to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "dual_axis_line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartLine;
    use covid_common::test_utils::series_fixtures::day;

    fn chart(primary: Vec<f64>, secondary: Vec<f64>) -> ChartData {
        ChartData {
            dates: (0..primary.len()).map(day).collect(),
            lines: vec![
                ChartLine::new("Cases", Axis::Primary, primary),
                ChartLine::new("Deaths", Axis::Secondary, secondary),
            ],
        }
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_color("#FF0000"), RGBColor(255, 0, 0));
        assert_eq!(parse_color("#00ff00"), RGBColor(0, 255, 0));
        assert_eq!(parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#ZZ0000"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#éé00"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_palettes() {
        assert_eq!(palette(&ColorScheme::Default)[0], RGBColor(31, 119, 180));
        let custom = palette(&ColorScheme::Custom(vec!["#0000FF".to_string()]));
        assert_eq!(custom, vec![RGBColor(0, 0, 255)]);
    }

    #[test]
    fn test_axis_ranges_are_independent() {
        let data = chart(vec![0.0, 1000.0], vec![5.0, 10.0]);

        let primary = axis_range(&data, Axis::Primary);
        assert_eq!(primary.start, 0.0);
        assert!((primary.end - 1100.0).abs() < 1e-9);

        let secondary = axis_range(&data, Axis::Secondary);
        assert_eq!(secondary.start, 0.0);
        assert!((secondary.end - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_and_negative_ranges() {
        let flat = chart(vec![0.0, 0.0], vec![0.0, 0.0]);
        assert_eq!(axis_range(&flat, Axis::Primary), 0.0..1.0);

        let negative = chart(vec![-10.0, 10.0], vec![0.0, 0.0]);
        let range = axis_range(&negative, Axis::Primary);
        assert_eq!(range.start, -10.0);
        assert!((range.end - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_date_labels() {
        let dates: Vec<_> = (0..3).map(day).collect();
        assert_eq!(date_label(&dates, &0.0), "2021-01-01");
        assert_eq!(date_label(&dates, &1.6), "2021-01-03");
        assert_eq!(date_label(&dates, &7.0), "");
        assert_eq!(date_label(&dates, &-3.0), "");
    }

    #[tokio::test]
    async fn test_empty_data_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");

        let result = DualAxisRenderer::new()
            .render_to_file(&ChartConfig::default(), &ChartData::default(), &path)
            .await;
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    #[ignore = "requires system fonts"]
    async fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let data = chart(vec![10.0, 20.0, 15.0], vec![1.0, 2.0, 1.5]);
        let config = ChartConfig::titled("Test").with_axes("Cases", "Deaths").with_size(640, 480);

        DualAxisRenderer::new()
            .render_to_file(&config, &data, &path)
            .await
            .unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 1000, "Generated chart file is too small");
    }
}
