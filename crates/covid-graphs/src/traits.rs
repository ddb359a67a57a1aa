//! Chart trait definitions for the concrete COVID charts.

use crate::{ChartConfig, ChartData};

/// A chart that knows its own title, axes and lines.
pub trait Chart {
    /// Title and axis descriptions. Size and background are filled in by
    /// the [`ChartManager`](crate::ChartManager).
    fn chart_config(&self) -> ChartConfig;

    /// Dates and lines to draw.
    fn chart_data(&self) -> ChartData;
}
