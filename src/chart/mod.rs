//! Chart rendering.
//!
//! Renderers keep no state across redraws: every `render` call replaces
//! whatever was drawn before.

pub mod text;

pub use text::TextChart;

use crate::presenter::ChartSeries;

/// Draws a bar chart from parallel label/value/color sequences.
///
/// Implementations must dispose of the previous drawing before drawing the
/// new one. An empty series clears the chart.
pub trait ChartRenderer {
    fn render(&mut self, series: &ChartSeries);
}

/// Renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoChart;

impl ChartRenderer for NoChart {
    fn render(&mut self, _series: &ChartSeries) {}
}
