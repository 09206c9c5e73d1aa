//! Horizontal text bar chart.

use std::fmt::Write as _;

use crate::presenter::ChartSeries;

use super::ChartRenderer;

const BAR: char = '█';
const TITLE: &str = "Player Scores";

/// Draws a horizontal bar chart into an in-memory frame.
///
/// Bars are scaled so the largest positive value spans `width` cells.
/// Zero and negative totals draw an empty bar. With ANSI enabled, each bar
/// is tinted with its player's color.
#[derive(Clone, Debug)]
pub struct TextChart {
    width: usize,
    ansi: bool,
    frame: Option<String>,
    draws: usize,
}

impl TextChart {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            ansi: false,
            frame: None,
            draws: 0,
        }
    }

    /// Enable truecolor escape sequences.
    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// The current drawing, `None` when there is nothing to chart.
    #[must_use]
    pub fn frame(&self) -> Option<&str> {
        self.frame.as_deref()
    }

    /// Number of frames drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.draws
    }

    fn draw(&self, series: &ChartSeries) -> String {
        let label_width = series
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let max = series.values.iter().copied().fold(0.0_f64, f64::max);

        let mut out = String::new();
        let _ = writeln!(out, "{TITLE}");

        for ((label, value), color) in series
            .labels
            .iter()
            .zip(&series.values)
            .zip(&series.colors)
        {
            let cells = if max > 0.0 && *value > 0.0 {
                ((value / max) * self.width as f64).round() as usize
            } else {
                0
            };
            let bar: String = std::iter::repeat(BAR).take(cells).collect();

            let _ = write!(out, "{label:<label_width$} |");
            if self.ansi && cells > 0 {
                let _ = write!(out, "\x1b[38;2;{};{};{}m{bar}\x1b[0m", color.r, color.g, color.b);
            } else {
                out.push_str(&bar);
            }
            let _ = writeln!(out, " {value}");
        }

        out
    }
}

impl ChartRenderer for TextChart {
    fn render(&mut self, series: &ChartSeries) {
        // Dispose of the previous frame before drawing a new one.
        self.frame.take();

        if series.is_empty() {
            return;
        }

        self.frame = Some(self.draw(series));
        self.draws += 1;
    }
}
