//! Plotters-powered GDP bar chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! The widget draws in scene coordinates (x from the scene, y as bar height
//! above the baseline) with no margins or label areas, so a terminal cell maps
//! linearly back to a scene x coordinate for hover hit testing.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::Bar;

/// A lightweight, render-only chart description.
pub struct GdpPlottersChart<'a> {
    pub bars: &'a [Bar],
    /// Index of the bar under the pointer, drawn highlighted with a marker.
    pub hovered: Option<usize>,
    /// Scene x extent.
    pub x_bounds: [f64; 2],
    /// Bar height extent (0 .. baseline − top padding).
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for GdpPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root).build_cartesian_2d(x0..x1, y0..y1)?;

            let bar_color = RGBColor(51, 173, 255);
            let hover_color = WHITE;
            let marker_color = RGBColor(255, 255, 0);

            chart.draw_series(self.bars.iter().enumerate().map(|(i, b)| {
                let color = if Some(i) == self.hovered { hover_color } else { bar_color };
                Rectangle::new([(b.x, 0.0), (b.x + b.width, b.height)], ShapeStyle::from(&color).filled())
            }))?;

            // Baseline.
            chart.draw_series(LineSeries::new([(x0, y0), (x1, y0)], &WHITE))?;

            if let Some(bar) = self.hovered.and_then(|i| self.bars.get(i)) {
                let cx = bar.center_x();
                chart.draw_series(LineSeries::new([(cx, y0), (cx, y1)], &marker_color))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
