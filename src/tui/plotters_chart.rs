//! Plotters-powered indicator history chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::Observation;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call (see [`ChartData`]).
pub struct HistoryChart<'a> {
    /// Line series: x is days since the common era, y is the indicator value.
    pub line: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
}

/// Chart-ready series plus padded bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub line: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartData {
    /// `None` for an empty series.
    pub fn from_series(series: &[Observation]) -> Option<Self> {
        let line: Vec<(f64, f64)> = series
            .iter()
            .map(|o| (o.date.num_days_from_ce() as f64, o.value))
            .collect();
        let (first, last) = (line.first()?, line.last()?);

        let (mut x0, mut x1) = (first.0, last.0);
        if x1 <= x0 {
            x0 -= 1.0;
            x1 += 1.0;
        }

        let (mut y_min, mut y_max) = line
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        if y_max <= y_min {
            y_min -= 0.5;
            y_max += 0.5;
        }
        let pad = ((y_max - y_min) * 0.05).max(1e-12);

        Some(Self {
            line,
            x_bounds: [x0, x1],
            y_bounds: [y_min - pad, y_max + pad],
        })
    }
}

/// Format a days-since-CE axis value as a month label.
pub fn fmt_axis_date(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%b %y").to_string())
        .unwrap_or_default()
}

fn fmt_axis_value(v: f64) -> String {
    format!("{v:.2}")
}

impl<'a> Widget for HistoryChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
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
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_axis_date(*v))
                .y_label_formatter(&|v| fmt_axis_value(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Zero reference for series that change sign (spread, stance).
            if y0 < 0.0 && y1 > 0.0 {
                let grey = RGBColor(128, 128, 128);
                chart.draw_series(LineSeries::new([(x0, 0.0), (x1, 0.0)], &grey))?;
            }

            let line_color = RGBColor(0, 255, 255); // cyan
            chart.draw_series(LineSeries::new(self.line.iter().copied(), &line_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
