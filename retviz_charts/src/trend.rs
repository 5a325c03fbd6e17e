// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-series monotone trend chart with gradient area fills.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Circle, Point, Shape};
use peniko::{Brush, Color, Gradient};
use retviz_scene::{Mark, MarkId};

use crate::axis::{AxisSpec, GridStyle, StrokeStyle};
use crate::curve::{monotone_area, monotone_line};
use crate::layout::{Margins, Size};
use crate::legend::{LegendItem, LegendRowSpec};
use crate::measure::TextMeasurer;
use crate::scale::ScaleLinearSpec;
use crate::z_order;

const ID_AXIS_X: u64 = 10_000;
const ID_AXIS_Y: u64 = 20_000;
const ID_LEGEND: u64 = 30_000;
// Per series: area, line, then one id per point dot.
const ID_SERIES: u64 = 50_000;
const SERIES_STRIDE: u64 = 1_000;

/// Flattening tolerance for point marker circles.
const DOT_TOLERANCE: f64 = 0.05;

/// One data point on a trend series.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendPoint {
    /// Position on the x axis, in the caller's linear units.
    pub x: f64,
    /// Percentage value in `0..=100`.
    pub value: f64,
    /// Optional hover label attached to the point marker.
    pub label: Option<String>,
}

impl TrendPoint {
    /// Creates an unlabeled point.
    pub fn new(x: f64, value: f64) -> Self {
        Self {
            x,
            value,
            label: None,
        }
    }

    /// Attaches a hover label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A named trend series.
#[derive(Clone, Debug)]
pub struct TrendSeries {
    /// Series name, shown in the legend.
    pub name: String,
    /// Line, dot, and fade color.
    pub color: Color,
    /// Points in ascending x order.
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Creates a series.
    pub fn new(name: impl Into<String>, color: Color, points: Vec<TrendPoint>) -> Self {
        Self {
            name: name.into(),
            color,
            points,
        }
    }
}

/// An area-plus-line trend chart over a fixed percent y domain.
///
/// Each series is drawn three times: a monotone area closed onto the plot
/// floor and filled with a vertical fade of the series color, the same curve
/// stroked on top, and a ring marker per point. X tick positions and labels
/// come from the caller, which keeps calendar handling out of the chart.
#[derive(Clone, Debug)]
pub struct TrendSpec {
    /// Series in draw order.
    pub series: Vec<TrendSeries>,
    /// X domain in the same units as the point positions.
    pub x_domain: (f64, f64),
    /// X tick positions.
    pub x_ticks: Vec<f64>,
    /// X tick labels, parallel to `x_ticks`.
    pub x_tick_labels: Vec<String>,
    /// Margins reserved around the plot.
    pub margins: Margins,
    /// Approximate y-axis tick count.
    pub y_tick_count: usize,
    /// Gridline styling, applied on both axes.
    pub grid: GridStyle,
    /// Point marker radius.
    pub dot_radius: f64,
    /// Peak alpha of the area fade, at the top of the plot.
    pub area_alpha: f32,
}

impl TrendSpec {
    /// Creates a trend chart with the dashboard's layout defaults.
    pub fn new(series: Vec<TrendSeries>, x_domain: (f64, f64)) -> Self {
        Self {
            series,
            x_domain,
            x_ticks: Vec::new(),
            x_tick_labels: Vec::new(),
            margins: Margins::new(20.0, 30.0, 50.0, 60.0),
            y_tick_count: 10,
            grid: GridStyle {
                stroke: StrokeStyle::solid(Color::from_rgb8(0xe0, 0xe0, 0xe0), 1.0),
            },
            dot_radius: 5.0,
            area_alpha: 0.4,
        }
    }

    /// Set the x tick positions and their labels.
    pub fn with_x_ticks(mut self, ticks: Vec<f64>, labels: Vec<String>) -> Self {
        self.x_ticks = ticks;
        self.x_tick_labels = labels;
        self
    }

    /// Generates all chart marks for a view of `size`.
    pub fn marks(&self, size: Size, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let plot = self.margins.plot_rect(size);
        let mut out = Vec::new();

        let x_spec = ScaleLinearSpec::new(self.x_domain);
        let y_spec = ScaleLinearSpec::new((0.0, 100.0));
        let x = x_spec.instantiate((plot.x0, plot.x1));
        let y = y_spec.instantiate((plot.y1, plot.y0));

        out.extend(
            AxisSpec::bottom(ID_AXIS_X, x_spec)
                .with_ticks_override(self.x_ticks.clone())
                .with_tick_labels(self.x_tick_labels.clone())
                .with_grid(self.grid.clone())
                .marks(plot),
        );
        out.extend(
            AxisSpec::left(ID_AXIS_Y, y_spec)
                .with_tick_count(self.y_tick_count)
                .with_grid(self.grid.clone())
                .marks(plot),
        );

        for (series_idx, series) in self.series.iter().enumerate() {
            let id_base = ID_SERIES + series_idx as u64 * SERIES_STRIDE;
            let mapped: Vec<Point> = series
                .points
                .iter()
                .map(|p| Point::new(x.map(p.x), y.map(p.value.clamp(0.0, 100.0))))
                .collect();

            if mapped.len() >= 2 {
                let fade = Gradient::new_linear((plot.x0, plot.y0), (plot.x0, plot.y1))
                    .with_stops([
                        (0.0, series.color.with_alpha(self.area_alpha)),
                        (1.0, series.color.with_alpha(0.0)),
                    ]);
                out.push(
                    Mark::path(MarkId::from_raw(id_base), monotone_area(&mapped, plot.y1))
                        .with_fill(Brush::Gradient(fade))
                        .with_z_index(z_order::SERIES_FILL),
                );
                out.push(
                    Mark::path(MarkId::from_raw(id_base + 1), monotone_line(&mapped))
                        .with_stroke(Brush::Solid(series.color), 2.0)
                        .with_z_index(z_order::SERIES_STROKE),
                );
            }

            for (point_idx, (point, pos)) in series.points.iter().zip(&mapped).enumerate() {
                let dot = Circle::new(*pos, self.dot_radius).to_path(DOT_TOLERANCE);
                let mut mark = Mark::path(MarkId::from_raw(id_base + 2 + point_idx as u64), dot)
                    .with_fill(Brush::Solid(peniko::color::palette::css::WHITE))
                    .with_stroke(Brush::Solid(series.color), 2.0)
                    .with_z_index(z_order::SERIES_POINTS);
                if let Some(label) = &point.label {
                    mark = mark.with_tooltip(label.clone());
                }
                out.push(mark);
            }
        }

        let items: Vec<LegendItem> = self
            .series
            .iter()
            .map(|s| LegendItem::solid(s.name.clone(), s.color))
            .collect();
        if !items.is_empty() {
            let legend = LegendRowSpec::new(ID_LEGEND, items);
            let legend_size = legend.measure(measurer);
            let lx = (size.width - legend_size.width) / 2.0;
            let ly = plot.y1 + 35.0;
            out.extend(legend.marks(lx, ly, measurer));
        }

        out
    }
}
