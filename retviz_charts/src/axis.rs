// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! A single [`AxisSpec`] with an `orient` of `top`, `bottom`, `left`, or
//! `right` generates the domain line, tick marks, tick labels, and optional
//! gridlines for a plot rectangle.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use retviz_scene::{Mark, MarkId, TextAnchor, TextBaseline};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::format::format_tick_with_step;
use crate::scale::{ScaleBand, ScaleLinear, ScaleSpec};
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in frame coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
        }
    }
}

/// Axis orientation relative to the plot area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed above the plot area.
    Top,
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
    /// A vertical axis placed to the right of the plot area.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Outward direction along the axis normal (+1 grows away from the plot).
    fn outward(self) -> f64 {
        match self {
            Self::Bottom | Self::Right => 1.0,
            Self::Top | Self::Left => -1.0,
        }
    }
}

/// An axis specification (scale + orient + styling).
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The axis scale specification.
    pub scale: ScaleSpec,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks for linear scales.
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Whether to draw tick marks.
    pub ticks: bool,
    /// Whether to draw tick labels.
    pub labels: bool,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional gridline styling.
    ///
    /// If `Some`, gridline marks are generated spanning the plot area.
    pub grid: Option<GridStyle>,
    /// Explicit tick values, replacing generated ones (linear scales only).
    pub ticks_override: Option<Vec<f64>>,
    /// Per-tick label strings, replacing formatted values.
    ///
    /// Band axes use these as category labels; linear axes may use them for
    /// caller-formatted ticks (month names). Indexed by tick position.
    pub tick_labels: Option<Vec<String>>,
    /// Optional tick label formatter.
    ///
    /// The second argument is the tick step (best-effort), usable for
    /// consistent decimal formatting.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("ticks", &self.ticks)
            .field("labels", &self.labels)
            .field("show_domain", &self.show_domain)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("grid", &self.grid)
            .field("ticks_override", &self.ticks_override)
            .field("tick_labels", &self.tick_labels)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification with defaults.
    pub fn new(id_base: u64, scale: impl Into<ScaleSpec>, orient: AxisOrient) -> Self {
        let tick_padding = if orient.is_horizontal() { 9.0 } else { 6.0 };
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size: 5.0,
            ticks: true,
            labels: true,
            show_domain: true,
            tick_padding,
            style: AxisStyle::default(),
            grid: None,
            ticks_override: None,
            tick_labels: None,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `top` axis.
    pub fn top(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Top)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Convenience constructor for a `right` axis.
    pub fn right(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Right)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set the tick line length.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Enable or disable tick marks.
    pub fn with_ticks(mut self, ticks: bool) -> Self {
        self.ticks = ticks;
        self
    }

    /// Enable or disable tick labels.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set tick padding.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Set explicit tick values (linear scales only).
    pub fn with_ticks_override(mut self, ticks: Vec<f64>) -> Self {
        self.ticks_override = Some(ticks);
        self
    }

    /// Set per-tick label strings.
    pub fn with_tick_labels(mut self, labels: Vec<String>) -> Self {
        self.tick_labels = Some(labels);
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable gridlines using the provided style.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Returns a linear scale mapping axis values into plot coordinates.
    ///
    /// Returns `None` if this axis uses a band scale.
    pub fn scale_linear(&self, plot: Rect) -> Option<ScaleLinear> {
        match self.scale {
            ScaleSpec::Linear(s) => {
                Some(s.instantiate_resolved(self.range(plot), self.tick_count))
            }
            ScaleSpec::Band(_) => None,
        }
    }

    /// Returns a band scale mapping indices into plot coordinates.
    ///
    /// Returns `None` if this axis uses a linear scale.
    pub fn scale_band(&self, plot: Rect) -> Option<ScaleBand> {
        match self.scale {
            ScaleSpec::Band(s) => Some(s.instantiate(self.range(plot))),
            ScaleSpec::Linear(_) => None,
        }
    }

    fn range(&self, plot: Rect) -> (f64, f64) {
        if self.orient.is_horizontal() {
            (plot.x0, plot.x1)
        } else {
            (plot.y1, plot.y0)
        }
    }

    fn tick_values(&self) -> (Vec<f64>, f64) {
        if let Some(override_ticks) = &self.ticks_override {
            let step = tick_step(override_ticks);
            return (override_ticks.clone(), step);
        }
        match self.scale {
            ScaleSpec::Linear(s) => {
                let domain = s.resolved_domain(self.tick_count);
                let ticks = ScaleLinear::new(domain, (0.0, 1.0)).ticks(self.tick_count);
                let step = tick_step(&ticks);
                (ticks, step)
            }
            ScaleSpec::Band(s) => {
                let ticks: Vec<f64> = (0..s.count).map(|i| i as f64).collect();
                (ticks, 1.0)
            }
        }
    }

    fn format_tick(&self, index: usize, v: f64, step: f64) -> String {
        if let Some(labels) = &self.tick_labels
            && let Some(label) = labels.get(index)
        {
            return label.clone();
        }
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    /// Generate axis marks for the given plot rectangle.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        let horizontal = self.orient.is_horizontal();
        let outward = self.orient.outward();
        // Position of the axis edge along the normal direction.
        let edge = match self.orient {
            AxisOrient::Top => plot.y0,
            AxisOrient::Bottom => plot.y1,
            AxisOrient::Left => plot.x0,
            AxisOrient::Right => plot.x1,
        };
        let tick_size = self.tick_size.abs();
        let tick_extent = if self.ticks { tick_size } else { 0.0 };
        let label_gap = self.tick_padding.max(0.0);
        let (ticks, step) = self.tick_values();

        let linear = self.scale_linear(plot);
        let band = self.scale_band(plot);
        let along = |v: f64| match (&linear, &band) {
            (Some(s), _) => s.map(v),
            (None, Some(b)) => b.center(discrete_index(v)),
            (None, None) => 0.0,
        };
        // Only positions inside the plot get ticks, labels, and grid lines.
        let (lo, hi) = if horizontal {
            (plot.x0, plot.x1)
        } else {
            (plot.y0, plot.y1)
        };
        let in_plot = |pos: f64| pos >= lo - 1.0e-9 && pos <= hi + 1.0e-9;

        let mut out = Vec::new();

        if let Some(grid) = &self.grid {
            let base = self.id_base.wrapping_sub(5_000);
            for (i, v) in ticks.iter().copied().enumerate() {
                let pos = along(v);
                if !in_plot(pos) {
                    continue;
                }
                let mut line = BezPath::new();
                if horizontal {
                    line.move_to((pos, plot.y0));
                    line.line_to((pos, plot.y1));
                } else {
                    line.move_to((plot.x0, pos));
                    line.line_to((plot.x1, pos));
                }
                out.push(
                    Mark::path(MarkId::from_raw(base + i as u64), line)
                        .with_stroke(grid.stroke.brush.clone(), grid.stroke.stroke_width)
                        .with_z_index(z_order::GRID_LINES),
                );
            }
        }

        if self.show_domain {
            let mut domain = BezPath::new();
            if horizontal {
                domain.move_to((plot.x0, edge));
                domain.line_to((plot.x1, edge));
            } else {
                domain.move_to((edge, plot.y0));
                domain.line_to((edge, plot.y1));
            }
            out.push(
                Mark::path(MarkId::from_raw(self.id_base), domain)
                    .with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES),
            );
        }

        for (i, v) in ticks.iter().copied().enumerate() {
            let pos = along(v);
            if !in_plot(pos) {
                continue;
            }

            if self.ticks {
                let tip = edge + outward * tick_size;
                let mut tick = BezPath::new();
                if horizontal {
                    tick.move_to((pos, edge));
                    tick.line_to((pos, tip));
                } else {
                    tick.move_to((edge, pos));
                    tick.line_to((tip, pos));
                }
                out.push(
                    Mark::path(MarkId::from_raw(self.id_base + 1 + i as u64), tick)
                        .with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
                        .with_z_index(z_order::AXIS_RULES),
                );
            }

            if self.labels {
                let offset = edge + outward * (tick_extent + label_gap);
                let (point, anchor, baseline) = match self.orient {
                    AxisOrient::Bottom => (
                        Point::new(pos, offset),
                        TextAnchor::Middle,
                        TextBaseline::Hanging,
                    ),
                    AxisOrient::Top => (
                        Point::new(pos, offset),
                        TextAnchor::Middle,
                        TextBaseline::Alphabetic,
                    ),
                    AxisOrient::Left => (
                        Point::new(offset, pos),
                        TextAnchor::End,
                        TextBaseline::Middle,
                    ),
                    AxisOrient::Right => (
                        Point::new(offset, pos),
                        TextAnchor::Start,
                        TextBaseline::Middle,
                    ),
                };
                out.push(
                    Mark::text(
                        MarkId::from_raw(self.id_base + 1_000 + i as u64),
                        point,
                        self.format_tick(i, v, step),
                        self.style.label_fill.clone(),
                    )
                    .with_font_size(self.style.label_font_size)
                    .with_alignment(anchor, baseline)
                    .with_z_index(z_order::AXIS_LABELS),
                );
            }
        }

        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

fn discrete_index(v: f64) -> usize {
    if !v.is_finite() || v < 0.0 {
        return 0;
    }
    let v = v.round().min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "value is clamped to a small non-negative range"
    )]
    {
        v as usize
    }
}
