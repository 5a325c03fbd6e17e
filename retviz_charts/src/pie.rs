// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category share donut.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{BezPath, Circle, Point, Shape};
use peniko::{Brush, Color};
use retviz_scene::{Mark, MarkId, TextAnchor, TextBaseline};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::layout::{Margins, Size};
use crate::legend::{LegendItem, LegendRowSpec};
use crate::measure::TextMeasurer;
use crate::z_order;

// Id namespaces within the chart. Slices get SLICES + drawn index.
const ID_COUNT: u64 = 1;
const ID_CAPTION: u64 = 2;
const ID_SLICES: u64 = 100;
const ID_LEGEND: u64 = 30_000;

/// Curve flattening tolerance for arc segments.
const ARC_TOLERANCE: f64 = 0.1;

/// One donut slice: a category name, its color, and an item count.
#[derive(Clone, Debug)]
pub struct PieSlice {
    /// Category name, shown in the legend.
    pub name: String,
    /// Slice fill color.
    pub color: Color,
    /// Item count; slices at zero are not drawn.
    pub value: f64,
}

impl PieSlice {
    /// Creates a slice.
    pub fn new(name: impl Into<String>, color: Color, value: f64) -> Self {
        Self {
            name: name.into(),
            color,
            value,
        }
    }
}

/// A category-share donut with the total item count in the hole and a
/// bottom legend.
///
/// Slices run clockwise from twelve o'clock in input order, each sweeping in
/// proportion to its value; zero-valued slices are skipped entirely rather
/// than drawn as empty wedges. The legend lists each drawn slice as
/// `name (count)` on a fixed column pitch.
#[derive(Clone, Debug)]
pub struct PieSpec {
    /// Slices in display order.
    pub slices: Vec<PieSlice>,
    /// Margins reserved around the plot.
    pub margins: Margins,
    /// Hole radius as a fraction of the plot radius.
    pub inner_ratio: f64,
    /// Donut radius as a fraction of the plot radius.
    pub outer_ratio: f64,
    /// Slice fill opacity.
    pub slice_alpha: f32,
    /// Center count color.
    pub count_color: Color,
    /// Center caption color.
    pub caption_color: Color,
    /// Maximum legend columns sharing the plot width.
    pub legend_columns: usize,
}

impl PieSpec {
    /// Creates a donut with the dashboard's layout defaults.
    pub fn new(slices: Vec<PieSlice>) -> Self {
        Self {
            slices,
            margins: Margins::new(20.0, 20.0, 40.0, 20.0),
            inner_ratio: 0.4,
            outer_ratio: 0.8,
            slice_alpha: 0.8,
            count_color: Color::from_rgb8(0x4B, 0x55, 0x63),
            caption_color: Color::from_rgb8(0x6B, 0x72, 0x80),
            legend_columns: 4,
        }
    }

    /// Generates all chart marks for a view of `size`.
    pub fn marks(&self, size: Size, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let plot = self.margins.plot_rect(size);
        let mut out = Vec::new();

        let radius = plot.width().min(plot.height()) / 2.0;
        let center = plot.center();
        let outer = radius * self.outer_ratio;
        let inner = radius * self.inner_ratio;

        let drawn: Vec<&PieSlice> = self.slices.iter().filter(|s| s.value > 0.0).collect();
        let total: f64 = drawn.iter().map(|s| s.value).sum();

        let mut angle = -FRAC_PI_2;
        for (i, slice) in drawn.iter().enumerate() {
            let sweep = slice.value / total * 2.0 * PI;
            out.push(
                Mark::path(
                    MarkId::from_raw(ID_SLICES + i as u64),
                    ring(center, outer, inner, angle, sweep),
                )
                .with_fill(Brush::Solid(slice.color.with_alpha(self.slice_alpha)))
                .with_stroke(Color::WHITE, 2.0)
                .with_z_index(z_order::SERIES_FILL),
            );
            angle += sweep;
        }

        out.push(
            Mark::text(
                MarkId::from_raw(ID_COUNT),
                center,
                count_text(total),
                self.count_color,
            )
            .with_font_size(20.0)
            .with_bold()
            .with_alignment(TextAnchor::Middle, TextBaseline::Middle)
            .with_z_index(z_order::TITLES),
        );
        out.push(
            Mark::text(
                MarkId::from_raw(ID_CAPTION),
                Point::new(center.x, center.y + 18.0),
                "Items",
                self.caption_color,
            )
            .with_font_size(12.0)
            .with_alignment(TextAnchor::Middle, TextBaseline::Middle)
            .with_z_index(z_order::TITLES),
        );

        if !drawn.is_empty() {
            let pitch = plot.width() / drawn.len().min(self.legend_columns) as f64;
            let legend = LegendRowSpec::new(
                ID_LEGEND,
                drawn
                    .iter()
                    .map(|s| LegendItem::solid(legend_label(s), s.color))
                    .collect(),
            )
            .with_item_pitch(pitch);
            out.extend(legend.marks(plot.x0, plot.y1 + 15.0, measurer));
        }

        out
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "slice values are item counts"
)]
fn count_text(total: f64) -> String {
    alloc::format!("{}", total.round() as u64)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "slice values are item counts"
)]
fn legend_label(slice: &PieSlice) -> String {
    alloc::format!("{} ({})", slice.name, slice.value.round() as u64)
}

/// Builds an annular sector path between `inner` and `outer` radii, starting
/// at `start_angle` and sweeping clockwise by `sweep` radians.
fn ring(center: Point, outer: f64, inner: f64, start_angle: f64, sweep: f64) -> BezPath {
    Circle::new(center, outer)
        .segment(inner, start_angle, sweep)
        .path_elements(ARC_TOLERANCE)
        .collect()
}
