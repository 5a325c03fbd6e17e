// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped bar chart generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use retviz_scene::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::axis::AxisSpec;
use crate::layout::{Margins, Size};
use crate::legend::{LegendItem, LegendRowSpec};
use crate::measure::TextMeasurer;
use crate::scale::{ScaleBandSpec, ScaleLinearSpec};
use crate::{format_tick_with_step, z_order};

// Id namespaces within the chart. Bars get BARS + series * 100 + category.
const ID_AXIS_X: u64 = 10_000;
const ID_AXIS_Y: u64 = 20_000;
const ID_LEGEND: u64 = 30_000;
const ID_LABELS: u64 = 40_000;
const ID_BARS: u64 = 50_000;

/// One bar series: a name, a color, and a value per category.
#[derive(Clone, Debug)]
pub struct BarSeries {
    /// Series name, shown in the legend.
    pub name: String,
    /// Bar fill color.
    pub color: Color,
    /// One value per category, in category order.
    pub values: Vec<f64>,
}

impl BarSeries {
    /// Creates a series.
    pub fn new(name: impl Into<String>, color: Color, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color,
            values,
        }
    }
}

/// A two-series grouped bar chart over percentage values.
///
/// Categories run along a band x-scale; the y-scale is linear over a fixed
/// [0, 100] percent domain. The two series' bars are offset symmetrically
/// about each band center, each half a band wide minus a small gap. Category
/// labels are drawn as separate rotated text below the axis, so the axis
/// itself renders ticks without labels.
#[derive(Clone, Debug)]
pub struct GroupedBarSpec {
    /// Category labels, one band each.
    pub categories: Vec<String>,
    /// First series ("your company" in the dashboard).
    pub primary: BarSeries,
    /// Second series ("industry average").
    pub secondary: BarSeries,
    /// Margins reserved around the plot.
    pub margins: Margins,
    /// Band padding ratio (inner and outer).
    pub band_padding: f64,
    /// Gap subtracted from each half-band bar width.
    pub bar_gap: f64,
    /// Rotation of category labels, degrees clockwise.
    pub label_angle: f64,
    /// Approximate y-axis tick count.
    pub y_tick_count: usize,
}

impl GroupedBarSpec {
    /// Creates a grouped bar chart with the dashboard's layout defaults.
    pub fn new(categories: Vec<String>, primary: BarSeries, secondary: BarSeries) -> Self {
        Self {
            categories,
            primary,
            secondary,
            margins: Margins::new(40.0, 20.0, 80.0, 50.0),
            band_padding: 0.4,
            bar_gap: 0.1,
            label_angle: -30.0,
            y_tick_count: 5,
        }
    }

    /// Generates all chart marks for a view of `size`.
    pub fn marks(&self, size: Size, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let plot = self.margins.plot_rect(size);
        let mut out = Vec::new();

        let band_spec =
            ScaleBandSpec::new(self.categories.len()).with_padding(self.band_padding, self.band_padding);
        let y_spec = ScaleLinearSpec::new((0.0, 100.0));

        let band = band_spec.instantiate((plot.x0, plot.x1));
        let y = y_spec.instantiate((plot.y1, plot.y0));
        let bw = band.band_width();
        let bar_width = (bw / 2.0 - self.bar_gap).max(0.0);

        for (series_idx, series) in [&self.primary, &self.secondary].into_iter().enumerate() {
            // Primary bars sit left of the band start, secondary bars right of
            // it, a quarter band out each way.
            let dx = if series_idx == 0 { -bw / 4.0 } else { bw / 4.0 };
            let fill = Brush::Solid(series.color);
            for (cat_idx, value) in series.values.iter().copied().enumerate() {
                if cat_idx >= self.categories.len() {
                    break;
                }
                let x0 = band.x(cat_idx) + dx;
                let y_top = y.map(value.clamp(0.0, 100.0));
                let id = ID_BARS + series_idx as u64 * 100 + cat_idx as u64;
                out.push(
                    Mark::rect(
                        MarkId::from_raw(id),
                        Rect::new(x0, y_top, x0 + bar_width, plot.y1),
                        fill.clone(),
                    )
                    .with_z_index(z_order::SERIES_FILL),
                );
            }
        }

        // Bottom axis: domain + ticks only; labels come below, rotated.
        out.extend(
            AxisSpec::bottom(ID_AXIS_X, band_spec)
                .with_labels(false)
                .marks(plot),
        );

        out.extend(
            AxisSpec::left(ID_AXIS_Y, y_spec)
                .with_tick_count(self.y_tick_count)
                .with_tick_formatter(|v, step| {
                    alloc::format!("{}%", format_tick_with_step(v, step))
                })
                .marks(plot),
        );

        for (i, label) in self.categories.iter().enumerate() {
            let x = band.center(i);
            out.push(
                Mark::text(
                    MarkId::from_raw(ID_LABELS + i as u64),
                    Point::new(x, plot.y1 + 15.0),
                    label.clone(),
                    peniko::color::palette::css::BLACK,
                )
                .with_font_size(11.0)
                .with_alignment(TextAnchor::Middle, TextBaseline::Alphabetic)
                .with_angle(self.label_angle)
                .with_z_index(z_order::AXIS_LABELS),
            );
        }

        let legend = LegendRowSpec::new(
            ID_LEGEND,
            alloc::vec![
                LegendItem::solid(self.primary.name.clone(), self.primary.color),
                LegendItem::solid(self.secondary.name.clone(), self.secondary.color),
            ],
        )
        .with_item_pitch(100.0);
        out.extend(legend.marks(self.margins.left, 15.0, measurer));

        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::Color;
    use retviz_scene::MarkBody;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    fn spec() -> GroupedBarSpec {
        GroupedBarSpec::new(
            vec![
                "Recycled".into(),
                "Diverted".into(),
                "Emissions".into(),
                "Resold".into(),
            ],
            BarSeries::new(
                "Your Company",
                Color::from_rgb8(0x7C, 0xB3, 0x42),
                vec![71.0, 94.0, 79.0, 52.0],
            ),
            BarSeries::new(
                "Industry Avg",
                Color::from_rgb8(0xA9, 0xA9, 0xA9),
                vec![43.0, 69.0, 49.0, 21.0],
            ),
        )
    }

    fn bar_rects(marks: &[Mark]) -> Vec<Rect> {
        marks
            .iter()
            .filter(|m| m.id.raw() >= ID_BARS && m.z_index == z_order::SERIES_FILL)
            .filter_map(|m| match &m.body {
                MarkBody::Rect(r) => Some(r.rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn draws_two_bars_per_category() {
        let marks = spec().marks(Size::new(540.0, 350.0), &HeuristicTextMeasurer);
        assert_eq!(bar_rects(&marks).len(), 8);
    }

    #[test]
    fn bars_rise_from_the_plot_floor() {
        let spec = spec();
        let size = Size::new(540.0, 350.0);
        let plot = spec.margins.plot_rect(size);
        let marks = spec.marks(size, &HeuristicTextMeasurer);
        for rect in bar_rects(&marks) {
            assert!((rect.y1 - plot.y1).abs() < 1e-9);
            assert!(rect.y0 >= plot.y0 - 1e-9);
            assert!(rect.height() > 0.0);
        }
    }

    #[test]
    fn series_pairs_straddle_the_band_start() {
        let spec = spec();
        let size = Size::new(540.0, 350.0);
        let marks = spec.marks(size, &HeuristicTextMeasurer);
        let rects = bar_rects(&marks);
        // First category: primary is the first rect, secondary the fifth.
        let primary = rects[0];
        let secondary = rects[4];
        assert!(primary.x0 < secondary.x0);
        assert!((primary.width() - secondary.width()).abs() < 1e-9);
    }

    #[test]
    fn taller_value_means_higher_bar() {
        let spec = spec();
        let marks = spec.marks(Size::new(540.0, 350.0), &HeuristicTextMeasurer);
        let rects = bar_rects(&marks);
        // Category values 71 vs 43: the primary bar is taller.
        assert!(rects[0].height() > rects[4].height());
    }

    #[test]
    fn category_labels_are_rotated_text() {
        let spec = spec();
        let marks = spec.marks(Size::new(540.0, 350.0), &HeuristicTextMeasurer);
        let labels: Vec<_> = marks
            .iter()
            .filter(|m| (ID_LABELS..ID_BARS).contains(&m.id.raw()))
            .collect();
        assert_eq!(labels.len(), 4);
        for m in labels {
            let MarkBody::Text(t) = &m.body else {
                panic!("expected text label");
            };
            assert_eq!(t.angle, -30.0);
        }
    }

    #[test]
    fn redraw_is_idempotent() {
        let spec = spec();
        let size = Size::new(540.0, 350.0);
        let a = spec.marks(size, &HeuristicTextMeasurer);
        let b = spec.marks(size, &HeuristicTextMeasurer);
        assert_eq!(a, b);
    }
}
