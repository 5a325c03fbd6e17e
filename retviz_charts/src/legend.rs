// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! The dashboard charts carry a horizontal "swatches + labels" row above the
//! plot, so that is the only legend shape provided here.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::color::palette::css;
use peniko::{Brush, Color};
use retviz_scene::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::layout::Size;
use crate::measure::TextMeasurer;
use crate::z_order;

/// A single legend entry.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// A horizontal row of color swatches with text labels.
///
/// Items are placed left to right. With `item_pitch` set, items sit on a
/// fixed-pitch grid; otherwise each item advances by its measured width plus
/// `item_gap`.
#[derive(Clone, Debug)]
pub struct LegendRowSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Gap between measured items, when `item_pitch` is unset.
    pub item_gap: f64,
    /// Fixed distance between item origins.
    pub item_pitch: Option<f64>,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendRowSpec {
    /// Creates a new legend row with defaults.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            swatch_size: 12.0,
            label_dx: 5.0,
            item_gap: 16.0,
            item_pitch: None,
            font_size: 11.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// Set a fixed distance between item origins.
    pub fn with_item_pitch(mut self, item_pitch: f64) -> Self {
        self.item_pitch = Some(item_pitch);
        self
    }

    /// Set the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the swatch size.
    pub fn with_swatch_size(mut self, swatch_size: f64) -> Self {
        self.swatch_size = swatch_size;
        self
    }

    /// Set the label text paint.
    pub fn with_text_fill(mut self, text_fill: impl Into<Brush>) -> Self {
        self.text_fill = text_fill.into();
        self
    }

    fn item_width(&self, item: &LegendItem, measurer: &dyn TextMeasurer) -> f64 {
        let (label_w, _) = measurer.measure(&item.label, self.font_size);
        self.swatch_size + self.label_dx + label_w
    }

    /// Measures the row's size.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        let height = self.swatch_size.max(self.font_size);
        let width = match self.item_pitch {
            Some(pitch) => match self.items.split_last() {
                Some((last, rest)) => {
                    rest.len() as f64 * pitch + self.item_width(last, measurer)
                }
                None => 0.0,
            },
            None => {
                let items: f64 = self
                    .items
                    .iter()
                    .map(|item| self.item_width(item, measurer))
                    .sum();
                let gaps = self.item_gap * self.items.len().saturating_sub(1) as f64;
                items + gaps
            }
        };
        Size { width, height }
    }

    /// Generates legend marks with the row's top-left corner at `(x, y)`.
    pub fn marks(&self, x: f64, y: f64, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::new();
        let row_height = self.swatch_size.max(self.font_size);
        let mut cursor = x;

        for (i, item) in self.items.iter().enumerate() {
            let origin = match self.item_pitch {
                Some(pitch) => x + i as f64 * pitch,
                None => cursor,
            };
            let swatch_y = y + (row_height - self.swatch_size) * 0.5;

            out.push(
                Mark::rect(
                    MarkId::from_raw(self.id_base + i as u64),
                    Rect::new(
                        origin,
                        swatch_y,
                        origin + self.swatch_size,
                        swatch_y + self.swatch_size,
                    ),
                    item.fill.clone(),
                )
                .with_z_index(z_order::LEGEND_SWATCHES),
            );

            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 1_000 + i as u64),
                    kurbo::Point::new(origin + self.swatch_size + self.label_dx, y + row_height * 0.5),
                    item.label.clone(),
                    self.text_fill.clone(),
                )
                .with_font_size(self.font_size)
                .with_alignment(TextAnchor::Start, TextBaseline::Middle)
                .with_z_index(z_order::LEGEND_LABELS),
            );

            cursor = origin + self.item_width(item, measurer) + self.item_gap;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use retviz_scene::MarkBody;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn fixed_pitch_places_items_on_a_grid() {
        let measurer = HeuristicTextMeasurer;
        let spec = LegendRowSpec::new(
            1,
            vec![
                LegendItem::solid("Your Company", css::GREEN),
                LegendItem::solid("Industry Avg", css::GRAY),
            ],
        )
        .with_item_pitch(100.0);

        let marks = spec.marks(10.0, 0.0, &measurer);
        let swatch_xs: Vec<f64> = marks
            .iter()
            .filter_map(|m| match &m.body {
                MarkBody::Rect(r) => Some(r.rect.x0),
                _ => None,
            })
            .collect();
        assert_eq!(swatch_xs, vec![10.0, 110.0]);
    }

    #[test]
    fn measured_rows_grow_with_label_length() {
        let measurer = HeuristicTextMeasurer;
        let short = LegendRowSpec::new(1, vec![LegendItem::solid("A", css::BLACK)]);
        let long = LegendRowSpec::new(1, vec![LegendItem::solid("A much longer label", css::BLACK)]);
        assert!(long.measure(&measurer).width > short.measure(&measurer).width);
    }

    #[test]
    fn each_item_emits_one_swatch_and_one_label() {
        let measurer = HeuristicTextMeasurer;
        let spec = LegendRowSpec::new(
            1,
            vec![
                LegendItem::solid("Donate", css::BLUE),
                LegendItem::solid("Resell", css::GREEN),
                LegendItem::solid("Recycle", css::PURPLE),
            ],
        );
        let marks = spec.marks(0.0, 0.0, &measurer);
        let swatches = marks
            .iter()
            .filter(|m| matches!(m.body, MarkBody::Rect(_)))
            .count();
        let labels = marks
            .iter()
            .filter(|m| matches!(m.body, MarkBody::Text(_)))
            .count();
        assert_eq!(swatches, 3);
        assert_eq!(labels, 3);
    }
}
