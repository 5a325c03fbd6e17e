// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Score donut gauge.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{BezPath, Circle, Point, Shape};
use peniko::{Brush, Color};
use retviz_scene::{Mark, MarkId, TextAnchor, TextBaseline};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::z_order;

const ID_TRACK: u64 = 1;
const ID_VALUE: u64 = 2;
const ID_LABEL: u64 = 3;

/// Curve flattening tolerance for arc segments.
const ARC_TOLERANCE: f64 = 0.1;

/// A single-value donut gauge for a 0..=100 sustainability score.
///
/// A full-circle ring in a light track color sits under a value arc that
/// starts at twelve o'clock and sweeps clockwise in proportion to the score.
/// The score is printed in the donut hole as `score/100`.
#[derive(Clone, Debug)]
pub struct GaugeSpec {
    /// Score in `0..=100`. Values outside the range are clamped.
    pub score: f64,
    /// Inner radius as a fraction of the outer radius.
    pub hole_ratio: f64,
    /// Value arc color.
    pub value_color: Color,
    /// Background track color.
    pub track_color: Color,
    /// Center label color.
    pub label_color: Color,
    /// Center label font size.
    pub font_size: f64,
}

impl GaugeSpec {
    /// Creates a gauge with the dashboard's green-on-pale-green styling.
    pub fn new(score: f64) -> Self {
        Self {
            score,
            hole_ratio: 0.7,
            value_color: Color::from_rgb8(0x7C, 0xB3, 0x42),
            track_color: Color::from_rgb8(0xF1, 0xF8, 0xE9),
            label_color: Color::from_rgb8(0x33, 0x33, 0x33),
            font_size: 24.0,
        }
    }

    /// Generates the gauge marks, centered in a square of `side`.
    pub fn marks(&self, side: f64) -> Vec<Mark> {
        let mut out = Vec::new();
        let center = Point::new(side / 2.0, side / 2.0);
        let outer = side / 2.0;
        let inner = outer * self.hole_ratio;
        let score = self.score.clamp(0.0, 100.0);

        out.push(
            Mark::path(MarkId::from_raw(ID_TRACK), ring(center, outer, inner, 0.0, 2.0 * PI))
                .with_fill(Brush::Solid(self.track_color))
                .with_z_index(z_order::SERIES_FILL),
        );

        let sweep = score / 100.0 * 2.0 * PI;
        if sweep > 0.0 {
            out.push(
                Mark::path(
                    MarkId::from_raw(ID_VALUE),
                    ring(center, outer, inner, -FRAC_PI_2, sweep),
                )
                .with_fill(Brush::Solid(self.value_color))
                .with_z_index(z_order::SERIES_STROKE),
            );
        }

        out.push(
            Mark::text(
                MarkId::from_raw(ID_LABEL),
                center,
                label_text(score),
                self.label_color,
            )
            .with_font_size(self.font_size)
            .with_bold()
            .with_alignment(TextAnchor::Middle, TextBaseline::Middle)
            .with_z_index(z_order::TITLES),
        );

        out
    }
}

fn label_text(score: f64) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "score is clamped to 0..=100 before rounding"
    )]
    let rounded = score.round() as u32;
    alloc::format!("{rounded}/100")
}

/// Builds an annular sector path between `inner` and `outer` radii, starting
/// at `start_angle` and sweeping clockwise by `sweep` radians.
fn ring(center: Point, outer: f64, inner: f64, start_angle: f64, sweep: f64) -> BezPath {
    Circle::new(center, outer)
        .segment(inner, start_angle, sweep)
        .path_elements(ARC_TOLERANCE)
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use retviz_scene::MarkBody;

    use super::*;

    fn value_arc(marks: &[Mark]) -> Option<&Mark> {
        marks.iter().find(|m| m.id == MarkId::from_raw(ID_VALUE))
    }

    #[test]
    fn zero_score_draws_no_value_arc() {
        let marks = GaugeSpec::new(0.0).marks(250.0);
        assert!(value_arc(&marks).is_none());
        assert!(marks.iter().any(|m| m.id == MarkId::from_raw(ID_TRACK)));
    }

    #[test]
    fn full_score_fills_the_whole_ring() {
        let marks = GaugeSpec::new(100.0).marks(250.0);
        let arc = value_arc(&marks).unwrap();
        let bounds = arc.bounds().unwrap();
        // A full sweep covers the whole outer circle.
        assert!(bounds.width() > 249.0);
        assert!(bounds.height() > 249.0);
    }

    #[test]
    fn half_score_covers_half_the_ring() {
        let marks = GaugeSpec::new(50.0).marks(250.0);
        let arc = value_arc(&marks).unwrap();
        let bounds = arc.bounds().unwrap();
        // From twelve o'clock clockwise by pi: only the right half is swept.
        assert!(bounds.x0 > 124.0);
        assert!(bounds.width() < 126.0);
        assert!(bounds.height() > 249.0);
    }

    #[test]
    fn label_prints_score_out_of_hundred() {
        let marks = GaugeSpec::new(62.0).marks(200.0);
        let label = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(ID_LABEL))
            .unwrap();
        let MarkBody::Text(t) = &label.body else {
            panic!("expected text");
        };
        assert_eq!(t.text, "62/100");
        assert!(t.bold);
        assert_eq!(t.anchor, TextAnchor::Middle);
        assert_eq!(t.baseline, TextBaseline::Middle);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let marks = GaugeSpec::new(250.0).marks(200.0);
        let MarkBody::Text(t) = &marks.last().unwrap().body else {
            panic!("expected text");
        };
        assert_eq!(t.text, "100/100");
    }
}
