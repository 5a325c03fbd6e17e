// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of dashboard chart kinds.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use retviz_scene::{Frame, Mark};

use crate::bar::GroupedBarSpec;
use crate::gauge::GaugeSpec;
use crate::layout::Size;
use crate::measure::TextMeasurer;
use crate::pie::PieSpec;
use crate::trend::TrendSpec;

/// A renderable chart.
///
/// The set is closed on purpose: the dashboard host matches on it
/// exhaustively, so adding a kind is a compile-visible change everywhere a
/// chart is routed.
#[derive(Clone, Debug)]
pub enum Chart {
    /// Two-series grouped bars over categories.
    GroupedBar(GroupedBarSpec),
    /// Single-value score donut.
    Gauge(GaugeSpec),
    /// Category share donut with a count in the hole.
    Pie(PieSpec),
    /// Multi-series monotone trend lines with area fills.
    Trend(TrendSpec),
}

impl Chart {
    /// Renders the chart into a fresh frame for a view of `size`.
    ///
    /// Every call rebuilds the full mark set from the spec alone, so drawing
    /// twice with the same inputs yields identical frames and switching specs
    /// leaves nothing behind from the previous draw.
    pub fn draw(&self, size: Size, measurer: &dyn TextMeasurer) -> Frame {
        let marks: Vec<Mark> = match self {
            Self::GroupedBar(spec) => spec.marks(size, measurer),
            Self::Gauge(spec) => spec.marks(size.width.min(size.height)),
            Self::Pie(spec) => spec.marks(size, measurer),
            Self::Trend(spec) => spec.marks(size, measurer),
        };
        Frame::from_marks(Rect::new(0.0, 0.0, size.width, size.height), marks)
    }
}

impl From<GroupedBarSpec> for Chart {
    fn from(spec: GroupedBarSpec) -> Self {
        Self::GroupedBar(spec)
    }
}

impl From<GaugeSpec> for Chart {
    fn from(spec: GaugeSpec) -> Self {
        Self::Gauge(spec)
    }
}

impl From<PieSpec> for Chart {
    fn from(spec: PieSpec) -> Self {
        Self::Pie(spec)
    }
}

impl From<TrendSpec> for Chart {
    fn from(spec: TrendSpec) -> Self {
        Self::Trend(spec)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use peniko::Color;

    use super::*;
    use crate::bar::BarSeries;
    use crate::measure::HeuristicTextMeasurer;
    use crate::pie::PieSlice;
    use crate::trend::{TrendPoint, TrendSeries};

    fn trend() -> Chart {
        Chart::Trend(TrendSpec::new(
            vec![TrendSeries::new(
                "Recycle",
                Color::from_rgb8(0x8B, 0x5C, 0xF6),
                vec![TrendPoint::new(0.0, 30.0), TrendPoint::new(31.0, 60.0)],
            )],
            (-5.0, 36.0),
        ))
    }

    #[test]
    fn drawing_twice_yields_identical_frames() {
        let chart = trend();
        let size = Size::new(600.0, 300.0);
        let a = chart.draw(size, &HeuristicTextMeasurer);
        let b = chart.draw(size, &HeuristicTextMeasurer);
        assert_eq!(a.marks(), b.marks());
        assert_eq!(a.view(), b.view());
    }

    #[test]
    fn switching_charts_leaves_no_residual_marks() {
        let size = Size::new(400.0, 400.0);
        let bar = Chart::GroupedBar(GroupedBarSpec::new(
            vec!["Recycled".to_string()],
            BarSeries::new("A", Color::from_rgb8(0x7C, 0xB3, 0x42), vec![70.0]),
            BarSeries::new("B", Color::from_rgb8(0xA9, 0xA9, 0xA9), vec![40.0]),
        ));
        let bar_frame = bar.draw(size, &HeuristicTextMeasurer);
        let gauge_frame = Chart::Gauge(GaugeSpec::new(80.0)).draw(size, &HeuristicTextMeasurer);

        // The gauge frame contains only gauge marks, none of the bar ids.
        for mark in gauge_frame.marks() {
            assert!(mark.id.raw() < 100);
        }
        assert!(bar_frame.len() > gauge_frame.len());
    }

    #[test]
    fn a_pie_spec_routes_through_the_union() {
        let chart: Chart = PieSpec::new(vec![PieSlice::new(
            "Resell",
            Color::from_rgb8(0x3B, 0x82, 0xF6),
            4.0,
        )])
        .into();
        let frame = chart.draw(Size::new(400.0, 240.0), &HeuristicTextMeasurer);
        assert!(!frame.is_empty());
    }

    #[test]
    fn view_matches_the_requested_size() {
        let frame = trend().draw(Size::new(520.0, 280.0), &HeuristicTextMeasurer);
        assert_eq!(frame.view(), Rect::new(0.0, 0.0, 520.0, 280.0));
    }
}
