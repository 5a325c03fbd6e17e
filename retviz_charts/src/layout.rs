// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-margin chart layout.
//!
//! The dashboard charts reserve fixed margins around their plot area rather
//! than measuring guides, so this module is just the margin arithmetic.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-side margins reserved around the plot area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Margin above the plot.
    pub top: f64,
    /// Margin to the right of the plot.
    pub right: f64,
    /// Margin below the plot.
    pub bottom: f64,
    /// Margin to the left of the plot.
    pub left: f64,
}

impl Margins {
    /// Creates margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The plot rectangle inside a view of `size`.
    ///
    /// Collapses to an empty rectangle rather than inverting when the view is
    /// smaller than the margins.
    pub fn plot_rect(&self, size: Size) -> Rect {
        let x1 = (size.width - self.right).max(self.left);
        let y1 = (size.height - self.bottom).max(self.top);
        Rect::new(self.left, self.top, x1, y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_rect_subtracts_margins() {
        let m = Margins::new(40.0, 20.0, 80.0, 50.0);
        let plot = m.plot_rect(Size::new(500.0, 300.0));
        assert_eq!(plot, Rect::new(50.0, 40.0, 480.0, 220.0));
    }

    #[test]
    fn plot_rect_never_inverts() {
        let m = Margins::new(40.0, 20.0, 80.0, 50.0);
        let plot = m.plot_rect(Size::new(30.0, 30.0));
        assert!(plot.width() >= 0.0);
        assert!(plot.height() >= 0.0);
    }
}
