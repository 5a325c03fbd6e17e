// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart sizing rules against a container box.

use retviz_charts::Size;

/// Sizing for wide charts: full container width less a fixed allowance,
/// floored at a minimum, with height derived from the resolved width.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WideSizer {
    /// Horizontal allowance subtracted from the container width.
    pub(crate) pad: f64,
    /// Width floor.
    pub(crate) min_width: f64,
    /// Height as a fraction of the resolved width.
    pub(crate) aspect: f64,
    /// Height ceiling.
    pub(crate) max_height: f64,
}

impl WideSizer {
    pub(crate) fn resolve(&self, container: Size) -> Size {
        let width = (container.width - self.pad).max(self.min_width);
        let height = (width * self.aspect).min(self.max_height);
        Size::new(width, height)
    }
}

/// Sizing for charts with a fixed height: wide-style width resolution, but
/// the height never follows the container.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FixedHeightSizer {
    /// Horizontal allowance subtracted from the container width.
    pub(crate) pad: f64,
    /// Width floor.
    pub(crate) min_width: f64,
    /// Constant height.
    pub(crate) height: f64,
}

impl FixedHeightSizer {
    pub(crate) fn resolve(&self, container: Size) -> Size {
        let width = (container.width - self.pad).max(self.min_width);
        Size::new(width, self.height)
    }
}

/// Sizing for square charts: the largest square that fits the container,
/// capped at a fixed side.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SquareSizer {
    pub(crate) cap: f64,
}

impl SquareSizer {
    pub(crate) fn resolve(&self, container: Size) -> Size {
        let side = container.width.min(container.height).min(self.cap);
        Size::new(side, side)
    }
}

/// How a chart sizes itself within its container.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ChartSizer {
    Wide(WideSizer),
    FixedHeight(FixedHeightSizer),
    Square(SquareSizer),
}

impl ChartSizer {
    /// Dashboard default for the wide bar and trend charts.
    pub(crate) fn wide() -> Self {
        Self::Wide(WideSizer {
            pad: 60.0,
            min_width: 300.0,
            aspect: 0.6,
            max_height: 350.0,
        })
    }

    /// Dashboard default for the category donut.
    pub(crate) fn donut() -> Self {
        Self::FixedHeight(FixedHeightSizer {
            pad: 60.0,
            min_width: 300.0,
            height: 240.0,
        })
    }

    /// Dashboard default for the score gauge.
    pub(crate) fn square() -> Self {
        Self::Square(SquareSizer { cap: 250.0 })
    }

    pub(crate) fn resolve(&self, container: Size) -> Size {
        match self {
            Self::Wide(sizer) => sizer.resolve(container),
            Self::FixedHeight(sizer) => sizer.resolve(container),
            Self::Square(sizer) => sizer.resolve(container),
        }
    }
}
