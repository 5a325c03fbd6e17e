// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for the returns dashboard.
//!
//! This crate is a small layer above `retviz_scene`:
//! - **Scales** map data values into screen coordinates.
//! - **Guides** (axes, legends) are built by generating `retviz_scene::Mark`s.
//! - **Charts** are a closed union of the four dashboard variants, each
//!   building a complete [`retviz_scene::Frame`] per draw.
//!
//! Every draw rebuilds its frame from scratch; nothing is retained between
//! draws, so drawing twice with the same inputs produces the same frame.
//!
//! Text shaping and layout are out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;

mod axis;
mod bar;
mod chart;
mod curve;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod gauge;
mod layout;
mod legend;
mod measure;
mod pie;
mod scale;
mod trend;
mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, GridStyle, StrokeStyle};
pub use bar::{BarSeries, GroupedBarSpec};
pub use chart::Chart;
pub use curve::{monotone_area, monotone_line};
pub use format::format_tick_with_step;
pub use gauge::GaugeSpec;
pub use layout::{Margins, Size};
pub use legend::{LegendItem, LegendRowSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use pie::{PieSlice, PieSpec};
pub use scale::{ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec, ScaleSpec};
pub use trend::{TrendPoint, TrendSeries, TrendSpec};
pub use z_order::*;
