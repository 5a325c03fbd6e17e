// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved vector marks and frames for the returns dashboard charts.
//!
//! This crate is the output model of the chart layer:
//! - A [`Mark`] is a fully resolved drawing primitive (rect, path, or text)
//!   carrying a stable [`MarkId`] and a paint-order `z_index`.
//! - A [`Frame`] is one complete redraw: the set of marks that should be on
//!   screen, replacing whatever was there before.
//!
//! Chart builders emit a `Frame` per draw; backends (an SVG writer, a canvas
//! painter) consume it in paint order. Stable ids let a backend correlate
//! marks across redraws if it wants to, but the frame model itself is
//! full-replace: no diffing, no retained state.
//!
//! Text shaping is out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;

mod frame;
mod mark;

pub use frame::Frame;
pub use mark::{
    Mark, MarkBody, MarkId, PathMark, RectMark, TextAnchor, TextBaseline, TextMark,
};
