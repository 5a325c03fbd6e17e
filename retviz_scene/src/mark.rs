// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;

/// Stable identity for a mark across redraws.
///
/// Ids are assigned by chart builders from per-chart namespaces, so the same
/// logical element (say, the second bar of the first series) keeps the same id
/// on every redraw. Backends may use this for correlation; the frame model
/// itself only uses ids as a deterministic tie-break within a `z_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(u64);

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Horizontal text alignment relative to the mark position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Vertical text alignment relative to the mark position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The alphabetic baseline sits on the position.
    #[default]
    Alphabetic,
    /// Text is vertically centered on the position.
    Middle,
    /// The top of the text hangs from the position.
    Hanging,
}

/// An axis-aligned filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle in frame coordinates.
    pub rect: Rect,
    /// Fill brush.
    pub fill: Brush,
}

/// A filled and/or stroked path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Path in frame coordinates.
    pub path: BezPath,
    /// Fill brush, if the path is filled.
    pub fill: Option<Brush>,
    /// Stroke brush, if the path is stroked.
    pub stroke: Option<Brush>,
    /// Stroke width in frame units.
    pub stroke_width: f64,
    /// Hover text attached to the path, if any.
    pub tooltip: Option<String>,
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in frame coordinates.
    pub pos: Point,
    /// The text to draw.
    pub text: String,
    /// Font size in frame units.
    pub font_size: f64,
    /// Fill brush.
    pub fill: Brush,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Rotation about the anchor position, in degrees clockwise.
    pub angle: f64,
    /// Whether the text is drawn bold.
    pub bold: bool,
}

/// The drawable body of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkBody {
    /// An axis-aligned filled rectangle.
    Rect(RectMark),
    /// A filled and/or stroked path.
    Path(PathMark),
    /// An unshaped text run.
    Text(TextMark),
}

/// A fully resolved drawing primitive.
///
/// Marks within a [`crate::Frame`] paint in ascending `(z_index, id)` order.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity across redraws.
    pub id: MarkId,
    /// Paint-order layer; higher paints later.
    pub z_index: i32,
    /// The drawable body.
    pub body: MarkBody,
}

impl Mark {
    /// Creates a filled rectangle mark at `z_index` 0.
    pub fn rect(id: MarkId, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self {
            id,
            z_index: 0,
            body: MarkBody::Rect(RectMark {
                rect,
                fill: fill.into(),
            }),
        }
    }

    /// Creates a path mark at `z_index` 0 with no fill, stroke, or tooltip.
    pub fn path(id: MarkId, path: BezPath) -> Self {
        Self {
            id,
            z_index: 0,
            body: MarkBody::Path(PathMark {
                path,
                fill: None,
                stroke: None,
                stroke_width: 1.0,
                tooltip: None,
            }),
        }
    }

    /// Creates a text mark at `z_index` 0 with default alignment.
    pub fn text(id: MarkId, pos: Point, text: impl Into<String>, fill: impl Into<Brush>) -> Self {
        Self {
            id,
            z_index: 0,
            body: MarkBody::Text(TextMark {
                pos,
                text: text.into(),
                font_size: 12.0,
                fill: fill.into(),
                anchor: TextAnchor::default(),
                baseline: TextBaseline::default(),
                angle: 0.0,
                bold: false,
            }),
        }
    }

    /// Sets the paint-order layer.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the fill brush on a path body.
    ///
    /// No effect on rect and text bodies, which always have a fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        if let MarkBody::Path(path) = &mut self.body {
            path.fill = Some(fill.into());
        }
        self
    }

    /// Sets the stroke brush and width on a path body.
    ///
    /// No effect on rect and text bodies.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        if let MarkBody::Path(path) = &mut self.body {
            path.stroke = Some(stroke.into());
            path.stroke_width = width;
        }
        self
    }

    /// Attaches hover text to a path body.
    ///
    /// No effect on rect and text bodies.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        if let MarkBody::Path(path) = &mut self.body {
            path.tooltip = Some(tooltip.into());
        }
        self
    }

    /// Sets alignment on a text body.
    ///
    /// No effect on rect and path bodies.
    pub fn with_alignment(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        if let MarkBody::Text(text) = &mut self.body {
            text.anchor = anchor;
            text.baseline = baseline;
        }
        self
    }

    /// Sets the font size on a text body.
    ///
    /// No effect on rect and path bodies.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        if let MarkBody::Text(text) = &mut self.body {
            text.font_size = font_size;
        }
        self
    }

    /// Sets rotation (degrees clockwise about the anchor) on a text body.
    ///
    /// No effect on rect and path bodies.
    pub fn with_angle(mut self, angle: f64) -> Self {
        if let MarkBody::Text(text) = &mut self.body {
            text.angle = angle;
        }
        self
    }

    /// Makes a text body bold.
    ///
    /// No effect on rect and path bodies.
    pub fn with_bold(mut self) -> Self {
        if let MarkBody::Text(text) = &mut self.body {
            text.bold = true;
        }
        self
    }

    /// Returns the geometric bounds of the mark, if it has any.
    ///
    /// Text marks return `None`: bounds depend on shaping, which this crate
    /// does not do.
    pub fn bounds(&self) -> Option<Rect> {
        match &self.body {
            MarkBody::Rect(rect) => Some(rect.rect),
            MarkBody::Path(path) => Some(path.path.bounding_box()),
            MarkBody::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::Color;

    #[test]
    fn builders_target_matching_bodies() {
        let rect = Mark::rect(
            MarkId::from_raw(1),
            Rect::new(0.0, 0.0, 10.0, 5.0),
            Color::BLACK,
        )
        .with_tooltip("ignored");
        match rect.body {
            MarkBody::Rect(_) => {}
            _ => panic!("expected rect body"),
        }

        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((4.0, 4.0));
        let path = Mark::path(MarkId::from_raw(2), path)
            .with_stroke(Color::BLACK, 2.0)
            .with_tooltip("hover");
        match path.body {
            MarkBody::Path(body) => {
                assert_eq!(body.stroke_width, 2.0);
                assert_eq!(body.tooltip.as_deref(), Some("hover"));
                assert!(body.fill.is_none());
            }
            _ => panic!("expected path body"),
        }
    }

    #[test]
    fn bounds_cover_geometry_only() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        let mark = Mark::rect(MarkId::from_raw(1), rect, Color::BLACK);
        assert_eq!(mark.bounds(), Some(rect));

        let text = Mark::text(MarkId::from_raw(2), Point::new(0.0, 0.0), "x", Color::BLACK);
        assert_eq!(text.bounds(), None);
    }
}
