// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a [`Frame`] to a standalone SVG document.

use kurbo::Rect;
use peniko::{Brush, Gradient, GradientKind};
use retviz_charts::TextMeasurer;
use retviz_scene::{Frame, Mark, MarkBody, TextAnchor, TextBaseline};

/// Serializes `frame` to SVG text.
///
/// Marks are already in paint order inside the frame. The view box is the
/// frame's view, widened if any mark (rotated labels in particular) spills
/// past it.
pub(crate) fn frame_to_svg(frame: &Frame, measurer: &dyn TextMeasurer) -> String {
    let view_box = union_rects(frame.view(), content_bounds(frame, measurer));
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    ));
    out.push('\n');

    write_gradient_defs(&mut out, frame);

    for mark in frame.marks() {
        match &mark.body {
            MarkBody::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", Some(&r.fill), mark);
                out.push_str("/>\n");
            }
            MarkBody::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                ));
                if t.angle != 0.0 {
                    out.push_str(&format!(
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    ));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                if t.bold {
                    out.push_str(r#" font-weight="bold""#);
                }
                write_paint_attr(&mut out, "fill", Some(&t.fill), mark);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
            MarkBody::Path(p) => {
                let d = p.path.to_svg();
                out.push_str(&format!(r#"<path d="{d}""#));
                write_paint_attr(&mut out, "fill", p.fill.as_ref(), mark);
                if p.stroke_width > 0.0 && p.stroke.is_some() {
                    write_paint_attr(&mut out, "stroke", p.stroke.as_ref(), mark);
                    out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                }
                match &p.tooltip {
                    Some(tip) => {
                        out.push_str("><title>");
                        out.push_str(&escape_xml(tip));
                        out.push_str("</title></path>\n");
                    }
                    None => out.push_str("/>\n"),
                }
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn gradient_id(mark: &Mark) -> String {
    format!("grad{}", mark.id.raw())
}

/// Emits one `<linearGradient>` per gradient-filled mark, keyed by mark id.
fn write_gradient_defs(out: &mut String, frame: &Frame) {
    let gradients: Vec<(&Mark, &Gradient)> = frame
        .marks()
        .iter()
        .filter_map(|mark| match &mark.body {
            MarkBody::Path(p) => match &p.fill {
                Some(Brush::Gradient(g)) => Some((mark, g)),
                _ => None,
            },
            MarkBody::Rect(r) => match &r.fill {
                Brush::Gradient(g) => Some((mark, g)),
                _ => None,
            },
            MarkBody::Text(_) => None,
        })
        .collect();
    if gradients.is_empty() {
        return;
    }

    out.push_str("<defs>\n");
    for (mark, gradient) in gradients {
        let GradientKind::Linear(position) = gradient.kind else {
            // Only linear fades are produced by the charts.
            continue;
        };
        out.push_str(&format!(
            r#"<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
            gradient_id(mark),
            position.start.x,
            position.start.y,
            position.end.x,
            position.end.y
        ));
        out.push('\n');
        for stop in gradient.stops.iter() {
            let rgba = stop
                .color
                .to_alpha_color::<peniko::color::Srgb>()
                .to_rgba8();
            out.push_str(&format!(
                r##"<stop offset="{}" stop-color="#{:02x}{:02x}{:02x}" stop-opacity="{}"/>"##,
                stop.offset,
                rgba.r,
                rgba.g,
                rgba.b,
                f64::from(rgba.a) / 255.0
            ));
            out.push('\n');
        }
        out.push_str("</linearGradient>\n");
    }
    out.push_str("</defs>\n");
}

fn svg_paint(brush: &Brush, mark: &Mark) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        Brush::Gradient(_) => (format!("url(#{})", gradient_id(mark)), None),
        Brush::Image(_) => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: Option<&Brush>, mark: &Mark) {
    let (value, opacity) = match brush {
        Some(brush) => svg_paint(brush, mark),
        None => ("none".to_string(), None),
    };
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn content_bounds(frame: &Frame, measurer: &dyn TextMeasurer) -> Option<Rect> {
    let mut bounds: Option<Rect> = None;
    for mark in frame.marks() {
        let b = match &mark.body {
            MarkBody::Text(t) => {
                let (width, height) = measurer.measure(&t.text, t.font_size);
                text_bounds(t.pos.x, t.pos.y, width, height, t.anchor, t.baseline)
            }
            _ => match mark.bounds() {
                Some(b) => b,
                None => continue,
            },
        };
        bounds = Some(match bounds {
            None => b,
            Some(r) => union_rects(r, Some(b)),
        });
    }
    bounds
}

fn text_bounds(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
) -> Rect {
    // Rough ascent/descent split, good enough for view box sizing.
    let y_mid = match baseline {
        TextBaseline::Middle => y,
        TextBaseline::Alphabetic => y - 0.3 * height,
        TextBaseline::Hanging => y + 0.3 * height,
    };
    let (x0, x1) = match anchor {
        TextAnchor::Start => (x, x + width),
        TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
        TextAnchor::End => (x - width, x),
    };
    Rect::new(x0, y_mid - height / 2.0, x1, y_mid + height / 2.0)
}

fn union_rects(a: Rect, b: Option<Rect>) -> Rect {
    match b {
        Some(b) => Rect::new(
            a.x0.min(b.x0),
            a.y0.min(b.y0),
            a.x1.max(b.x1),
            a.y1.max(b.y1),
        ),
        None => a,
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
