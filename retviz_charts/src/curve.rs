// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotone cubic interpolation.
//!
//! Produces a cubic spline through the input points that preserves local
//! monotonicity (Fritsch–Carlson tangents), so an interpolated percentage
//! series never overshoots its data. Tangents follow the same construction
//! as d3's `curveMonotoneX`, with bezier control points a third of the way
//! along each segment.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point};

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

fn secant(dy: f64, h: f64, other_h: f64) -> f64 {
    if h != 0.0 {
        dy / h
    } else if other_h < 0.0 {
        dy / -0.0
    } else {
        dy / 0.0
    }
}

/// Tangent at the middle point of three consecutive points.
fn slope3(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = secant(p1.y - p0.y, h0, h1);
    let s1 = secant(p2.y - p1.y, h1, h0);
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let m = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if m.is_finite() { m } else { 0.0 }
}

/// One-sided tangent at an endpoint, given the tangent at its neighbor.
fn slope2(p0: Point, p1: Point, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h != 0.0 { (3.0 * (p1.y - p0.y) / h - t) / 2.0 } else { t }
}

fn tangents(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    let mut t = alloc::vec![0.0; n];
    for i in 1..n - 1 {
        t[i] = slope3(points[i - 1], points[i], points[i + 1]);
    }
    t[0] = slope2(points[0], points[1], t[1]);
    t[n - 1] = slope2(points[n - 2], points[n - 1], t[n - 2]);
    t
}

fn segment(path: &mut BezPath, p0: Point, p1: Point, t0: f64, t1: f64) {
    let dx = (p1.x - p0.x) / 3.0;
    path.curve_to(
        (p0.x + dx, p0.y + dx * t0),
        (p1.x - dx, p1.y - dx * t1),
        (p1.x, p1.y),
    );
}

/// Builds an open monotone-cubic path through `points`.
///
/// Returns an empty path for fewer than two points and a straight line for
/// exactly two. Points are assumed sorted by x.
pub fn monotone_line(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    match points {
        [] | [_] => return path,
        [a, b] => {
            path.move_to(*a);
            path.line_to(*b);
            return path;
        }
        _ => {}
    }

    let t = tangents(points);
    path.move_to(points[0]);
    for i in 0..points.len() - 1 {
        segment(&mut path, points[i], points[i + 1], t[i], t[i + 1]);
    }
    path
}

/// Builds a closed region between the monotone-cubic curve and a horizontal
/// baseline, suitable for gradient-filled area marks.
pub fn monotone_area(points: &[Point], baseline_y: f64) -> BezPath {
    let mut path = monotone_line(points);
    if path.elements().is_empty() {
        return path;
    }
    let first = points[0];
    let last = points[points.len() - 1];
    path.line_to((last.x, baseline_y));
    path.line_to((first.x, baseline_y));
    path.close_path();
    path
}
