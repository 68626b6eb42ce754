// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Adaptive Bezier flattening.
//!
//! Curves are approximated by polylines whose deviation from the true
//! curve stays below the configured flatness, measured in device pixels.
//! The segment count is derived from the curve's second differences
//! mapped through the linear part of the transform, so a scaled-up path
//! automatically gets proportionally more segments.

use scanfill_path::{Point, Transform};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use scanfill_path::NoStdFloat;

/// Flattens a quadratic Bezier curve into line segments.
///
/// Emits the polyline vertices at `t = i/n` for `i = 1..=n`.
/// The start point `p0` is not emitted.
pub fn flatten_quad(
    p0: Point,
    p1: Point,
    p2: Point,
    ts: &Transform,
    flatness: f32,
    emit: &mut dyn FnMut(Point),
) {
    // Worst-case deviation of the chord from the curve.
    let e = Point::from_xy(
        (p0.x - 2.0 * p1.x + p2.x) * 0.25,
        (p0.y - 2.0 * p1.y + p2.y) * 0.25,
    );
    let dev = ts.map_vector(e).length();
    let n = segment_count((dev / flatness).sqrt());

    let step = 1.0 / n as f32;
    for i in 1..=n {
        let t = i as f32 * step;
        emit(eval_quad(p0, p1, p2, t));
    }
}

/// Flattens a cubic Bezier curve into line segments.
///
/// Uses Wang's formula for the segment count.
/// Emits the polyline vertices at `t = i/n` for `i = 1..=n`.
pub fn flatten_cubic(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    ts: &Transform,
    flatness: f32,
    emit: &mut dyn FnMut(Point),
) {
    let d1 = Point::from_xy(p0.x - 2.0 * p1.x + p2.x, p0.y - 2.0 * p1.y + p2.y);
    let d2 = Point::from_xy(p1.x - 2.0 * p2.x + p3.x, p1.y - 2.0 * p2.y + p3.y);
    let dev = ts.map_vector(d1).length().max(ts.map_vector(d2).length());
    let n = segment_count((3.0 * dev / (4.0 * flatness)).sqrt());

    let step = 1.0 / n as f32;
    for i in 1..=n {
        let t = i as f32 * step;
        emit(eval_cubic(p0, p1, p2, p3, t));
    }
}

fn segment_count(n: f32) -> usize {
    if n.is_finite() {
        (n.ceil() as usize).max(1)
    } else {
        1
    }
}

fn eval_quad(p0: Point, p1: Point, p2: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u;
    let b = 2.0 * u * t;
    let c = t * t;
    Point::from_xy(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

fn eval_cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Point::from_xy(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}
