// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Stroke outline expansion.
//!
//! Every stroke subpath is expanded into closed polygons offset by half
//! the stroke width. An open subpath produces one polygon: a cap at the
//! start, the +n side walked forward, a cap at the end and the -n side
//! walked backward. A closed subpath produces two polygons, one per
//! side, whose opposite orientations cut the hole out under the non-zero
//! fill rule.
//!
//! The backward side is produced by running the forward pass over the
//! reversed segment list. That also gives a cusp its second cap (at
//! `-t2`) without special casing.

use alloc::vec::Vec;

use scanfill_path::{Point, Scalar, Transform};

use crate::stroke::{LineCap, LineJoin, Stroke, StrokeDot, StrokeSegment};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use scanfill_path::NoStdFloat;

const FLOAT_PI: f32 = 3.14159265;

// Corners with a smaller turn than this are treated as straight.
const COLLINEARITY_THRESHOLD: f32 = 1e-6;

// Tangents pointing this close to opposite directions mean the path
// doubles back on itself; a join cannot cover the turnaround.
const CUSP_COS_THRESHOLD: f32 = -0.9999;

// Keeps miters at exactly the limit from flickering into bevels.
const MITER_SLACK: f32 = 1e-4;

/// Closed outline polygons, concatenated into one vertex buffer with a
/// parallel list of contour start offsets.
#[derive(Default)]
pub struct Outline {
    points: Vec<Point>,
    contours: Vec<usize>,
}

impl Outline {
    pub fn clear(&mut self) {
        self.points.clear();
        self.contours.clear();
    }

    fn begin_contour(&mut self) {
        self.contours.push(self.points.len());
    }

    /// Discards contours that cannot enclose any area.
    fn end_contour(&mut self) {
        let start = match self.contours.last() {
            Some(start) => *start,
            None => return,
        };

        if self.points.len() - start < 3 {
            self.points.truncate(start);
            self.contours.pop();
        }
    }

    fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Iterates the finished polygons.
    pub fn contours(&self) -> Contours {
        Contours {
            outline: self,
            index: 0,
        }
    }
}

/// An iterator over [`Outline`] polygons.
pub struct Contours<'a> {
    outline: &'a Outline,
    index: usize,
}

impl<'a> Iterator for Contours<'a> {
    type Item = &'a [Point];

    fn next(&mut self) -> Option<Self::Item> {
        let start = *self.outline.contours.get(self.index)?;
        let end = self
            .outline
            .contours
            .get(self.index + 1)
            .copied()
            .unwrap_or(self.outline.points.len());
        self.index += 1;
        Some(&self.outline.points[start..end])
    }
}

/// Expands stroke subpaths into outline polygons.
pub struct Outliner<'a> {
    radius: f32,
    miter_limit: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    ts: Transform,
    flatness: f32,
    outline: &'a mut Outline,
}

impl<'a> Outliner<'a> {
    /// `radius` is half the (validated) stroke width.
    pub fn new(
        radius: f32,
        stroke: &Stroke,
        ts: Transform,
        flatness: f32,
        outline: &'a mut Outline,
    ) -> Self {
        Outliner {
            radius,
            miter_limit: stroke.miter_limit,
            line_cap: stroke.line_cap,
            line_join: stroke.line_join,
            ts,
            flatness,
            outline,
        }
    }

    fn offset(&self, p: Point, n: Point) -> Point {
        p + n.scaled(self.radius)
    }

    /// Expands one subpath.
    pub fn outline_subpath(&mut self, segments: &[StrokeSegment], closed: bool) {
        if segments.is_empty() {
            return;
        }

        if closed {
            let count = segments.len();

            self.outline.begin_contour();
            for i in 0..count {
                let prev = segments[(i + count - 1) % count];
                let curr = segments[i];
                self.add_join(curr.p0, &prev, &curr);
            }
            self.outline.end_contour();

            self.outline.begin_contour();
            for i in 0..count {
                let curr = segments[count - 1 - i].reversed();
                let prev = segments[(count - i) % count].reversed();
                self.add_join(curr.p0, &prev, &curr);
            }
            self.outline.end_contour();
        } else {
            let first = segments[0];
            let last = segments[segments.len() - 1];

            self.outline.begin_contour();

            // The +n side, walked forward.
            self.outline.push(self.offset(first.p0, first.n));
            for i in 1..segments.len() {
                self.add_join(segments[i].p0, &segments[i - 1], &segments[i]);
            }
            self.outline.push(self.offset(last.p1, last.n));

            self.add_cap(last.p1, last.t, last.n);

            // The -n side, walked backward.
            self.outline.push(self.offset(last.p1, -last.n));
            for i in (1..segments.len()).rev() {
                let curr = segments[i - 1].reversed();
                let prev = segments[i].reversed();
                self.add_join(curr.p0, &prev, &curr);
            }
            self.outline.push(self.offset(first.p0, -first.n));

            self.add_cap(first.p0, -first.t, -first.n);

            self.outline.end_contour();
        }
    }

    /// Draws a collapsed subpath as a dot, if the cap style has one.
    pub fn outline_dot(&mut self, dot: &StrokeDot) {
        match self.line_cap {
            LineCap::Butt => {}
            LineCap::Round => {
                self.outline.begin_contour();
                self.arc(dot.pos, Point::from_xy(1.0, 0.0), 2.0 * FLOAT_PI, true);
                self.outline.end_contour();
            }
            LineCap::Square => {
                // A square oriented to the implied tangent, upright when
                // the point carries none.
                let t = dot.tangent.unwrap_or_else(|| Point::from_xy(1.0, 0.0));
                let mut n = t;
                n.rotate_cw();

                self.outline.begin_contour();
                self.outline.push(self.offset(dot.pos, t + n));
                self.outline.push(self.offset(dot.pos, -t + n));
                self.outline.push(self.offset(dot.pos, -t - n));
                self.outline.push(self.offset(dot.pos, t - n));
                self.outline.end_contour();
            }
        }
    }

    /// Handles the corner at `pivot` between two segments of the current
    /// pass. Pushes the end offset of `prev`, the join geometry and the
    /// start offset of `curr`; on the inner side both offsets collapse
    /// into the offset-line intersection.
    fn add_join(&mut self, pivot: Point, prev: &StrokeSegment, curr: &StrokeSegment) {
        let sin_t = prev.t.cross(curr.t);
        let cos_t = prev.t.dot(curr.t);

        if cos_t < CUSP_COS_THRESHOLD {
            // The path folds back on itself; a join cannot cover the
            // turnaround, so cap this side instead.
            self.outline.push(self.offset(pivot, prev.n));
            self.add_cap(pivot, prev.t, prev.n);
            self.outline.push(self.offset(pivot, curr.n));
            return;
        }

        if sin_t.abs() < COLLINEARITY_THRESHOLD {
            self.outline.push(self.offset(pivot, prev.n));
            self.outline.push(self.offset(pivot, curr.n));
            return;
        }

        if sin_t > 0.0 {
            // The turn bends toward this side: it is the inner one.
            self.add_inner_join(pivot, prev.n, curr.n, cos_t);
            return;
        }

        self.outline.push(self.offset(pivot, prev.n));
        match self.line_join {
            LineJoin::Miter => self.add_miter_join(pivot, prev.n, curr.n, cos_t),
            LineJoin::Round => {
                let sweep = -cos_t.bound(-1.0, 1.0).acos();
                self.arc(pivot, prev.n, sweep, false);
            }
            LineJoin::Bevel => {}
        }
        self.outline.push(self.offset(pivot, curr.n));
    }

    /// Replaces the two inner offset points with the intersection of the
    /// inner offset lines, collapsing the "fish tail" inside tight
    /// corners.
    fn add_inner_join(&mut self, pivot: Point, n1: Point, n2: Point, cos_t: f32) {
        let cos_half = ((1.0 + cos_t) * 0.5).max(0.0).sqrt();

        let mut bisector = n1 + n2;
        if cos_half.is_nearly_zero() || !bisector.normalize() {
            self.outline.push(self.offset(pivot, n1));
            self.outline.push(self.offset(pivot, n2));
            return;
        }

        self.outline
            .push(pivot + bisector.scaled(self.radius / cos_half));
    }

    fn add_miter_join(&mut self, pivot: Point, n1: Point, n2: Point, cos_t: f32) {
        // cos(θ/2) equals the sine of the half interior angle; the miter
        // length ratio is its inverse.
        let cos_half = ((1.0 + cos_t) * 0.5).max(0.0).sqrt();
        if cos_half.is_nearly_zero() || cos_half.invert() > self.miter_limit + MITER_SLACK {
            // Too sharp, degrade to a bevel.
            return;
        }

        let mut bisector = n1 + n2;
        if !bisector.normalize() {
            return;
        }

        self.outline
            .push(pivot + bisector.scaled(self.radius / cos_half));
    }

    /// Emits a cap at `pivot` pointing along the outward `tangent`,
    /// connecting the `+normal` offset point to the `-normal` one.
    fn add_cap(&mut self, pivot: Point, tangent: Point, normal: Point) {
        match self.line_cap {
            LineCap::Butt => {}
            LineCap::Square => {
                self.outline.push(self.offset(pivot, normal + tangent));
                self.outline.push(self.offset(pivot, tangent - normal));
            }
            LineCap::Round => {
                self.arc(pivot, normal, -FLOAT_PI, false);
            }
        }
    }

    /// Appends arc vertices around `center` from the unit direction
    /// `start` through the signed `sweep` angle.
    ///
    /// The step angle keeps the sagitta of every chord below the
    /// flatness, measured in device pixels.
    fn arc(&mut self, center: Point, start: Point, sweep: f32, include_start: bool) {
        if include_start {
            self.outline.push(center + start.scaled(self.radius));
        }

        let rx = self.ts.map_vector(Point::from_xy(self.radius, 0.0)).length();
        let ry = self.ts.map_vector(Point::from_xy(0.0, self.radius)).length();
        let dev_radius = rx.max(ry);

        let end = rotated(start, sweep);
        if dev_radius < self.flatness {
            self.outline.push(center + end.scaled(self.radius));
            return;
        }

        let arg = 1.0 - self.flatness / dev_radius;
        let step = if arg > -1.0 && arg < 1.0 {
            2.0 * arg.acos()
        } else {
            FLOAT_PI / 4.0
        };

        let count = ((sweep.abs() / step).ceil() as usize).max(1);
        for i in 1..count {
            let dir = rotated(start, sweep * i as f32 / count as f32);
            self.outline.push(center + dir.scaled(self.radius));
        }
        self.outline.push(center + end.scaled(self.radius));
    }
}

fn rotated(dir: Point, angle: f32) -> Point {
    let (sin, cos) = (angle.sin(), angle.cos());
    Point::from_xy(dir.x * cos - dir.y * sin, dir.x * sin + dir.y * cos)
}
