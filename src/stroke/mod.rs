// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Path stroking.
//!
//! Stroking happens in user space, before the transform is applied,
//! because the stroke width and dash lengths are specified in user
//! units. The pipeline is: flatten the path into straight segments,
//! optionally split them by the dash pattern, then expand every subpath
//! into closed outline polygons which are filled with the non-zero rule.

pub mod dash;
pub mod outline;

use alloc::vec::Vec;

use scanfill_path::{Path, PathSegment, Point, Transform};

use crate::flatten;
use self::dash::StrokeDash;

/// Stroke properties.
#[derive(Clone, PartialEq, Debug)]
pub struct Stroke {
    /// A stroke thickness, in user units.
    ///
    /// Must be > 0.
    ///
    /// Default: 1.0
    pub width: f32,

    /// The limit at which a sharp corner is drawn beveled.
    ///
    /// Must be >= 1.0.
    ///
    /// Default: 10.0
    pub miter_limit: f32,

    /// A stroke line cap.
    ///
    /// Default: Butt
    pub line_cap: LineCap,

    /// A stroke line join.
    ///
    /// Default: Miter
    pub line_join: LineJoin,

    /// A stroke dashing properties.
    ///
    /// Default: None
    pub dash: Option<StrokeDash>,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            width: 1.0,
            miter_limit: 10.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            dash: None,
        }
    }
}

/// Draws at the beginning and end of an open path contour.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineCap {
    /// No stroke extension.
    Butt,
    /// Adds circle.
    Round,
    /// Adds square.
    Square,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

/// Specifies how corners are drawn when a shape is stroked.
///
/// Join affects the four corners of a stroked rectangle, and the connected
/// segments in a stroked path.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineJoin {
    /// Extends to miter limit.
    Miter,
    /// Adds circle.
    Round,
    /// Connects outside edges.
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

// Segments shorter than this have no usable direction.
pub(crate) const ZERO_LENGTH_THRESHOLD: f32 = 1e-10;

/// A straight stroke piece with a precomputed frame.
#[derive(Copy, Clone, Debug)]
pub(crate) struct StrokeSegment {
    pub p0: Point,
    pub p1: Point,
    /// Unit tangent.
    pub t: Point,
    /// Unit normal, the tangent rotated 90 degrees clockwise.
    pub n: Point,
}

impl StrokeSegment {
    /// Returns `None` when the segment is too short to carry a direction.
    pub fn new(p0: Point, p1: Point) -> Option<Self> {
        let d = p1 - p0;
        let len = d.length();
        if !(len > ZERO_LENGTH_THRESHOLD) {
            return None;
        }

        let t = Point::from_xy(d.x / len, d.y / len);
        let mut n = t;
        n.rotate_cw();
        Some(StrokeSegment { p0, p1, t, n })
    }

    pub fn length(&self) -> f32 {
        self.p0.distance(self.p1)
    }

    /// A point `dist` user units from the start along the segment.
    pub fn point_at(&self, dist: f32) -> Point {
        self.p0 + self.t.scaled(dist)
    }

    /// The same segment walked in the opposite direction.
    pub fn reversed(&self) -> StrokeSegment {
        StrokeSegment {
            p0: self.p1,
            p1: self.p0,
            t: -self.t,
            n: -self.n,
        }
    }
}

/// A contour of stroke segments, as a range into the segment arena.
#[derive(Copy, Clone, Debug)]
pub(crate) struct StrokeSubpath {
    pub start: usize,
    pub end: usize,
    pub closed: bool,
}

/// A subpath that collapsed to a single point.
///
/// Round and square caps still draw a dot for these. The tangent, when
/// known, orients a square dot.
#[derive(Copy, Clone, Debug)]
pub(crate) struct StrokeDot {
    pub pos: Point,
    pub tangent: Option<Point>,
}

/// Flattened stroke geometry: a segment arena indexed by subpath ranges,
/// plus the collapsed subpaths kept as bare points.
#[derive(Default)]
pub(crate) struct SegmentStore {
    pub segments: Vec<StrokeSegment>,
    pub subpaths: Vec<StrokeSubpath>,
    pub dots: Vec<StrokeDot>,
}

impl SegmentStore {
    pub fn clear(&mut self) {
        self.segments.clear();
        self.subpaths.clear();
        self.dots.clear();
    }

    pub fn subpath_segments(&self, subpath: &StrokeSubpath) -> &[StrokeSegment] {
        &self.segments[subpath.start..subpath.end]
    }
}

/// Flattens `path` into stroke segments in user space.
///
/// The transform is used only to measure the curve flattening tolerance
/// in device pixels; the produced segments stay in user space.
pub(crate) fn flatten_path(path: &Path, ts: &Transform, flatness: f32, store: &mut SegmentStore) {
    store.clear();

    let mut sub_start = 0; // arena offset of the current subpath
    let mut start_pt = Point::zero();
    let mut last = Point::zero();
    let mut had_command = false;
    let mut in_subpath = false;

    macro_rules! finish_subpath {
        ($closed:expr) => {
            if in_subpath {
                if store.segments.len() > sub_start {
                    store.subpaths.push(StrokeSubpath {
                        start: sub_start,
                        end: store.segments.len(),
                        closed: $closed,
                    });
                } else if had_command || $closed {
                    // The whole subpath collapsed into its starting point.
                    store.dots.push(StrokeDot {
                        pos: start_pt,
                        tangent: None,
                    });
                }
            }
        };
    }

    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                finish_subpath!(false);
                sub_start = store.segments.len();
                start_pt = p;
                last = p;
                had_command = false;
                in_subpath = true;
            }
            PathSegment::LineTo(p) => {
                had_command = true;
                if let Some(seg) = StrokeSegment::new(last, p) {
                    store.segments.push(seg);
                }
                last = p;
            }
            PathSegment::QuadTo(p1, p2) => {
                had_command = true;
                let segments = &mut store.segments;
                let mut prev = last;
                flatten::flatten_quad(last, p1, p2, ts, flatness, &mut |p| {
                    if let Some(seg) = StrokeSegment::new(prev, p) {
                        segments.push(seg);
                    }
                    prev = p;
                });
                last = p2;
            }
            PathSegment::CubicTo(p1, p2, p3) => {
                had_command = true;
                let segments = &mut store.segments;
                let mut prev = last;
                flatten::flatten_cubic(last, p1, p2, p3, ts, flatness, &mut |p| {
                    if let Some(seg) = StrokeSegment::new(prev, p) {
                        segments.push(seg);
                    }
                    prev = p;
                });
                last = p3;
            }
            PathSegment::Close => {
                if let Some(seg) = StrokeSegment::new(last, start_pt) {
                    store.segments.push(seg);
                }
                finish_subpath!(true);
                in_subpath = false;
                last = start_pt;
            }
        }
    }

    finish_subpath!(false);
}
