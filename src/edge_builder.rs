// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use arrayref::array_ref;

use scanfill_path::{IntRect, Path, PathVerb, Point, SaturateRound, Transform};

use crate::edge::Edge;
use crate::flatten;

/// Collects device-space edges from paths and polygons.
///
/// Walks the source geometry in user space, flattens curves under a
/// device-aware tolerance and transforms every emitted segment by the
/// full transform. Also tracks the device-space bounding box of
/// everything it has seen.
///
/// The edge storage is borrowed from the caller, so one allocation can
/// serve many rasterization calls.
pub struct EdgeBuilder<'a> {
    edges: &'a mut Vec<Edge>,
    ts: Transform,
    flatness: f32,

    min: Point,
    max: Point,
}

impl<'a> EdgeBuilder<'a> {
    /// Creates a builder writing into `edges`. The vector is cleared.
    pub fn new(edges: &'a mut Vec<Edge>, ts: Transform, flatness: f32) -> Self {
        edges.clear();
        EdgeBuilder {
            edges,
            ts,
            flatness,
            min: Point::from_xy(f32::MAX, f32::MAX),
            max: Point::from_xy(f32::MIN, f32::MIN),
        }
    }

    /// Appends all contours of `path`.
    pub fn add_path(&mut self, path: &Path) {
        let points = path.points();
        let mut pi = 0; // index of the next unread point

        let mut last = Point::zero();
        let mut start = Point::zero();
        for verb in path.verbs() {
            match verb {
                PathVerb::Move => {
                    last = points[pi];
                    start = last;
                    pi += 1;
                }
                PathVerb::Line => {
                    let p = points[pi];
                    pi += 1;
                    self.push_edge(last, p);
                    last = p;
                }
                PathVerb::Quad => {
                    let [p1, p2] = *array_ref![points, pi, 2];
                    pi += 2;
                    self.push_quad(last, p1, p2);
                    last = p2;
                }
                PathVerb::Cubic => {
                    let [p1, p2, p3] = *array_ref![points, pi, 3];
                    pi += 3;
                    self.push_cubic(last, p1, p2, p3);
                    last = p3;
                }
                PathVerb::Close => {
                    if last != start {
                        self.push_edge(last, start);
                    }
                    last = start;
                }
            }
        }
    }

    /// Appends a closed polygon.
    pub fn add_polygon(&mut self, points: &[Point]) {
        if points.len() < 3 {
            return;
        }

        let mut last = points[0];
        for &p in &points[1..] {
            self.push_edge(last, p);
            last = p;
        }
        self.push_edge(last, points[0]);
    }

    fn push_quad(&mut self, p0: Point, p1: Point, p2: Point) {
        let ts = self.ts;
        let flatness = self.flatness;
        let edges = &mut *self.edges;
        let min = &mut self.min;
        let max = &mut self.max;

        let mut last = p0;
        flatten::flatten_quad(p0, p1, p2, &ts, flatness, &mut |p| {
            Self::push_edge_raw(edges, min, max, &ts, last, p);
            last = p;
        });
    }

    fn push_cubic(&mut self, p0: Point, p1: Point, p2: Point, p3: Point) {
        let ts = self.ts;
        let flatness = self.flatness;
        let edges = &mut *self.edges;
        let min = &mut self.min;
        let max = &mut self.max;

        let mut last = p0;
        flatten::flatten_cubic(p0, p1, p2, p3, &ts, flatness, &mut |p| {
            Self::push_edge_raw(edges, min, max, &ts, last, p);
            last = p;
        });
    }

    fn push_edge(&mut self, p0: Point, p1: Point) {
        Self::push_edge_raw(self.edges, &mut self.min, &mut self.max, &self.ts, p0, p1);
    }

    fn push_edge_raw(
        edges: &mut Vec<Edge>,
        min: &mut Point,
        max: &mut Point,
        ts: &Transform,
        p0: Point,
        p1: Point,
    ) {
        let d0 = ts.map_point(p0);
        let d1 = ts.map_point(p1);

        min.x = min.x.min(d0.x).min(d1.x);
        min.y = min.y.min(d0.y).min(d1.y);
        max.x = max.x.max(d0.x).max(d1.x);
        max.y = max.y.max(d0.y).max(d1.y);

        if let Some(edge) = Edge::new(d0, d1) {
            edges.push(edge);
        }
    }

    /// Finishes the walk and returns the rasterization bounds.
    ///
    /// The device bounding box is snapped outwards to the pixel grid and
    /// intersected with `clip`. Returns `None` when no edges survived or
    /// the clipped region is empty.
    pub fn finish(self, clip: &IntRect) -> Option<IntRect> {
        if self.edges.is_empty() {
            return None;
        }

        let bounds = IntRect::from_ltrb(
            i32::saturate_floor(self.min.x),
            i32::saturate_floor(self.min.y),
            i32::saturate_floor(self.max.x) + 1,
            i32::saturate_floor(self.max.y) + 1,
        )?;

        bounds.intersect(clip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanfill_path::PathBuilder;

    fn clip() -> IntRect {
        IntRect::from_xywh(0, 0, 100, 100).unwrap()
    }

    #[test]
    fn rect_path() {
        let mut pb = PathBuilder::new();
        pb.push_rect(2.0, 2.0, 6.0, 4.0);
        let path = pb.finish().unwrap();

        let mut edges = Vec::new();
        let mut builder = EdgeBuilder::new(&mut edges, Transform::identity(), 0.25);
        builder.add_path(&path);
        let bounds = builder.finish(&clip()).unwrap();

        // Two horizontal edges are discarded.
        assert_eq!(edges.len(), 2);
        assert_eq!(bounds, IntRect::from_ltrb(2, 2, 9, 7).unwrap());
    }

    #[test]
    fn unclosed_contour_is_closed_by_close_verb() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(10.0, 0.0);
        pb.line_to(10.0, 10.0);
        pb.close();
        let path = pb.finish().unwrap();

        let mut edges = Vec::new();
        let mut builder = EdgeBuilder::new(&mut edges, Transform::identity(), 0.25);
        builder.add_path(&path);
        builder.finish(&clip()).unwrap();

        // The vertical edge and the closing diagonal.
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn horizontal_only_path_is_empty() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 5.0);
        pb.line_to(50.0, 5.0);
        let path = pb.finish().unwrap();

        let mut edges = Vec::new();
        let mut builder = EdgeBuilder::new(&mut edges, Transform::identity(), 0.25);
        builder.add_path(&path);
        assert!(builder.finish(&clip()).is_none());
    }

    #[test]
    fn bounds_clamped_to_clip() {
        let mut pb = PathBuilder::new();
        pb.push_rect(-10.0, -10.0, 200.0, 200.0);
        let path = pb.finish().unwrap();

        let mut edges = Vec::new();
        let mut builder = EdgeBuilder::new(&mut edges, Transform::identity(), 0.25);
        builder.add_path(&path);
        let bounds = builder.finish(&clip()).unwrap();
        assert_eq!(bounds, clip());
    }

    #[test]
    fn transform_is_applied() {
        let mut pb = PathBuilder::new();
        pb.push_rect(1.0, 1.0, 2.0, 2.0);
        let path = pb.finish().unwrap();

        let mut edges = Vec::new();
        let mut builder = EdgeBuilder::new(&mut edges, Transform::from_scale(10.0, 10.0), 0.25);
        builder.add_path(&path);
        let bounds = builder.finish(&clip()).unwrap();
        assert_eq!(bounds, IntRect::from_ltrb(10, 10, 31, 31).unwrap());
    }

    #[test]
    fn empty_clip_intersection() {
        let mut pb = PathBuilder::new();
        pb.push_rect(200.0, 200.0, 10.0, 10.0);
        let path = pb.finish().unwrap();

        let mut edges = Vec::new();
        let mut builder = EdgeBuilder::new(&mut edges, Transform::identity(), 0.25);
        builder.add_path(&path);
        assert!(builder.finish(&clip()).is_none());
    }
}
