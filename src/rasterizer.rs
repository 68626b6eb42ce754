// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use scanfill_path::{IntRect, NonZeroPositiveF32, Path, Scalar, Transform};

use crate::edge::Edge;
use crate::edge_builder::EdgeBuilder;
use crate::scan::{self, ScanBuffers};
use crate::stroke::outline::{Outline, Outliner};
use crate::stroke::{self, SegmentStore, Stroke};

/// A path filling rule.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FillRule {
    /// Specifies that "inside" is computed by a non-zero sum of signed edge crossings.
    Winding,
    /// Specifies that "inside" is computed by an odd number of edge crossings.
    EvenOdd,
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::Winding
    }
}

/// Receives finished coverage rows.
///
/// The rasterizer calls [`blit_span`] once for every row that has any
/// non-zero coverage, in strictly increasing `y` order. The slice is
/// borrowed for the duration of the call only.
///
/// [`blit_span`]: Self::blit_span
pub trait CoverageSink {
    /// Handles one row of coverage.
    ///
    /// `x` is the device column of `coverage[0]`. All values are in the
    /// 0..=1 range. Return `false` to abort the current rasterization;
    /// the abort is reported by the rasterizer's return value.
    fn blit_span(&mut self, y: i32, x: i32, coverage: &[f32]) -> bool;
}

/// An anti-aliased path rasterizer.
///
/// Converts paths into per-pixel coverage, delivered row by row to a
/// [`CoverageSink`]. All scratch memory is owned by the instance and
/// reused between calls, so steady-state rasterization does not
/// allocate.
///
/// A `Rasterizer` is not meant to be shared between threads. Use one
/// instance per thread.
#[allow(missing_debug_implementations)]
pub struct Rasterizer {
    /// Curve flattening tolerance in device pixels.
    ///
    /// Must be > 0. Default: 0.25
    pub flatness: f32,

    /// Bounding box area, in pixels, below which the buffered small-path
    /// back-end is used instead of the scanline one.
    ///
    /// Default: 65536
    pub small_path_threshold: u32,

    edges: Vec<Edge>,
    buffers: ScanBuffers,
    flattened: SegmentStore,
    dashed: SegmentStore,
    outline: Outline,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Rasterizer::new()
    }
}

impl Rasterizer {
    /// Creates a new rasterizer with default settings.
    pub fn new() -> Self {
        Rasterizer {
            flatness: 0.25,
            small_path_threshold: 65536,
            edges: Vec::new(),
            buffers: ScanBuffers::default(),
            flattened: SegmentStore::default(),
            dashed: SegmentStore::default(),
            outline: Outline::default(),
        }
    }

    /// Fills `path` and emits its coverage into `sink`.
    ///
    /// `transform` maps user space to device space; an all-zero transform
    /// counts as "not set" and the identity is used. Output is limited to
    /// `clip`.
    ///
    /// An empty or degenerate path completes successfully without
    /// emitting anything. Returns `None` only when the sink aborted.
    pub fn fill_path(
        &mut self,
        path: &Path,
        fill_rule: FillRule,
        transform: Transform,
        clip: IntRect,
        sink: &mut dyn CoverageSink,
    ) -> Option<()> {
        let ts = resolve_transform(transform);

        let mut builder = EdgeBuilder::new(&mut self.edges, ts, self.flatness);
        builder.add_path(path);
        let bounds = match builder.finish(&clip) {
            Some(bounds) => bounds,
            None => return Some(()),
        };

        if scan::fill_edges(
            &self.edges,
            &bounds,
            fill_rule,
            self.small_path_threshold,
            &mut self.buffers,
            sink,
        ) {
            Some(())
        } else {
            None
        }
    }

    /// Strokes `path` and emits its coverage into `sink`.
    ///
    /// The stroke width and dash lengths are in user units: the path is
    /// expanded in user space and only the resulting outline polygons are
    /// transformed. The outline is filled with the non-zero rule, so
    /// overlapping dashes and self-intersecting strokes paint at full
    /// coverage.
    ///
    /// Returns `None` when the stroke width is not positive or the sink
    /// aborted.
    pub fn stroke_path(
        &mut self,
        path: &Path,
        stroke: &Stroke,
        transform: Transform,
        clip: IntRect,
        sink: &mut dyn CoverageSink,
    ) -> Option<()> {
        let width = NonZeroPositiveF32::new(stroke.width)?;
        let radius = width.get().half();
        let ts = resolve_transform(transform);

        stroke::flatten_path(path, &ts, self.flatness, &mut self.flattened);

        let store = match stroke.dash {
            Some(ref dash) => {
                stroke::dash::apply(&self.flattened, dash, &mut self.dashed);
                &self.dashed
            }
            None => &self.flattened,
        };

        self.outline.clear();
        let mut outliner = Outliner::new(radius, stroke, ts, self.flatness, &mut self.outline);
        for subpath in &store.subpaths {
            outliner.outline_subpath(store.subpath_segments(subpath), subpath.closed);
        }
        for dot in &store.dots {
            outliner.outline_dot(dot);
        }

        let mut builder = EdgeBuilder::new(&mut self.edges, ts, self.flatness);
        for contour in self.outline.contours() {
            builder.add_polygon(contour);
        }
        let bounds = match builder.finish(&clip) {
            Some(bounds) => bounds,
            None => return Some(()),
        };

        if scan::fill_edges(
            &self.edges,
            &bounds,
            FillRule::Winding,
            self.small_path_threshold,
            &mut self.buffers,
            sink,
        ) {
            Some(())
        } else {
            None
        }
    }
}

fn resolve_transform(ts: Transform) -> Transform {
    if ts.is_all_zero() {
        Transform::identity()
    } else {
        ts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use scanfill_path::PathBuilder;

    struct Collector {
        rows: Vec<(i32, i32, Vec<f32>)>,
        abort_after: Option<usize>,
    }

    impl Collector {
        fn new() -> Self {
            Collector {
                rows: Vec::new(),
                abort_after: None,
            }
        }
    }

    impl CoverageSink for Collector {
        fn blit_span(&mut self, y: i32, x: i32, coverage: &[f32]) -> bool {
            self.rows.push((y, x, coverage.to_vec()));
            match self.abort_after {
                Some(limit) => self.rows.len() < limit,
                None => true,
            }
        }
    }

    fn clip() -> IntRect {
        IntRect::from_xywh(0, 0, 64, 64).unwrap()
    }

    #[test]
    fn empty_path_emits_nothing() {
        let mut pb = PathBuilder::new();
        pb.move_to(10.0, 10.0);
        pb.line_to(30.0, 10.0);
        let path = pb.finish().unwrap();

        // A horizontal line has no area.
        let mut rasterizer = Rasterizer::new();
        let mut sink = Collector::new();
        let result = rasterizer.fill_path(
            &path,
            FillRule::Winding,
            Transform::identity(),
            clip(),
            &mut sink,
        );

        assert_eq!(result, Some(()));
        assert!(sink.rows.is_empty());
    }

    #[test]
    fn rows_are_emitted_in_order() {
        let mut pb = PathBuilder::new();
        pb.push_rect(5.0, 5.0, 20.0, 20.0);
        let path = pb.finish().unwrap();

        let mut rasterizer = Rasterizer::new();
        let mut sink = Collector::new();
        rasterizer
            .fill_path(
                &path,
                FillRule::Winding,
                Transform::identity(),
                clip(),
                &mut sink,
            )
            .unwrap();

        assert!(!sink.rows.is_empty());
        for pair in sink.rows.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn sink_abort_propagates() {
        let mut pb = PathBuilder::new();
        pb.push_rect(5.0, 5.0, 20.0, 20.0);
        let path = pb.finish().unwrap();

        let mut rasterizer = Rasterizer::new();
        let mut sink = Collector::new();
        sink.abort_after = Some(3);
        let result = rasterizer.fill_path(
            &path,
            FillRule::Winding,
            Transform::identity(),
            clip(),
            &mut sink,
        );

        assert_eq!(result, None);
        assert_eq!(sink.rows.len(), 3);

        // The rasterizer stays usable after an abort.
        let mut sink = Collector::new();
        let result = rasterizer.fill_path(
            &path,
            FillRule::Winding,
            Transform::identity(),
            clip(),
            &mut sink,
        );
        assert_eq!(result, Some(()));
        assert_eq!(sink.rows.len(), 20);
    }

    #[test]
    fn zero_transform_is_identity() {
        let mut pb = PathBuilder::new();
        pb.push_rect(5.0, 5.0, 20.0, 20.0);
        let path = pb.finish().unwrap();

        let mut rasterizer = Rasterizer::new();

        let mut with_identity = Collector::new();
        rasterizer
            .fill_path(
                &path,
                FillRule::Winding,
                Transform::identity(),
                clip(),
                &mut with_identity,
            )
            .unwrap();

        let mut with_zero = Collector::new();
        rasterizer
            .fill_path(
                &path,
                FillRule::Winding,
                Transform::from_row(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
                clip(),
                &mut with_zero,
            )
            .unwrap();

        assert_eq!(with_identity.rows, with_zero.rows);
    }

    #[test]
    fn invalid_stroke_width() {
        let mut pb = PathBuilder::new();
        pb.move_to(5.0, 5.0);
        pb.line_to(30.0, 5.0);
        let path = pb.finish().unwrap();

        let mut rasterizer = Rasterizer::new();
        let mut sink = Collector::new();

        let stroke = Stroke {
            width: 0.0,
            ..Stroke::default()
        };
        assert_eq!(
            rasterizer.stroke_path(&path, &stroke, Transform::identity(), clip(), &mut sink),
            None
        );

        let stroke = Stroke {
            width: -1.0,
            ..Stroke::default()
        };
        assert_eq!(
            rasterizer.stroke_path(&path, &stroke, Transform::identity(), clip(), &mut sink),
            None
        );
    }
}
