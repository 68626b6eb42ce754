// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Converts an edge list into coverage rows.
//!
//! Two strategies share the same per-edge accumulator and the same
//! integrator. The small-path one keeps a full two-dimensional
//! accumulator for the whole bounding box, which is cheap for glyph-sized
//! paths. The large-path one walks scanlines with an active edge list and
//! only ever holds one row of accumulators.

mod large;
mod small;

use alloc::vec::Vec;

use scanfill_path::{IntRect, Scalar};

use crate::edge::Edge;
use crate::rasterizer::{CoverageSink, FillRule};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use scanfill_path::NoStdFloat;

/// Scratch storage shared by both back-ends.
///
/// Grows on demand and is only logically cleared between calls.
#[derive(Default)]
pub struct ScanBuffers {
    pub cover: Vec<f32>,
    pub area: Vec<f32>,
    pub row_touched: Vec<bool>,
    pub sorted: Vec<u32>,
    pub active: Vec<u32>,
}

/// Rasterizes `edges` inside `bounds`, emitting coverage rows into `sink`.
///
/// Returns `false` when the sink asked to stop.
pub fn fill_edges(
    edges: &[Edge],
    bounds: &IntRect,
    fill_rule: FillRule,
    small_path_threshold: u32,
    buffers: &mut ScanBuffers,
    sink: &mut dyn CoverageSink,
) -> bool {
    let area = bounds.width() as u64 * bounds.height() as u64;
    if area < u64::from(small_path_threshold) {
        small::fill(edges, bounds, fill_rule, buffers, sink)
    } else {
        large::fill(edges, bounds, fill_rule, buffers, sink)
    }
}

impl FillRule {
    /// Maps an accumulated signed area to coverage.
    pub(crate) fn apply(self, raw: f32) -> f32 {
        match self {
            FillRule::Winding => raw.abs().bound(0.0, 1.0),
            FillRule::EvenOdd => {
                // Triangular wave with period 2: even windings map to 0,
                // odd ones to 1.
                let r = raw.abs();
                let m = r - 2.0 * (r * 0.5).floor();
                1.0 - (1.0 - m).abs()
            }
        }
    }
}

/// Integrates one row of accumulators in-place.
///
/// `area` is overwritten with the final coverage values.
pub(crate) fn integrate_row(cover: &[f32], area: &mut [f32], fill_rule: FillRule) {
    debug_assert_eq!(cover.len(), area.len());

    let mut acc = 0.0;
    for i in 0..cover.len() {
        let raw = acc + area[i];
        acc += cover[i];
        area[i] = fill_rule.apply(raw);
    }
}

/// Trims zero coverage off both row ends and hands the rest to the sink.
///
/// Returns `false` when the sink asked to stop.
pub(crate) fn emit_row(y: i32, xmin: i32, coverage: &[f32], sink: &mut dyn CoverageSink) -> bool {
    let first = match coverage.iter().position(|c| *c != 0.0) {
        Some(first) => first,
        None => return true,
    };
    // Cannot fail, we just found a non-zero value.
    let last = coverage.iter().rposition(|c| *c != 0.0).unwrap();

    sink.blit_span(y, xmin + first as i32, &coverage[first..=last])
}
