// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use scanfill_path::IntRect;

use crate::edge::Edge;
use crate::rasterizer::{CoverageSink, FillRule};
use crate::scan::{emit_row, integrate_row, ScanBuffers};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use scanfill_path::NoStdFloat;

/// Rasterizes using one accumulator cell per pixel of the bounding box.
///
/// Every edge walks all scanlines it intersects up front, then touched
/// rows are integrated and emitted top to bottom.
pub fn fill(
    edges: &[Edge],
    bounds: &IntRect,
    fill_rule: FillRule,
    buffers: &mut ScanBuffers,
    sink: &mut dyn CoverageSink,
) -> bool {
    let w = bounds.width() as usize;
    let h = bounds.height() as usize;
    let xmin = bounds.left();
    let xmax = bounds.right();
    let ymin = bounds.top();
    let ymax = bounds.bottom();

    buffers.cover.clear();
    buffers.cover.resize(w * h, 0.0);
    buffers.area.clear();
    buffers.area.resize(w * h, 0.0);
    buffers.row_touched.clear();
    buffers.row_touched.resize(h, false);

    for edge in edges {
        let y_start = (edge.top().floor() as i32).max(ymin);
        let y_end = (edge.bottom().floor() as i32 + 1).min(ymax);
        for y in y_start..y_end {
            let row = (y - ymin) as usize * w;
            edge.accumulate(
                y,
                xmin,
                xmax,
                &mut buffers.cover[row..row + w],
                &mut buffers.area[row..row + w],
            );
            buffers.row_touched[(y - ymin) as usize] = true;
        }
    }

    for y in 0..h {
        if !buffers.row_touched[y] {
            continue;
        }

        let row = y * w;
        integrate_row(
            &buffers.cover[row..row + w],
            &mut buffers.area[row..row + w],
            fill_rule,
        );
        if !emit_row(ymin + y as i32, xmin, &buffers.area[row..row + w], sink) {
            return false;
        }
    }

    true
}
