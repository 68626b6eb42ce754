// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::edge::Edge;

use scanfill_path::IntRect;

use crate::rasterizer::{CoverageSink, FillRule};
use crate::scan::{emit_row, integrate_row, ScanBuffers};

/// Rasterizes one scanline at a time with an active edge list.
///
/// Edges enter the active list on the first scanline they intersect and
/// leave once the scanline has passed their bottom end. The list is
/// unordered: every active edge is accumulated independently and
/// summation is commutative, so no per-row sorting is needed.
pub fn fill(
    edges: &[Edge],
    bounds: &IntRect,
    fill_rule: FillRule,
    buffers: &mut ScanBuffers,
    sink: &mut dyn CoverageSink,
) -> bool {
    let w = bounds.width() as usize;
    let xmin = bounds.left();
    let xmax = bounds.right();
    let ymin = bounds.top();
    let ymax = bounds.bottom();

    // Index sort by the edge's top end.
    buffers.sorted.clear();
    buffers.sorted.extend(0..edges.len() as u32);
    {
        let sorted = &mut buffers.sorted;
        sorted.sort_by(|a, b| {
            let ya = edges[*a as usize].top();
            let yb = edges[*b as usize].top();
            ya.partial_cmp(&yb).unwrap_or(core::cmp::Ordering::Equal)
        });
    }

    buffers.active.clear();
    buffers.cover.clear();
    buffers.cover.resize(w, 0.0);
    buffers.area.clear();
    buffers.area.resize(w, 0.0);

    let mut next = 0;
    for y in ymin..ymax {
        // Pull in edges that start before the bottom of this scanline.
        while next < buffers.sorted.len() {
            let index = buffers.sorted[next];
            if edges[index as usize].top() >= (y + 1) as f32 {
                break;
            }
            buffers.active.push(index);
            next += 1;
        }

        // Drop edges that ended above this scanline. Order inside the
        // active list does not matter, so swap-with-last is enough.
        let mut i = 0;
        while i < buffers.active.len() {
            if edges[buffers.active[i] as usize].bottom() <= y as f32 {
                buffers.active.swap_remove(i);
            } else {
                i += 1;
            }
        }

        if buffers.active.is_empty() {
            continue;
        }

        for v in buffers.cover.iter_mut() {
            *v = 0.0;
        }
        for v in buffers.area.iter_mut() {
            *v = 0.0;
        }

        for &index in buffers.active.iter() {
            edges[index as usize].accumulate(y, xmin, xmax, &mut buffers.cover, &mut buffers.area);
        }

        integrate_row(&buffers.cover, &mut buffers.area, fill_rule);
        if !emit_row(y, xmin, &buffers.area, sink) {
            return false;
        }
    }

    true
}
