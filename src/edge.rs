// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! A device-space edge and its per-scanline coverage contribution.
//!
//! Coverage is computed with the signed-area method: every edge adds a
//! `cover` value (its vertical extent inside a pixel, signed by winding
//! direction) and an `area` value (`cover` minus the part of the pixel
//! to the right of the edge) to each pixel column it crosses. A prefix
//! sum over a row then reconstructs the exact signed covered area of
//! every pixel without supersampling.

use scanfill_path::Point;

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use scanfill_path::NoStdFloat;

// Edges flatter than this cannot be sampled by any scanline and only
// add noise to dxdy.
const DY_THRESHOLD: f32 = 1e-10;

/// An oriented line segment in device space.
///
/// Stored top to bottom: `y0 < y1`. The original direction survives in
/// `winding`: +1 for edges that pointed down, -1 for edges that pointed up.
#[derive(Copy, Clone, Debug)]
pub struct Edge {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Inverse slope: x advance per unit of y.
    pub dxdy: f32,
    pub winding: f32,
}

impl Edge {
    /// Creates an edge from `p0` to `p1`.
    ///
    /// Returns `None` for (almost) horizontal edges: they do not affect
    /// coverage and are discarded at construction.
    pub fn new(p0: Point, p1: Point) -> Option<Self> {
        let dy = p1.y - p0.y;
        if dy.abs() < DY_THRESHOLD {
            return None;
        }

        let (top, bottom, winding) = if dy > 0.0 { (p0, p1, 1.0) } else { (p1, p0, -1.0) };
        Some(Edge {
            x0: top.x,
            y0: top.y,
            x1: bottom.x,
            y1: bottom.y,
            dxdy: (bottom.x - top.x) / (bottom.y - top.y),
            winding,
        })
    }

    /// The smaller y coordinate.
    pub fn top(&self) -> f32 {
        self.y0
    }

    /// The larger y coordinate.
    pub fn bottom(&self) -> f32 {
        self.y1
    }

    fn x_at(&self, y: f32) -> f32 {
        self.x0 + (y - self.y0) * self.dxdy
    }

    /// Accumulates this edge's contribution to the scanline `y`.
    ///
    /// `cover` and `area` are the row accumulators for the pixel columns
    /// `xmin..xmax`. Contributions left of `xmin` are folded into the
    /// first column so the prefix sum still carries the winding that
    /// enters the region from the left. Contributions right of `xmax`
    /// are dropped.
    pub fn accumulate(&self, y: i32, xmin: i32, xmax: i32, cover: &mut [f32], area: &mut [f32]) {
        debug_assert_eq!(cover.len(), (xmax - xmin) as usize);
        debug_assert_eq!(area.len(), (xmax - xmin) as usize);

        // Clip to the horizontal strip of this scanline.
        let y_lo = (y as f32).max(self.y0);
        let y_hi = (y as f32 + 1.0).min(self.y1);
        if y_hi <= y_lo {
            return;
        }

        let dy = y_hi - y_lo;
        let xa = self.x_at(y_lo);
        let xb = self.x_at(y_hi);
        let (xl, xr) = if xa <= xb { (xa, xb) } else { (xb, xa) };
        let pix_l = xl.floor() as i32;
        let pix_r = xr.floor() as i32;

        if pix_r < xmin {
            // Entirely left of the region: a full-height "shadow".
            let c = self.winding * dy;
            cover[0] += c;
            area[0] += c;
            return;
        }

        if pix_l >= xmax {
            return;
        }

        if pix_l == pix_r {
            let c = self.winding * dy;
            let xfrac = (xa + xb) * 0.5 - pix_l as f32;
            let i = (pix_l - xmin) as usize;
            cover[i] += c;
            area[i] += c * (1.0 - xfrac);
            return;
        }

        // The strip segment spans several columns; split it at column
        // boundaries. x is linear in y, so each column's vertical extent
        // is proportional to its x extent.
        let dy_per_x = dy / (xr - xl);

        let start = if pix_l < xmin {
            // Everything left of the region folds into the first column.
            let hi = (xmin as f32).min(xr);
            let c = self.winding * (hi - xl) * dy_per_x;
            cover[0] += c;
            area[0] += c;
            xmin
        } else {
            pix_l
        };

        for pix in start..=pix_r {
            if pix >= xmax {
                break;
            }

            let lo = (pix as f32).max(xl);
            let hi = (pix as f32 + 1.0).min(xr);
            if hi <= lo {
                continue;
            }

            let c = self.winding * (hi - lo) * dy_per_x;
            let xfrac = (lo + hi) * 0.5 - pix as f32;
            let i = (pix - xmin) as usize;
            cover[i] += c;
            area[i] += c * (1.0 - xfrac);
        }
    }
}
