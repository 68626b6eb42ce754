// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/*!
`scanfill` is an anti-aliased 2D path rasterizer.

It converts PDF/PostScript-style Bezier paths into per-pixel fractional
coverage in the 0..=1 range, delivered row by row to a caller-provided
sink. Coverage of a pixel equals the fraction of its unit square covered
by the interior of the path under the selected fill rule, computed
analytically from signed edge areas rather than by supersampling.

Both filling and stroking are supported. Stroking (width, caps, joins,
miter limit, dashing) is implemented by expanding the path into outline
polygons which are then filled with the non-zero rule.

The rasterizer itself is stateless between calls, but owns all of its
scratch buffers, so reusing one [`Rasterizer`] instance avoids
allocations. A single instance is not meant to be shared between threads;
use one instance per thread instead.
*/

#![no_std]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

#[cfg(not(any(feature = "std", feature = "no-std-float")))]
compile_error!("You have to activate either the `std` or the `no-std-float` feature.");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod edge;
mod edge_builder;
mod flatten;
mod mask;
mod rasterizer;
mod scan;
mod stroke;

pub use scanfill_path::*;

pub use mask::Mask;
pub use rasterizer::{CoverageSink, FillRule, Rasterizer};
pub use stroke::dash::StrokeDash;
pub use stroke::{LineCap, LineJoin, Stroke};
