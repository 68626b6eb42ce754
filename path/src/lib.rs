// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Geometry and Bezier path primitives used by
//! [scanfill](https://github.com/RazrFalcon/scanfill).
//!
//! Provides a memory-efficient path container, a path builder and the small
//! set of geometry types the rasterizer needs.
//!
//! All types use single precision floats (`f32`).

#![no_std]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::wrong_self_convention)]

#[cfg(not(any(feature = "std", feature = "no-std-float")))]
compile_error!("You have to activate either the `std` or the `no-std-float` feature.");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
#[allow(unused_imports)]
use crate::scalar::NoStdFloat;

mod floating_point;
mod path;
mod path_builder;
mod rect;
mod scalar;
mod transform;

pub use floating_point::*;
pub use path::*;
pub use path_builder::*;
pub use rect::*;
pub use scalar::*;
pub use transform::*;

/// An integer length that is guarantee to be > 0
type LengthU32 = core::num::NonZeroU32;

/// A point.
///
/// Doesn't guarantee to be finite.
#[allow(missing_docs)]
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

impl Point {
    /// Creates a new `Point`.
    pub fn from_xy(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Creates a point at 0x0 position.
    pub fn zero() -> Self {
        Point { x: 0.0, y: 0.0 }
    }

    /// Returns true if x and y are both zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns true if both x and y are measurable values.
    ///
    /// Both values are other than infinities and NaN.
    pub fn is_finite(&self) -> bool {
        (self.x * self.y).is_finite()
    }

    /// Scales (x, y) so that `length()` returns one, while preserving the
    /// ratio of x to y, if possible.
    ///
    /// If the prior length is nearly zero, sets the vector to (0, 0) and
    /// returns false; otherwise returns true.
    pub fn normalize(&mut self) -> bool {
        self.set_normalize(self.x, self.y)
    }

    /// Sets the vector to (x, y) scaled so `length()` returns one.
    ///
    /// If (x, y) length is nearly zero, sets the vector to (0, 0) and
    /// returns false; otherwise returns true.
    pub fn set_normalize(&mut self, x: f32, y: f32) -> bool {
        // mag2 can overflow or underflow in f32; doubles keep the scale
        // representable for any finite input.
        let xx = f64::from(x);
        let yy = f64::from(y);
        let dmag = (xx * xx + yy * yy).sqrt();
        let dscale = 1.0 / dmag;
        let x = x * dscale as f32;
        let y = y * dscale as f32;

        if !x.is_finite() || !y.is_finite() || (x == 0.0 && y == 0.0) {
            *self = Point::zero();
            return false;
        }

        *self = Point::from_xy(x, y);
        true
    }

    /// Returns the Euclidean distance from origin.
    pub fn length(&self) -> f32 {
        let mag2 = self.x * self.x + self.y * self.y;
        if mag2.is_finite() {
            mag2.sqrt()
        } else {
            let xx = f64::from(self.x);
            let yy = f64::from(self.y);
            (xx * xx + yy * yy).sqrt() as f32
        }
    }

    /// Returns the Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f32 {
        (*self - other).length()
    }

    /// Returns the dot product of two points.
    pub fn dot(&self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Returns the cross product of vector and vec.
    ///
    /// Vector and vec form three-dimensional vectors with z-axis value equal
    /// to zero. The cross product z-axis component is returned.
    pub fn cross(&self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Scales Point in-place by scale.
    pub fn scale(&mut self, scale: f32) {
        self.x *= scale;
        self.y *= scale;
    }

    /// Returns a copy scaled by `scale`.
    pub fn scaled(&self, scale: f32) -> Self {
        Point::from_xy(self.x * scale, self.y * scale)
    }

    pub(crate) fn swap_coords(&mut self) {
        core::mem::swap(&mut self.x, &mut self.y);
    }

    /// Rotates the point 90 degrees clockwise: (x, y) -> (-y, x).
    pub fn rotate_cw(&mut self) {
        self.swap_coords();
        self.x = -self.x;
    }

    /// Rotates the point 90 degrees counter-clockwise: (x, y) -> (y, -x).
    pub fn rotate_ccw(&mut self) {
        self.swap_coords();
        self.y = -self.y;
    }
}

impl core::ops::Neg for Point {
    type Output = Point;

    fn neg(self) -> Self::Output {
        Point {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Self::Output {
        Point::from_xy(self.x + other.x, self.y + other.y)
    }
}

impl core::ops::AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Self::Output {
        Point::from_xy(self.x - other.x, self.y - other.y)
    }
}

impl core::ops::SubAssign for Point {
    fn sub_assign(&mut self, other: Point) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

/// An integer size.
///
/// # Guarantees
///
/// - Width and height are positive and non-zero.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct IntSize {
    width: LengthU32,
    height: LengthU32,
}

impl IntSize {
    /// Creates a new `IntSize` from width and height.
    pub fn from_wh(width: u32, height: u32) -> Option<Self> {
        Some(IntSize {
            width: LengthU32::new(width)?,
            height: LengthU32::new(height)?,
        })
    }

    /// Returns width.
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Returns height.
    pub fn height(&self) -> u32 {
        self.height.get()
    }
}
