// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::Point;

/// An affine transformation matrix.
///
/// Stores a 3x2 matrix `[sx kx tx; ky sy ty]` mapping
/// `(x, y)` to `(sx*x + kx*y + tx, ky*x + sy*y + ty)`.
///
/// Unlike `Rect`, does not guarantee to be finite or valid in any way.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub sx: f32,
    pub kx: f32,
    pub ky: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            sx: 1.0,
            kx: 0.0,
            ky: 0.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }
}

impl Transform {
    /// Creates an identity transform.
    pub fn identity() -> Self {
        Transform::default()
    }

    /// Creates a new `Transform`.
    ///
    /// We are using column-major-column-vector matrix notation,
    /// therefore it's ky-kx, not kx-ky.
    pub fn from_row(sx: f32, ky: f32, kx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Transform {
            sx,
            ky,
            kx,
            sy,
            tx,
            ty,
        }
    }

    /// Creates a new translating `Transform`.
    pub fn from_translate(tx: f32, ty: f32) -> Self {
        Transform::from_row(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a new scaling `Transform`.
    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Transform::from_row(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Checks that transform is identity.
    pub fn is_identity(&self) -> bool {
        *self == Transform::default()
    }

    /// Checks that all transform values are zero.
    ///
    /// Such a transform carries no information and is commonly used as
    /// a "not set" marker.
    pub fn is_all_zero(&self) -> bool {
        self.sx == 0.0
            && self.kx == 0.0
            && self.ky == 0.0
            && self.sy == 0.0
            && self.tx == 0.0
            && self.ty == 0.0
    }

    /// Checks that all transform values are finite.
    pub fn is_finite(&self) -> bool {
        self.sx.is_finite()
            && self.kx.is_finite()
            && self.ky.is_finite()
            && self.sy.is_finite()
            && self.tx.is_finite()
            && self.ty.is_finite()
    }

    /// Transforms a single point.
    pub fn map_point(&self, p: Point) -> Point {
        if self.is_identity() {
            p
        } else {
            Point::from_xy(
                self.sx * p.x + self.kx * p.y + self.tx,
                self.ky * p.x + self.sy * p.y + self.ty,
            )
        }
    }

    /// Transforms a slice of points in-place.
    pub fn map_points(&self, points: &mut [Point]) {
        if self.is_identity() {
            return;
        }

        for p in points {
            *p = Point::from_xy(
                self.sx * p.x + self.kx * p.y + self.tx,
                self.ky * p.x + self.sy * p.y + self.ty,
            );
        }
    }

    /// Transforms a vector, applying only the linear part of the matrix.
    ///
    /// Translation does not affect directions and distances, which makes
    /// this the right mapping for measuring tolerances in device space.
    pub fn map_vector(&self, v: Point) -> Point {
        Point::from_xy(self.sx * v.x + self.kx * v.y, self.ky * v.x + self.sy * v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform() {
        let ts = Transform::identity();
        assert!(ts.is_identity());
        assert!(!ts.is_all_zero());
        assert_eq!(ts.map_point(Point::from_xy(10.0, 20.0)), Point::from_xy(10.0, 20.0));

        let ts = Transform::from_row(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(ts.is_all_zero());

        let ts = Transform::from_scale(2.0, 3.0);
        assert_eq!(ts.map_point(Point::from_xy(10.0, 20.0)), Point::from_xy(20.0, 60.0));
        assert_eq!(ts.map_vector(Point::from_xy(1.0, 1.0)), Point::from_xy(2.0, 3.0));

        let ts = Transform::from_translate(5.0, -5.0);
        assert_eq!(ts.map_point(Point::from_xy(10.0, 20.0)), Point::from_xy(15.0, 15.0));
        // Translation must not affect vectors.
        assert_eq!(ts.map_vector(Point::from_xy(1.0, 1.0)), Point::from_xy(1.0, 1.0));
    }
}
