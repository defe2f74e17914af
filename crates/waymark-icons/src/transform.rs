//! 2D affine transformations and the scale-fit computation.
//!
//! Every icon body paints in a fixed design coordinate space and is mapped
//! onto its target rectangle with [`Transform2D::fit`], which scales
//! uniformly and centers the leftover slack. Icons are never stretched.

use crate::error::{IconError, IconResult};
use crate::types::{Point, Rect, Size};

/// A 2D affine transformation matrix.
///
/// Stored as a 3x2 matrix in column-major order:
/// ```text
/// | m00 m10 m20 |   | scale_x  skew_x   translate_x |
/// | m01 m11 m21 | = | skew_y   scale_y  translate_y |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    m: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Create a transform from raw matrix elements.
    ///
    /// Elements are in the order: m00, m01, m10, m11, m20, m21
    #[inline]
    pub const fn from_matrix(m00: f32, m01: f32, m10: f32, m11: f32, m20: f32, m21: f32) -> Self {
        Self {
            m: [m00, m01, m10, m11, m20, m21],
        }
    }

    /// Create a translation transform.
    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// Create a uniform scaling transform.
    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    /// Create a non-uniform scaling transform.
    #[inline]
    pub const fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Concatenate this transform with another (self * other).
    ///
    /// The resulting transform first applies `other`, then `self`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        Self {
            m: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Apply a translation to this transform.
    #[inline]
    pub fn translated(&self, tx: f32, ty: f32) -> Self {
        self.then(&Self::translate(tx, ty))
    }

    /// Apply a uniform scale to this transform.
    #[inline]
    pub fn scaled(&self, s: f32) -> Self {
        self.then(&Self::scale(s))
    }

    /// Transform a point.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.m[0] * p.x + self.m[2] * p.y + self.m[4],
            y: self.m[1] * p.x + self.m[3] * p.y + self.m[5],
        }
    }

    /// Get the raw matrix elements in the order: m00, m01, m10, m11, m20, m21
    #[inline]
    pub fn to_array(self) -> [f32; 6] {
        self.m
    }

    /// Compute the transform that fits a design-space drawing into a target
    /// rectangle.
    ///
    /// The drawing is scaled uniformly by `min(target.width / design.width,
    /// target.height / design.height)` so it fits entirely inside `target`
    /// without clipping, and centered along the axis with leftover space.
    /// Translation is applied before scaling, so path coordinates remain
    /// expressed in the drawing's native design space.
    ///
    /// # Errors
    ///
    /// Returns [`IconError::InvalidDimensions`] if either the design size or
    /// the target rectangle has a zero or negative dimension.
    pub fn fit(design: Size, target: Rect) -> IconResult<Self> {
        if design.is_empty() {
            return Err(IconError::InvalidDimensions {
                width: design.width,
                height: design.height,
            });
        }
        if target.is_empty() {
            return Err(IconError::InvalidDimensions {
                width: target.width(),
                height: target.height(),
            });
        }

        let scale = (target.width() / design.width).min(target.height() / design.height);
        let offset_x = target.left() + ((target.width() - design.width * scale) / 2.0).max(0.0);
        let offset_y = target.top() + ((target.height() - design.height * scale) / 2.0).max(0.0);

        Ok(Self::translate(offset_x, offset_y).then(&Self::scale(scale)))
    }
}
