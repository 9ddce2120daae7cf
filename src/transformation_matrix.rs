// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::{Point, Vector};

/// Applies a transformation to a point.
///
/// Points are treated as column vectors, so `x' = m11 * x + m12 * y + m13 * z + m14`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TransformationMatrix {
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m14: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m24: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
    pub m34: f64,
    pub m41: f64,
    pub m42: f64,
    pub m43: f64,
    pub m44: f64,
}

// public implementation
impl TransformationMatrix {
    pub fn identity() -> Self {
        TransformationMatrix {
            m11: 1.0,
            m22: 1.0,
            m33: 1.0,
            m44: 1.0,
            ..Default::default()
        }
    }
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        TransformationMatrix {
            m14: x,
            m24: y,
            m34: z,
            ..TransformationMatrix::identity()
        }
    }
    pub fn scale(x: f64, y: f64, z: f64) -> Self {
        TransformationMatrix {
            m11: x,
            m22: y,
            m33: z,
            m44: 1.0,
            ..Default::default()
        }
    }
    /// Rotation about the Z axis, counter-clockwise, in radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        TransformationMatrix {
            m11: cos,
            m12: -sin,
            m21: sin,
            m22: cos,
            ..TransformationMatrix::identity()
        }
    }
    /// Builds a matrix whose columns are the given axes.
    pub fn from_axes(x: Vector, y: Vector, z: Vector) -> Self {
        TransformationMatrix {
            m11: x.x,
            m21: x.y,
            m31: x.z,
            m12: y.x,
            m22: y.y,
            m32: y.z,
            m13: z.x,
            m23: z.y,
            m33: z.z,
            m44: 1.0,
            ..Default::default()
        }
    }
    /// Returns `self * other`; `other` is applied to a point first.
    pub fn multiply(&self, other: &TransformationMatrix) -> TransformationMatrix {
        let a = self.values();
        let b = other.values();
        let mut result = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                result[row * 4 + col] = (0..4).map(|k| a[row * 4 + k] * b[k * 4 + col]).sum::<f64>();
            }
        }
        TransformationMatrix::from_vec(&result)
    }
    /// Replaces `self` with `self * other`.
    pub fn mult_right(&mut self, other: &TransformationMatrix) {
        *self = self.multiply(other);
    }
    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.m11 * p.x + self.m12 * p.y + self.m13 * p.z + self.m14,
            self.m21 * p.x + self.m22 * p.y + self.m23 * p.z + self.m24,
            self.m31 * p.x + self.m32 * p.y + self.m33 * p.z + self.m34,
        )
    }
    /// Transforms a direction; translation is ignored.
    pub fn transform_vector(&self, v: Vector) -> Vector {
        Vector::new(
            self.m11 * v.x + self.m12 * v.y + self.m13 * v.z,
            self.m21 * v.x + self.m22 * v.y + self.m23 * v.z,
            self.m31 * v.x + self.m32 * v.y + self.m33 * v.z,
        )
    }
    /// Returns the inverse, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<TransformationMatrix> {
        // Gauss-Jordan elimination with partial pivoting
        let mut m = self.values();
        let mut inv = TransformationMatrix::identity().values();
        for col in 0..4 {
            let pivot = (col..4).fold(col, |best, row| {
                if m[row * 4 + col].abs() > m[best * 4 + col].abs() {
                    row
                } else {
                    best
                }
            });
            if m[pivot * 4 + col].abs() < 1e-12 {
                return None;
            }
            if pivot != col {
                for k in 0..4 {
                    m.swap(pivot * 4 + k, col * 4 + k);
                    inv.swap(pivot * 4 + k, col * 4 + k);
                }
            }
            let scale = m[col * 4 + col];
            for k in 0..4 {
                m[col * 4 + k] /= scale;
                inv[col * 4 + k] /= scale;
            }
            for row in 0..4 {
                if row != col {
                    let factor = m[row * 4 + col];
                    if factor != 0.0 {
                        for k in 0..4 {
                            m[row * 4 + k] -= factor * m[col * 4 + k];
                            inv[row * 4 + k] -= factor * inv[col * 4 + k];
                        }
                    }
                }
            }
        }
        Some(TransformationMatrix::from_vec(&inv))
    }
}

// internal visibility only
impl TransformationMatrix {
    pub(crate) fn from_vec(values: &[f64]) -> Self {
        TransformationMatrix {
            m11: TransformationMatrix::value_or_default(values, 0),
            m12: TransformationMatrix::value_or_default(values, 1),
            m13: TransformationMatrix::value_or_default(values, 2),
            m14: TransformationMatrix::value_or_default(values, 3),
            m21: TransformationMatrix::value_or_default(values, 4),
            m22: TransformationMatrix::value_or_default(values, 5),
            m23: TransformationMatrix::value_or_default(values, 6),
            m24: TransformationMatrix::value_or_default(values, 7),
            m31: TransformationMatrix::value_or_default(values, 8),
            m32: TransformationMatrix::value_or_default(values, 9),
            m33: TransformationMatrix::value_or_default(values, 10),
            m34: TransformationMatrix::value_or_default(values, 11),
            m41: TransformationMatrix::value_or_default(values, 12),
            m42: TransformationMatrix::value_or_default(values, 13),
            m43: TransformationMatrix::value_or_default(values, 14),
            m44: TransformationMatrix::value_or_default(values, 15),
        }
    }
    pub(crate) fn values(&self) -> Vec<f64> {
        vec![
            self.m11, self.m12, self.m13, self.m14, self.m21, self.m22, self.m23, self.m24,
            self.m31, self.m32, self.m33, self.m34, self.m41, self.m42, self.m43, self.m44,
        ]
    }
}

// private implementation
impl TransformationMatrix {
    fn value_or_default(values: &[f64], index: usize) -> f64 {
        if values.len() > index {
            values[index]
        } else {
            0.0
        }
    }
}
