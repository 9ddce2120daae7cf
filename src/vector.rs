// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::point::axis_for_code;
use crate::{CodePair, DxfError, DxfResult};

/// Represents a simple vector in Cartesian space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Vector {
    /// The X component of the vector.
    pub x: f64,
    /// The Y component of the vector.
    pub y: f64,
    /// The Z component of the vector.
    pub z: f64,
}

impl Vector {
    /// Creates a new `Vector` with the specified values.
    pub fn new(x: f64, y: f64, z: f64) -> Vector {
        Vector { x, y, z }
    }
    /// Returns a new zero vector representing (0, 0, 0).
    pub fn zero() -> Vector {
        Vector::new(0.0, 0.0, 0.0)
    }
    /// Returns a new vector representing the X axis.
    pub fn x_axis() -> Vector {
        Vector::new(1.0, 0.0, 0.0)
    }
    /// Returns a new vector representing the Y axis.
    pub fn y_axis() -> Vector {
        Vector::new(0.0, 1.0, 0.0)
    }
    /// Returns a new vector representing the Z axis.
    pub fn z_axis() -> Vector {
        Vector::new(0.0, 0.0, 1.0)
    }
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
    /// Returns a unit-length copy; the zero vector is returned unchanged.
    pub fn normalize(&self) -> Vector {
        let len = self.length();
        if len == 0.0 {
            *self
        } else {
            Vector::new(self.x / len, self.y / len, self.z / len)
        }
    }
    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    pub(crate) fn set(&mut self, pair: &CodePair) -> DxfResult<()> {
        match axis_for_code(pair.code) {
            Some(0) => self.x = pair.assert_f64()?,
            Some(1) => self.y = pair.assert_f64()?,
            Some(2) => self.z = pair.assert_f64()?,
            _ => {
                return Err(DxfError::UnexpectedCodePair(
                    pair.clone(),
                    String::from("expected an X, Y, or Z code for vector"),
                ))
            }
        }

        Ok(())
    }
    pub(crate) fn get(&self, code: i32) -> Option<f64> {
        match axis_for_code(code) {
            Some(0) => Some(self.x),
            Some(1) => Some(self.y),
            Some(2) => Some(self.z),
            _ => None,
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>, x_code: i32) {
        pairs.push(CodePair::new_f64(x_code, self.x));
        pairs.push(CodePair::new_f64(x_code + 10, self.y));
        pairs.push(CodePair::new_f64(x_code + 20, self.z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product_of_axes() {
        assert_eq!(Vector::z_axis(), Vector::x_axis().cross(&Vector::y_axis()));
        assert_eq!(Vector::x_axis(), Vector::y_axis().cross(&Vector::z_axis()));
    }

    #[test]
    fn normalize_keeps_zero() {
        assert_eq!(Vector::zero(), Vector::zero().normalize());
        assert_eq!(Vector::x_axis(), Vector::new(5.0, 0.0, 0.0).normalize());
    }
}
