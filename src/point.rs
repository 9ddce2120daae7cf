// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::{CodePair, DxfError, DxfResult, Vector};

/// Represents a simple point in Cartesian space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Point {
    /// The X value of the point.
    pub x: f64,
    /// The Y value of the point.
    pub y: f64,
    /// The Z value of the point.
    pub z: f64,
}

impl Point {
    /// Creates a new `Point` with the specified values.
    pub fn new(x: f64, y: f64, z: f64) -> Point {
        Point { x, y, z }
    }
    /// Returns a point representing the origin of (0, 0, 0).
    pub fn origin() -> Point {
        Point::new(0.0, 0.0, 0.0)
    }
    pub fn tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
    /// Returns the vector from the origin to this point.
    pub fn as_vector(&self) -> Vector {
        Vector::new(self.x, self.y, self.z)
    }
    /// Sets one coordinate from a `1x/2x/3x` style code pair (also `21x` style extrusion codes).
    pub(crate) fn set(&mut self, pair: &CodePair) -> DxfResult<()> {
        match axis_for_code(pair.code) {
            Some(0) => self.x = pair.assert_f64()?,
            Some(1) => self.y = pair.assert_f64()?,
            Some(2) => self.z = pair.assert_f64()?,
            _ => {
                return Err(DxfError::UnexpectedCodePair(
                    pair.clone(),
                    String::from("expected an X, Y, or Z code for point"),
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
    /// Appends the X, Y, and Z pairs using `x_code`, `x_code + 10`, and `x_code + 20`.
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>, x_code: i32) {
        pairs.push(CodePair::new_f64(x_code, self.x));
        pairs.push(CodePair::new_f64(x_code + 10, self.y));
        pairs.push(CodePair::new_f64(x_code + 20, self.z));
    }
}

/// `10..=19` is X, `20..=29` is Y, `30..=39` is Z; the same holds for the `210`/`220`/`230` family.
pub(crate) fn axis_for_code(code: i32) -> Option<i32> {
    match code % 100 {
        10..=39 => Some((code % 100) / 10 - 1),
        _ => None,
    }
}
