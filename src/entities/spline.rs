// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::{CodePair, CodePairValue, DxfResult, Point, Vector};

const DEFAULT_TOLERANCE: f64 = 0.000_000_000_1;

/// A NURBS curve.  The knot, control point, and fit point counts (codes 72, 73, and 74) are
/// derived from the stored lists and written on output.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Spline {
    pub normal: Vector,
    pub flags: i16,
    pub degree_of_curve: i16,
    pub knot_tolerance: f64,
    pub control_point_tolerance: f64,
    pub fit_tolerance: f64,
    pub knot_values: Vec<f64>,
    pub weights: Vec<f64>,
    pub control_points: Vec<Point>,
    pub fit_points: Vec<Point>,
}

impl Default for Spline {
    fn default() -> Self {
        Spline {
            normal: Vector::zero(),
            flags: 0,
            degree_of_curve: 1,
            knot_tolerance: DEFAULT_TOLERANCE,
            control_point_tolerance: DEFAULT_TOLERANCE,
            fit_tolerance: DEFAULT_TOLERANCE,
            knot_values: vec![],
            weights: vec![],
            control_points: vec![],
            fit_points: vec![],
        }
    }
}

impl Spline {
    pub fn is_closed(&self) -> bool {
        self.flags & 1 != 0
    }
    pub fn is_periodic(&self) -> bool {
        self.flags & 2 != 0
    }
    pub fn is_rational(&self) -> bool {
        self.flags & 4 != 0
    }
    pub fn is_planar(&self) -> bool {
        self.flags & 8 != 0
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            210 | 220 | 230 => self.normal.set(pair)?,
            70 => self.flags = pair.assert_i16()?,
            71 => self.degree_of_curve = pair.assert_i16()?,
            // counts are recomputed from the lists
            72 | 73 | 74 => (),
            42 => self.knot_tolerance = pair.assert_f64()?,
            43 => self.control_point_tolerance = pair.assert_f64()?,
            44 => self.fit_tolerance = pair.assert_f64()?,
            40 => self.knot_values.push(pair.assert_f64()?),
            41 => self.weights.push(pair.assert_f64()?),
            // an X code starts a new point
            10 => self
                .control_points
                .push(Point::new(pair.assert_f64()?, 0.0, 0.0)),
            20 | 30 => match self.control_points.last_mut() {
                Some(p) => p.set(pair)?,
                None => return Ok(false),
            },
            11 => self
                .fit_points
                .push(Point::new(pair.assert_f64()?, 0.0, 0.0)),
            21 | 31 => match self.fit_points.last_mut() {
                Some(p) => p.set(pair)?,
                None => return Ok(false),
            },
            _ => return Ok(false),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32, index: usize) -> Option<CodePairValue> {
        match code {
            210 | 220 | 230 => self.normal.get(code).map(CodePairValue::Double),
            70 => Some(CodePairValue::Short(self.flags)),
            71 => Some(CodePairValue::Short(self.degree_of_curve)),
            72 => Some(CodePairValue::Short(self.knot_values.len() as i16)),
            73 => Some(CodePairValue::Short(self.control_points.len() as i16)),
            74 => Some(CodePairValue::Short(self.fit_points.len() as i16)),
            42 => Some(CodePairValue::Double(self.knot_tolerance)),
            43 => Some(CodePairValue::Double(self.control_point_tolerance)),
            44 => Some(CodePairValue::Double(self.fit_tolerance)),
            40 => self.knot_values.get(index).map(|v| CodePairValue::Double(*v)),
            41 => self.weights.get(index).map(|v| CodePairValue::Double(*v)),
            10 | 20 | 30 => self
                .control_points
                .get(index)
                .and_then(|p| p.get(code))
                .map(CodePairValue::Double),
            11 | 21 | 31 => self
                .fit_points
                .get(index)
                .and_then(|p| p.get(code))
                .map(CodePairValue::Double),
            _ => None,
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        if self.normal != Vector::zero() {
            self.normal.add_code_pairs(pairs, 210);
        }
        pairs.push(CodePair::new_i16(70, self.flags));
        pairs.push(CodePair::new_i16(71, self.degree_of_curve));
        pairs.push(CodePair::new_i16(72, self.knot_values.len() as i16));
        pairs.push(CodePair::new_i16(73, self.control_points.len() as i16));
        pairs.push(CodePair::new_i16(74, self.fit_points.len() as i16));
        pairs.push(CodePair::new_f64(42, self.knot_tolerance));
        pairs.push(CodePair::new_f64(43, self.control_point_tolerance));
        pairs.push(CodePair::new_f64(44, self.fit_tolerance));
        for knot in &self.knot_values {
            pairs.push(CodePair::new_f64(40, *knot));
        }
        for weight in &self.weights {
            pairs.push(CodePair::new_f64(41, *weight));
        }
        for point in &self.control_points {
            point.add_code_pairs(pairs, 10);
        }
        for point in &self.fit_points {
            point.add_code_pairs(pairs, 11);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_start_on_x() {
        let mut spline = Spline::default();
        for pair in vec![
            CodePair::new_i16(73, 2),
            CodePair::new_f64(10, 1.0),
            CodePair::new_f64(20, 2.0),
            CodePair::new_f64(30, 3.0),
            CodePair::new_f64(10, 4.0),
            CodePair::new_f64(20, 5.0),
            CodePair::new_f64(40, 0.0),
            CodePair::new_f64(40, 1.0),
        ] {
            assert!(spline.apply(&pair).unwrap());
        }
        assert_eq!(
            vec![Point::new(1.0, 2.0, 3.0), Point::new(4.0, 5.0, 0.0)],
            spline.control_points
        );
        assert_eq!(Some(CodePairValue::Double(1.0)), spline.get(40, 1));
        assert_eq!(Some(CodePairValue::Short(2)), spline.get(73, 0));
    }

    #[test]
    fn y_without_x_is_not_consumed() {
        let mut spline = Spline::default();
        assert!(!spline.apply(&CodePair::new_f64(21, 1.0)).unwrap());
    }

    #[test]
    fn counts_follow_lists() {
        let mut spline = Spline::default();
        spline.fit_points.push(Point::new(1.0, 1.0, 0.0));
        let mut pairs = vec![];
        spline.add_code_pairs(&mut pairs);
        assert!(pairs.contains(&CodePair::new_i16(72, 0)));
        assert!(pairs.contains(&CodePair::new_i16(74, 1)));
        assert!(pairs.contains(&CodePair::new_f64(11, 1.0)));
    }
}
