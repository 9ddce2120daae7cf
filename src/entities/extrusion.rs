// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::{CodePair, CodePairValue, DxfResult, Geometry, TransformationMatrix, Vector};

const ARBITRARY_AXIS_LIMIT: f64 = 1.0 / 64.0;

/// The thickness (code 39) and extrusion direction (codes 210/220/230) shared by planar
/// entities.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Extrusion {
    pub thickness: f64,
    pub direction: Vector,
}

impl Default for Extrusion {
    fn default() -> Self {
        Extrusion {
            thickness: 0.0,
            direction: Vector::z_axis(),
        }
    }
}

impl Extrusion {
    pub fn is_default(&self) -> bool {
        *self == Extrusion::default()
    }
    /// The object coordinate system for this extrusion direction.
    pub fn ucs(&self) -> TransformationMatrix {
        generate_ucs(self.direction)
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            39 => self.thickness = pair.assert_f64()?,
            210 | 220 | 230 => self.direction.set(pair)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            39 => Some(CodePairValue::Double(self.thickness)),
            210 | 220 | 230 => self.direction.get(code).map(CodePairValue::Double),
            _ => None,
        }
    }
    pub(crate) fn add_thickness(&self, pairs: &mut Vec<CodePair>) {
        if self.thickness != 0.0 {
            pairs.push(CodePair::new_f64(39, self.thickness));
        }
    }
    pub(crate) fn add_direction(&self, pairs: &mut Vec<CodePair>) {
        if self.direction != Vector::z_axis() {
            self.direction.add_code_pairs(pairs, 210);
        }
    }
    pub(crate) fn apply_to(&self, geometry: &mut Geometry) {
        geometry.thickness = self.thickness;
        geometry.extrusion_direction = self.direction;
    }
}

/// Builds the object coordinate system for `normal` using the DXF arbitrary axis algorithm.
///
/// The returned matrix maps object coordinates to world coordinates; its columns are the
/// derived X axis, Y axis, and the normalized `normal`.
pub fn generate_ucs(normal: Vector) -> TransformationMatrix {
    let z = normal.normalize();
    let x = if z.x.abs() < ARBITRARY_AXIS_LIMIT && z.y.abs() < ARBITRARY_AXIS_LIMIT {
        Vector::y_axis().cross(&z)
    } else {
        Vector::z_axis().cross(&z)
    }
    .normalize();
    let y = z.cross(&x).normalize();
    TransformationMatrix::from_axes(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use float_cmp::approx_eq;

    #[test]
    fn default_direction_gives_identity() {
        assert_eq!(
            TransformationMatrix::identity(),
            generate_ucs(Vector::z_axis())
        );
    }

    #[test]
    fn flipped_normal_mirrors_x() {
        let m = generate_ucs(Vector::new(0.0, 0.0, -1.0));
        let p = m.transform_point(Point::new(1.0, 2.0, 3.0));
        assert!(approx_eq!(f64, -1.0, p.x, epsilon = 1e-12));
        assert!(approx_eq!(f64, 2.0, p.y, epsilon = 1e-12));
        assert!(approx_eq!(f64, -3.0, p.z, epsilon = 1e-12));
    }

    #[test]
    fn axes_are_orthonormal() {
        let m = generate_ucs(Vector::new(1.0, 1.0, 1.0));
        let x = m.transform_vector(Vector::x_axis());
        let y = m.transform_vector(Vector::y_axis());
        let z = m.transform_vector(Vector::z_axis());
        assert!(approx_eq!(f64, 0.0, x.dot(&y), epsilon = 1e-12));
        assert!(approx_eq!(f64, 0.0, x.dot(&z), epsilon = 1e-12));
        assert!(approx_eq!(f64, 1.0, x.length(), epsilon = 1e-12));
        assert!(approx_eq!(f64, 1.0 / 3.0f64.sqrt(), z.x, epsilon = 1e-12));
    }

    #[test]
    fn only_non_default_values_are_written() {
        let mut pairs = vec![];
        let mut extrusion = Extrusion::default();
        extrusion.add_thickness(&mut pairs);
        extrusion.add_direction(&mut pairs);
        assert!(pairs.is_empty());

        extrusion.apply(&CodePair::new_f64(39, 2.0)).unwrap();
        extrusion.apply(&CodePair::new_f64(230, -1.0)).unwrap();
        extrusion.add_thickness(&mut pairs);
        extrusion.add_direction(&mut pairs);
        assert_eq!(
            vec![
                CodePair::new_f64(39, 2.0),
                CodePair::new_f64(210, 0.0),
                CodePair::new_f64(220, 0.0),
                CodePair::new_f64(230, -1.0),
            ],
            pairs
        );
    }
}
