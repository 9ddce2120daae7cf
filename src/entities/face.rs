// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::entities::Extrusion;
use crate::{CodePair, CodePairValue, DxfResult, Geometry, GeometryKind, Point};

/// The four-cornered entities: SOLID, TRACE, and 3DFACE.
///
/// A face whose third and fourth corners coincide is a triangle.  SOLID and TRACE store their
/// corners in zig-zag order (first, second, fourth, third around the outline) and carry an
/// extrusion; 3DFACE corners run around the outline and carry invisible-edge flags instead.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Face {
    pub corners: [Point; 4],
    /// Invisible edge flags, 3DFACE only.
    pub edge_flags: i16,
    /// Thickness and extrusion direction, SOLID and TRACE only.
    pub extrusion: Extrusion,
    zig_zag: bool,
}

impl Face {
    /// A SOLID or TRACE face.
    pub fn new_solid(corners: [Point; 4]) -> Self {
        Face {
            corners,
            zig_zag: true,
            ..Default::default()
        }
    }
    /// A 3DFACE.
    pub fn new_3d(corners: [Point; 4]) -> Self {
        Face {
            corners,
            zig_zag: false,
            ..Default::default()
        }
    }
    pub fn is_triangle(&self) -> bool {
        self.corners[2] == self.corners[3]
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            10..=13 | 20..=23 | 30..=33 => {
                let index = (pair.code % 10) as usize;
                self.corners[index].set(pair)?;
            }
            70 if !self.zig_zag => self.edge_flags = pair.assert_i16()?,
            _ if self.zig_zag => return self.extrusion.apply(pair),
            _ => return Ok(false),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            10..=13 | 20..=23 | 30..=33 => self.corners[(code % 10) as usize]
                .get(code)
                .map(CodePairValue::Double),
            70 if !self.zig_zag => Some(CodePairValue::Short(self.edge_flags)),
            _ if self.zig_zag => self.extrusion.get(code),
            _ => None,
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        if self.zig_zag {
            self.extrusion.add_thickness(pairs);
        }
        for (i, corner) in self.corners.iter().enumerate() {
            corner.add_code_pairs(pairs, 10 + i as i32);
        }
        if self.zig_zag {
            self.extrusion.add_direction(pairs);
        } else if self.edge_flags != 0 {
            pairs.push(CodePair::new_i16(70, self.edge_flags));
        }
    }
    /// The outline as a single polygon in drawing order.
    pub fn extract_geometry(&self) -> Geometry {
        let c = &self.corners;
        let vertices = if self.is_triangle() {
            vec![c[0], c[1], c[2]]
        } else if self.zig_zag {
            vec![c[0], c[1], c[3], c[2]]
        } else {
            vec![c[0], c[1], c[2], c[3]]
        };
        let mut geometry = Geometry::new(GeometryKind::Polygons, vertices);
        if self.zig_zag {
            self.extrusion.apply_to(&mut geometry);
        }
        geometry
    }
}
