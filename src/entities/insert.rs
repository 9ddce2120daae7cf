// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::rc::Rc;

use crate::entities::generate_ucs;
use crate::{
    BlockId, CodePair, CodePairValue, DxfResult, Entity, Point, Registry, TransformationMatrix,
    Vector,
};

/// A placement of a block, optionally repeated over a grid of rows and columns.
///
/// The block is referenced by name.  The name is interned with the model's reference table and
/// resolved to a `BlockId` once the block is known, which may only happen after the whole file
/// has been read.
#[derive(Clone, Debug, PartialEq)]
pub struct Insert {
    pub attributes_follow: bool,
    block_name: Rc<str>,
    block: Option<BlockId>,
    pub location: Point,
    pub scale: Vector,
    /// Rotation about the Z axis, in degrees.
    pub rotation: f64,
    pub column_count: i16,
    pub row_count: i16,
    pub column_spacing: f64,
    pub row_spacing: f64,
    pub extrusion_direction: Vector,
    /// The ATTRIB entities owned by this insert.
    pub attributes: Vec<Entity>,
    pub seqend: Option<Box<Entity>>,
}

impl Default for Insert {
    fn default() -> Self {
        Insert {
            attributes_follow: false,
            block_name: Rc::from(""),
            block: None,
            location: Point::origin(),
            scale: Vector::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            column_count: 1,
            row_count: 1,
            column_spacing: 0.0,
            row_spacing: 0.0,
            extrusion_direction: Vector::z_axis(),
            attributes: vec![],
            seqend: None,
        }
    }
}

// public implementation
impl Insert {
    /// Creates an insert of the block `name` at `location`, registering the name with
    /// `registry`.
    pub fn new(registry: &mut Registry, name: &str, location: Point) -> Self {
        let mut insert = Insert {
            location,
            ..Default::default()
        };
        insert.set_block(registry, name);
        insert
    }
    pub fn block_name(&self) -> &str {
        &self.block_name
    }
    /// The interned block name, shared with the model's reference table.
    pub fn block_name_rc(&self) -> &Rc<str> {
        &self.block_name
    }
    /// The referenced block, or `None` if it has not been resolved.
    pub fn block(&self) -> Option<BlockId> {
        self.block
    }
    /// Points this insert at the block `name`.  The name is interned and resolved immediately
    /// if the block is already registered.
    pub fn set_block(&mut self, registry: &mut Registry, name: &str) {
        match registry.find_ref_string(name) {
            Some(interned) => {
                self.block = registry.find_reference(name);
                self.block_name = interned;
            }
            None => {
                // probably a forward reference; resolved once the block is read
                self.block = None;
                self.block_name = registry.add_reference(name, None);
            }
        }
    }
    /// The number of grid cells this insert places.
    pub fn cell_count(&self) -> usize {
        (self.row_count.max(0) as usize) * (self.column_count.max(0) as usize)
    }
    /// The transform from block coordinates to the coordinates this insert is placed in:
    /// extrusion UCS, then insertion point, then rotation and scale, then the block's base
    /// point moved to the origin.
    pub fn transform(&self, base_point: Point) -> TransformationMatrix {
        let mut m = TransformationMatrix::identity();
        if self.extrusion_direction != Vector::z_axis() {
            m.mult_right(&generate_ucs(self.extrusion_direction));
        }
        m.mult_right(&TransformationMatrix::translation(
            self.location.x,
            self.location.y,
            self.location.z,
        ));
        m.mult_right(&TransformationMatrix::rotation_z(self.rotation.to_radians()));
        m.mult_right(&TransformationMatrix::scale(
            self.scale.x,
            self.scale.y,
            self.scale.z,
        ));
        m.mult_right(&TransformationMatrix::translation(
            -base_point.x,
            -base_point.y,
            -base_point.z,
        ));
        m
    }
    /// The translation of the grid cell at `row` and `column`.
    pub fn cell_offset(&self, row: i16, column: i16) -> TransformationMatrix {
        TransformationMatrix::translation(
            f64::from(column) * self.column_spacing,
            f64::from(row) * self.row_spacing,
            0.0,
        )
    }
}

// internal visibility only
impl Insert {
    pub(crate) fn set_block_id(&mut self, block: Option<BlockId>) {
        self.block = block;
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            66 => self.attributes_follow = pair.assert_i16()? != 0,
            10 | 20 | 30 => self.location.set(pair)?,
            41 | 42 | 43 => match pair.code {
                41 => self.scale.x = pair.assert_f64()?,
                42 => self.scale.y = pair.assert_f64()?,
                _ => self.scale.z = pair.assert_f64()?,
            },
            44 => self.column_spacing = pair.assert_f64()?,
            45 => self.row_spacing = pair.assert_f64()?,
            50 => self.rotation = pair.assert_f64()?,
            70 => self.column_count = pair.assert_i16()?,
            71 => self.row_count = pair.assert_i16()?,
            210 | 220 | 230 => self.extrusion_direction.set(pair)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            2 => Some(CodePairValue::Str(String::from(self.block_name()))),
            66 => Some(CodePairValue::Short(if self.attributes_follow { 1 } else { 0 })),
            10 | 20 | 30 => self.location.get(code).map(CodePairValue::Double),
            41 => Some(CodePairValue::Double(self.scale.x)),
            42 => Some(CodePairValue::Double(self.scale.y)),
            43 => Some(CodePairValue::Double(self.scale.z)),
            44 => Some(CodePairValue::Double(self.column_spacing)),
            45 => Some(CodePairValue::Double(self.row_spacing)),
            50 => Some(CodePairValue::Double(self.rotation)),
            70 => Some(CodePairValue::Short(self.column_count)),
            71 => Some(CodePairValue::Short(self.row_count)),
            210 | 220 | 230 => self.extrusion_direction.get(code).map(CodePairValue::Double),
            _ => None,
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        if self.attributes_follow {
            pairs.push(CodePair::new_i16(66, 1));
        }
        pairs.push(CodePair::new_str(2, self.block_name()));
        self.location.add_code_pairs(pairs, 10);
        if self.scale != Vector::new(1.0, 1.0, 1.0) {
            pairs.push(CodePair::new_f64(41, self.scale.x));
            pairs.push(CodePair::new_f64(42, self.scale.y));
            pairs.push(CodePair::new_f64(43, self.scale.z));
        }
        if self.rotation != 0.0 {
            pairs.push(CodePair::new_f64(50, self.rotation));
        }
        if self.column_count != 1 {
            pairs.push(CodePair::new_i16(70, self.column_count));
        }
        if self.row_count != 1 {
            pairs.push(CodePair::new_i16(71, self.row_count));
        }
        if self.column_spacing != 0.0 {
            pairs.push(CodePair::new_f64(44, self.column_spacing));
        }
        if self.row_spacing != 0.0 {
            pairs.push(CodePair::new_f64(45, self.row_spacing));
        }
    }
    /// Written after the generic records.
    pub(crate) fn add_trailing_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        if self.extrusion_direction != Vector::z_axis() {
            self.extrusion_direction.add_code_pairs(pairs, 210);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn assert_point(expected: Point, actual: Point) {
        assert!(approx_eq!(f64, expected.x, actual.x, epsilon = 1e-9));
        assert!(approx_eq!(f64, expected.y, actual.y, epsilon = 1e-9));
        assert!(approx_eq!(f64, expected.z, actual.z, epsilon = 1e-9));
    }

    #[test]
    fn transform_applies_base_point_scale_rotation_then_location() {
        let mut registry = Registry::new();
        let mut insert = Insert::new(&mut registry, "B", Point::new(10.0, 0.0, 0.0));
        insert.scale = Vector::new(2.0, 2.0, 1.0);
        insert.rotation = 90.0;
        let m = insert.transform(Point::new(1.0, 0.0, 0.0));
        // (2,0) -> base (1,0) -> scale (2,0) -> rotate (0,2) -> move (10,2)
        assert_point(Point::new(10.0, 2.0, 0.0), m.transform_point(Point::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn flipped_extrusion_mirrors_x() {
        let mut registry = Registry::new();
        let mut insert = Insert::new(&mut registry, "B", Point::new(1.0, 0.0, 0.0));
        insert.extrusion_direction = Vector::new(0.0, 0.0, -1.0);
        let m = insert.transform(Point::origin());
        assert_point(Point::new(-2.0, 0.0, 0.0), m.transform_point(Point::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn set_block_resolves_known_blocks() {
        let mut registry = Registry::new();
        let defined = registry.add_block("DOOR", BlockId(3));
        let mut insert = Insert::default();
        insert.set_block(&mut registry, "DOOR");
        assert_eq!(Some(BlockId(3)), insert.block());
        assert!(Rc::ptr_eq(&defined, insert.block_name_rc()));

        insert.set_block(&mut registry, "WINDOW");
        assert_eq!(None, insert.block());
        assert_eq!("WINDOW", insert.block_name());
        assert!(registry.find_ref_string("WINDOW").is_some());
    }

    #[test]
    fn defaults_are_not_written() {
        let mut registry = Registry::new();
        let insert = Insert::new(&mut registry, "B", Point::origin());
        let mut pairs = vec![];
        insert.add_code_pairs(&mut pairs);
        insert.add_trailing_code_pairs(&mut pairs);
        assert_eq!(
            vec![
                CodePair::new_str(2, "B"),
                CodePair::new_f64(10, 0.0),
                CodePair::new_f64(20, 0.0),
                CodePair::new_f64(30, 0.0),
            ],
            pairs
        );
    }
}
