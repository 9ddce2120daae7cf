// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::{Point, Vector};

/// The kind of primitive an entity flattens to.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GeometryKind {
    /// The entity has no drawable geometry.
    None,
    Points,
    /// A single line strip, or several strips when indices are present.
    Lines,
    /// A single polygon, or several faces when indices are present.
    Polygons,
}

/// The flattened geometry of a single entity, in the entity's own coordinate system.
///
/// When `indices` is empty the vertices form one strip or polygon in order.  Otherwise each
/// run of indices, terminated by `-1`, describes one strip or face.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Geometry {
    pub kind: GeometryKind,
    pub vertices: Vec<Point>,
    pub indices: Vec<i32>,
    pub extrusion_direction: Vector,
    pub thickness: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            kind: GeometryKind::None,
            vertices: vec![],
            indices: vec![],
            extrusion_direction: Vector::z_axis(),
            thickness: 0.0,
        }
    }
}

impl Geometry {
    /// Geometry for an entity that has nothing to draw.
    pub fn none() -> Self {
        Default::default()
    }
    pub fn new(kind: GeometryKind, vertices: Vec<Point>) -> Self {
        Geometry {
            kind,
            vertices,
            ..Default::default()
        }
    }
    pub fn is_empty(&self) -> bool {
        self.kind == GeometryKind::None || self.vertices.is_empty()
    }
    /// The vertex runs described by this geometry: either every vertex in order, or one run
    /// per `-1` terminated index list.  Out of range indices are dropped.
    pub fn runs(&self) -> Vec<Vec<Point>> {
        if self.indices.is_empty() {
            if self.vertices.is_empty() {
                return vec![];
            }
            return vec![self.vertices.clone()];
        }

        let mut runs = vec![];
        let mut current = vec![];
        for &index in &self.indices {
            if index < 0 {
                if !current.is_empty() {
                    runs.push(current);
                    current = vec![];
                }
            } else if let Some(p) = self.vertices.get(index as usize) {
                current.push(*p);
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }

        runs
    }
}
