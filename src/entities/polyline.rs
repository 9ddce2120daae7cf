// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use enum_primitive::FromPrimitive;

use crate::entities::Extrusion;
use crate::enums::*;
use crate::{CodePair, CodePairValue, DxfResult, Entity, EntityType, Geometry, GeometryKind, Point};

pub const POLYLINE_CLOSED: i16 = 1;
pub const POLYLINE_CURVE_FIT_ADDED: i16 = 2;
pub const POLYLINE_SPLINE_FIT_ADDED: i16 = 4;
pub const POLYLINE_3D: i16 = 8;
pub const POLYLINE_POLYGON_MESH: i16 = 16;
pub const POLYLINE_MESH_CLOSED_N: i16 = 32;
pub const POLYLINE_POLYFACE_MESH: i16 = 64;

pub const VERTEX_SPLINE_FRAME_CONTROL_POINT: i16 = 16;
pub const VERTEX_POLYFACE_MESH: i16 = 64;
pub const VERTEX_FACE_RECORD: i16 = 128;

//------------------------------------------------------------------------------
//                                                                      Polyline
//------------------------------------------------------------------------------
/// A POLYLINE header.  Its VERTEX entities and the terminating SEQEND are owned by the
/// polyline and read and written with it.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub flags: i16,
    pub default_starting_width: f64,
    pub default_ending_width: f64,
    /// The M vertex count of a polygon mesh, or the vertex count of a polyface mesh.
    pub polygon_mesh_m_vertex_count: i16,
    /// The N vertex count of a polygon mesh, or the face count of a polyface mesh.
    pub polygon_mesh_n_vertex_count: i16,
    pub smooth_surface_m_density: i16,
    pub smooth_surface_n_density: i16,
    pub surface_type: PolylineCurvedAndSmoothSurfaceType,
    /// Only the Z value is meaningful; it is the elevation of a 2D polyline.
    pub elevation: Point,
    pub extrusion: Extrusion,
    pub vertices: Vec<Entity>,
    pub seqend: Option<Box<Entity>>,
}

impl Default for Polyline {
    fn default() -> Self {
        Polyline {
            flags: 0,
            default_starting_width: 0.0,
            default_ending_width: 0.0,
            polygon_mesh_m_vertex_count: 0,
            polygon_mesh_n_vertex_count: 0,
            smooth_surface_m_density: 0,
            smooth_surface_n_density: 0,
            surface_type: PolylineCurvedAndSmoothSurfaceType::None,
            elevation: Point::origin(),
            extrusion: Default::default(),
            vertices: vec![],
            seqend: None,
        }
    }
}

impl Polyline {
    pub fn is_closed(&self) -> bool {
        self.flags & POLYLINE_CLOSED != 0
    }
    pub fn is_3d_polyline(&self) -> bool {
        self.flags & POLYLINE_3D != 0
    }
    pub fn is_polygon_mesh(&self) -> bool {
        self.flags & POLYLINE_POLYGON_MESH != 0
    }
    pub fn is_polyface_mesh(&self) -> bool {
        self.flags & POLYLINE_POLYFACE_MESH != 0
    }
    /// Appends a VERTEX entity at `location`.
    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(Entity::new(EntityType::Vertex(vertex)));
    }
    /// The VERTEX records of this polyline, skipping anything else it owns.
    pub fn vertex_records(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter().filter_map(|e| match e.specific {
            EntityType::Vertex(ref v) if !e.is_deleted() => Some(v),
            _ => None,
        })
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            10 | 20 | 30 => self.elevation.set(pair)?,
            40 => self.default_starting_width = pair.assert_f64()?,
            41 => self.default_ending_width = pair.assert_f64()?,
            70 => self.flags = pair.assert_i16()?,
            71 => self.polygon_mesh_m_vertex_count = pair.assert_i16()?,
            72 => self.polygon_mesh_n_vertex_count = pair.assert_i16()?,
            73 => self.smooth_surface_m_density = pair.assert_i16()?,
            74 => self.smooth_surface_n_density = pair.assert_i16()?,
            75 => match PolylineCurvedAndSmoothSurfaceType::from_i16(pair.assert_i16()?) {
                Some(t) => self.surface_type = t,
                None => return Ok(false),
            },
            _ => return self.extrusion.apply(pair),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            10 | 20 | 30 => self.elevation.get(code).map(CodePairValue::Double),
            40 => Some(CodePairValue::Double(self.default_starting_width)),
            41 => Some(CodePairValue::Double(self.default_ending_width)),
            70 => Some(CodePairValue::Short(self.flags)),
            71 => Some(CodePairValue::Short(self.polygon_mesh_m_vertex_count)),
            72 => Some(CodePairValue::Short(self.polygon_mesh_n_vertex_count)),
            73 => Some(CodePairValue::Short(self.smooth_surface_m_density)),
            74 => Some(CodePairValue::Short(self.smooth_surface_n_density)),
            75 => Some(CodePairValue::Short(self.surface_type as i16)),
            _ => self.extrusion.get(code),
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        self.extrusion.add_thickness(pairs);
        self.elevation.add_code_pairs(pairs, 10);
        if self.flags != 0 {
            pairs.push(CodePair::new_i16(70, self.flags));
        }
        if self.default_starting_width != 0.0 {
            pairs.push(CodePair::new_f64(40, self.default_starting_width));
        }
        if self.default_ending_width != 0.0 {
            pairs.push(CodePair::new_f64(41, self.default_ending_width));
        }
        if self.polygon_mesh_m_vertex_count != 0 {
            pairs.push(CodePair::new_i16(71, self.polygon_mesh_m_vertex_count));
        }
        if self.polygon_mesh_n_vertex_count != 0 {
            pairs.push(CodePair::new_i16(72, self.polygon_mesh_n_vertex_count));
        }
        if self.smooth_surface_m_density != 0 {
            pairs.push(CodePair::new_i16(73, self.smooth_surface_m_density));
        }
        if self.smooth_surface_n_density != 0 {
            pairs.push(CodePair::new_i16(74, self.smooth_surface_n_density));
        }
        if self.surface_type != PolylineCurvedAndSmoothSurfaceType::None {
            pairs.push(CodePair::new_i16(75, self.surface_type as i16));
        }
        self.extrusion.add_direction(pairs);
    }
    /// Lines for plain polylines; indexed polygons for polyface and polygon meshes.
    pub fn extract_geometry(&self) -> Geometry {
        let mut geometry = if self.is_polyface_mesh() {
            self.polyface_geometry()
        } else if self.is_polygon_mesh() {
            self.polygon_mesh_geometry()
        } else {
            self.line_geometry()
        };
        if !self.is_3d_polyline() && !self.is_polygon_mesh() && !self.is_polyface_mesh() {
            self.extrusion.apply_to(&mut geometry);
        } else {
            geometry.thickness = self.extrusion.thickness;
        }
        geometry
    }
    fn line_geometry(&self) -> Geometry {
        let flat = !self.is_3d_polyline();
        let mut vertices: Vec<Point> = self
            .vertex_records()
            .filter(|v| v.flags & VERTEX_SPLINE_FRAME_CONTROL_POINT == 0)
            .map(|v| {
                let mut p = v.location;
                if flat {
                    p.z = self.elevation.z;
                }
                p
            })
            .collect();
        if vertices.is_empty() {
            return Geometry::none();
        }
        if self.is_closed() {
            vertices.push(vertices[0]);
        }
        Geometry::new(GeometryKind::Lines, vertices)
    }
    fn polyface_geometry(&self) -> Geometry {
        let mut vertices = vec![];
        let mut indices = vec![];
        for v in self.vertex_records() {
            if v.is_face_record() {
                let face: Vec<i32> = v
                    .indices
                    .iter()
                    .take_while(|i| **i != 0)
                    .map(|i| i32::from(i.abs()) - 1)
                    .collect();
                if face.len() >= 3 {
                    indices.extend(face);
                    indices.push(-1);
                }
            } else {
                vertices.push(v.location);
            }
        }
        if indices.is_empty() {
            return Geometry::none();
        }
        Geometry {
            indices,
            ..Geometry::new(GeometryKind::Polygons, vertices)
        }
    }
    fn polygon_mesh_geometry(&self) -> Geometry {
        let m = i32::from(self.polygon_mesh_m_vertex_count);
        let n = i32::from(self.polygon_mesh_n_vertex_count);
        let vertices: Vec<Point> = self.vertex_records().map(|v| v.location).collect();
        if m < 2 || n < 2 || vertices.len() < (m * n) as usize {
            return Geometry::none();
        }

        let closed_m = self.is_closed();
        let closed_n = self.flags & POLYLINE_MESH_CLOSED_N != 0;
        let rows = if closed_m { m } else { m - 1 };
        let columns = if closed_n { n } else { n - 1 };
        let mut indices = vec![];
        for i in 0..rows {
            let next_i = (i + 1) % m;
            for j in 0..columns {
                let next_j = (j + 1) % n;
                indices.push(i * n + j);
                indices.push(i * n + next_j);
                indices.push(next_i * n + next_j);
                indices.push(next_i * n + j);
                indices.push(-1);
            }
        }
        Geometry {
            indices,
            ..Geometry::new(GeometryKind::Polygons, vertices)
        }
    }
}

//------------------------------------------------------------------------------
//                                                                        Vertex
//------------------------------------------------------------------------------
/// A single VERTEX of a POLYLINE.  Polyface face records use `indices` (1-based, negative
/// for an invisible edge) instead of `location`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub location: Point,
    pub starting_width: f64,
    pub ending_width: f64,
    pub bulge: f64,
    pub flags: i16,
    pub curve_fit_tangent_direction: f64,
    pub indices: [i16; 4],
}

impl Vertex {
    pub fn new(location: Point) -> Self {
        Vertex {
            location,
            ..Default::default()
        }
    }
    /// A polyface face record referencing up to four vertices.
    pub fn new_face(indices: [i16; 4]) -> Self {
        Vertex {
            flags: VERTEX_FACE_RECORD,
            indices,
            ..Default::default()
        }
    }
    pub fn is_face_record(&self) -> bool {
        self.flags & VERTEX_FACE_RECORD != 0 && self.flags & VERTEX_POLYFACE_MESH == 0
    }
    /// The leading non-zero indices.
    pub fn num_indices(&self) -> usize {
        if !self.is_face_record() {
            return 0;
        }
        self.indices.iter().take_while(|i| **i != 0).count()
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            10 | 20 | 30 => self.location.set(pair)?,
            40 => self.starting_width = pair.assert_f64()?,
            41 => self.ending_width = pair.assert_f64()?,
            42 => self.bulge = pair.assert_f64()?,
            50 => self.curve_fit_tangent_direction = pair.assert_f64()?,
            70 => self.flags = pair.assert_i16()?,
            71..=74 => self.indices[(pair.code - 71) as usize] = pair.assert_i16()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            10 | 20 | 30 => self.location.get(code).map(CodePairValue::Double),
            40 => Some(CodePairValue::Double(self.starting_width)),
            41 => Some(CodePairValue::Double(self.ending_width)),
            42 => Some(CodePairValue::Double(self.bulge)),
            50 => Some(CodePairValue::Double(self.curve_fit_tangent_direction)),
            70 => Some(CodePairValue::Short(self.flags)),
            71..=74 => Some(CodePairValue::Short(self.indices[(code - 71) as usize])),
            _ => None,
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::new_i16(70, self.flags));
        self.location.add_code_pairs(pairs, 10);
        if self.starting_width != 0.0 {
            pairs.push(CodePair::new_f64(40, self.starting_width));
        }
        if self.ending_width != 0.0 {
            pairs.push(CodePair::new_f64(41, self.ending_width));
        }
        if self.bulge != 0.0 {
            pairs.push(CodePair::new_f64(42, self.bulge));
        }
        if self.curve_fit_tangent_direction != 0.0 {
            pairs.push(CodePair::new_f64(50, self.curve_fit_tangent_direction));
        }
        for i in 0..self.num_indices() {
            pairs.push(CodePair::new_i16(71 + i as i32, self.indices[i]));
        }
    }
    pub fn extract_geometry(&self) -> Geometry {
        if self.is_face_record() {
            return Geometry::none();
        }
        Geometry::new(GeometryKind::Points, vec![self.location])
    }
}

//------------------------------------------------------------------------------
//                                                                    LwPolyline
//------------------------------------------------------------------------------
/// Represents a single vertex of a `LwPolyline`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LwPolylineVertex {
    pub x: f64,
    pub y: f64,
    pub starting_width: f64,
    pub ending_width: f64,
    pub bulge: f64,
}

/// A lightweight polyline whose 2D vertices are stored inline.  The vertex count (code 90)
/// is derived from `vertices`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LwPolyline {
    pub flags: i16,
    pub constant_width: f64,
    pub elevation: f64,
    pub extrusion: Extrusion,
    pub vertices: Vec<LwPolylineVertex>,
}

impl LwPolyline {
    pub fn is_closed(&self) -> bool {
        self.flags & POLYLINE_CLOSED != 0
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            90 => (),
            70 => self.flags = pair.assert_i16()?,
            38 => self.elevation = pair.assert_f64()?,
            43 => self.constant_width = pair.assert_f64()?,
            // an X code starts a new vertex
            10 => self.vertices.push(LwPolylineVertex {
                x: pair.assert_f64()?,
                ..Default::default()
            }),
            20 | 40 | 41 | 42 => {
                let value = pair.assert_f64()?;
                match self.vertices.last_mut() {
                    Some(v) => match pair.code {
                        20 => v.y = value,
                        40 => v.starting_width = value,
                        41 => v.ending_width = value,
                        _ => v.bulge = value,
                    },
                    None => {
                        warn!("LWPOLYLINE vertex data (code {}) found before any vertex", pair.code);
                        return Ok(false);
                    }
                }
            }
            _ => return self.extrusion.apply(pair),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32, index: usize) -> Option<CodePairValue> {
        match code {
            90 => Some(CodePairValue::Integer(self.vertices.len() as i32)),
            70 => Some(CodePairValue::Short(self.flags)),
            38 => Some(CodePairValue::Double(self.elevation)),
            43 => Some(CodePairValue::Double(self.constant_width)),
            10 | 20 | 40 | 41 | 42 => self.vertices.get(index).map(|v| {
                CodePairValue::Double(match code {
                    10 => v.x,
                    20 => v.y,
                    40 => v.starting_width,
                    41 => v.ending_width,
                    _ => v.bulge,
                })
            }),
            _ => self.extrusion.get(code),
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::new_i32(90, self.vertices.len() as i32));
        if self.flags != 0 {
            pairs.push(CodePair::new_i16(70, self.flags));
        }
        if self.elevation != 0.0 {
            pairs.push(CodePair::new_f64(38, self.elevation));
        }
        if self.constant_width != 0.0 {
            pairs.push(CodePair::new_f64(43, self.constant_width));
        }
        self.extrusion.add_thickness(pairs);
        self.extrusion.add_direction(pairs);
    }
    /// Written after the generic records.
    pub(crate) fn add_vertex_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        for v in &self.vertices {
            pairs.push(CodePair::new_f64(10, v.x));
            pairs.push(CodePair::new_f64(20, v.y));
            if v.starting_width != 0.0 {
                pairs.push(CodePair::new_f64(40, v.starting_width));
            }
            if v.ending_width != 0.0 {
                pairs.push(CodePair::new_f64(41, v.ending_width));
            }
            if v.bulge != 0.0 {
                pairs.push(CodePair::new_f64(42, v.bulge));
            }
        }
    }
    pub fn extract_geometry(&self) -> Geometry {
        let mut vertices: Vec<Point> = self
            .vertices
            .iter()
            .map(|v| Point::new(v.x, v.y, self.elevation))
            .collect();
        if vertices.is_empty() {
            return Geometry::none();
        }
        if self.is_closed() {
            vertices.push(vertices[0]);
        }
        let mut geometry = Geometry::new(GeometryKind::Lines, vertices);
        self.extrusion.apply_to(&mut geometry);
        geometry
    }
}
