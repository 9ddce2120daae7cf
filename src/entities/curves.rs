// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::f64::consts::PI;

use crate::entities::Extrusion;
use crate::{CodePair, CodePairValue, DxfResult, Geometry, GeometryKind, Point, Vector};

/// Segments used for a full circle.
pub const CIRCLE_SEGMENTS: usize = 16;

/// The most points used for an arc or elliptical arc.
pub const ARC_MAX_POINTS: usize = 20;

const ARC_SUBCLASS: &str = "AcDbArc";

//------------------------------------------------------------------------------
//                                                                          Line
//------------------------------------------------------------------------------
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
    pub extrusion: Extrusion,
}

impl Line {
    pub fn new(p1: Point, p2: Point) -> Self {
        Line {
            p1,
            p2,
            ..Default::default()
        }
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            10 | 20 | 30 => self.p1.set(pair)?,
            11 | 21 | 31 => self.p2.set(pair)?,
            _ => return self.extrusion.apply(pair),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            10 | 20 | 30 => self.p1.get(code).map(CodePairValue::Double),
            11 | 21 | 31 => self.p2.get(code).map(CodePairValue::Double),
            _ => self.extrusion.get(code),
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        self.extrusion.add_thickness(pairs);
        self.p1.add_code_pairs(pairs, 10);
        self.p2.add_code_pairs(pairs, 11);
        self.extrusion.add_direction(pairs);
    }
    pub fn extract_geometry(&self) -> Geometry {
        let mut geometry = Geometry::new(GeometryKind::Lines, vec![self.p1, self.p2]);
        self.extrusion.apply_to(&mut geometry);
        geometry
    }
}

//------------------------------------------------------------------------------
//                                                                           Arc
//------------------------------------------------------------------------------
/// A circular arc; angles are in degrees, counter-clockwise from `start_angle` to `end_angle`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub extrusion: Extrusion,
}

impl Arc {
    pub fn new(center: Point, radius: f64, start: f64, end: f64) -> Self {
        Arc {
            center,
            radius,
            start_angle: start,
            end_angle: end,
            ..Default::default()
        }
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            10 | 20 | 30 => self.center.set(pair)?,
            40 => self.radius = pair.assert_f64()?,
            50 => self.start_angle = pair.assert_f64()?,
            51 => self.end_angle = pair.assert_f64()?,
            // the arc subclass marker is always written back before the angles
            100 => return Ok(pair.as_str() == Some(ARC_SUBCLASS)),
            _ => return self.extrusion.apply(pair),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            10 | 20 | 30 => self.center.get(code).map(CodePairValue::Double),
            40 => Some(CodePairValue::Double(self.radius)),
            50 => Some(CodePairValue::Double(self.start_angle)),
            51 => Some(CodePairValue::Double(self.end_angle)),
            _ => self.extrusion.get(code),
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        self.extrusion.add_thickness(pairs);
        self.center.add_code_pairs(pairs, 10);
        pairs.push(CodePair::new_f64(40, self.radius));
        pairs.push(CodePair::new_str(100, ARC_SUBCLASS));
        pairs.push(CodePair::new_f64(50, self.start_angle));
        pairs.push(CodePair::new_f64(51, self.end_angle));
        self.extrusion.add_direction(pairs);
    }
    /// The arc as a line strip.  An arc whose start and end angles match is a full circle.
    pub fn extract_geometry(&self) -> Geometry {
        let start = self.start_angle.to_radians();
        let mut end = self.end_angle;
        if end < self.start_angle {
            end += 360.0;
        }
        let mut degrees = end - self.start_angle;
        if degrees == 0.0 {
            degrees = 360.0;
        }
        let delta = degrees.to_radians();

        // the fraction of a full circle covered decides how many of the points are spent
        let parts = ((360.0 / degrees).abs() as usize).max(1);
        let count = (ARC_MAX_POINTS / parts + 1).min(ARC_MAX_POINTS);
        let increment = delta / count as f64;
        let mut vertices: Vec<Point> = (0..count)
            .map(|i| point_on_circle(self.center, self.radius, start + increment * i as f64))
            .collect();
        vertices.push(point_on_circle(self.center, self.radius, start + delta));

        let mut geometry = Geometry::new(GeometryKind::Lines, vertices);
        self.extrusion.apply_to(&mut geometry);
        geometry
    }
}

//------------------------------------------------------------------------------
//                                                                        Circle
//------------------------------------------------------------------------------
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub extrusion: Extrusion,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Circle {
            center,
            radius,
            ..Default::default()
        }
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            10 | 20 | 30 => self.center.set(pair)?,
            40 => self.radius = pair.assert_f64()?,
            _ => return self.extrusion.apply(pair),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            10 | 20 | 30 => self.center.get(code).map(CodePairValue::Double),
            40 => Some(CodePairValue::Double(self.radius)),
            _ => self.extrusion.get(code),
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        self.extrusion.add_thickness(pairs);
        self.center.add_code_pairs(pairs, 10);
        pairs.push(CodePair::new_f64(40, self.radius));
        self.extrusion.add_direction(pairs);
    }
    /// A closed strip of `CIRCLE_SEGMENTS` segments; a circle with thickness is a cylinder
    /// wall and is reported as polygons.
    pub fn extract_geometry(&self) -> Geometry {
        let increment = 2.0 * PI / CIRCLE_SEGMENTS as f64;
        let mut vertices: Vec<Point> = (0..CIRCLE_SEGMENTS)
            .map(|i| point_on_circle(self.center, self.radius, increment * i as f64))
            .collect();
        vertices.push(vertices[0]);

        let kind = if self.extrusion.thickness == 0.0 {
            GeometryKind::Lines
        } else {
            GeometryKind::Polygons
        };
        let mut geometry = Geometry::new(kind, vertices);
        self.extrusion.apply_to(&mut geometry);
        geometry
    }
}

//------------------------------------------------------------------------------
//                                                                       Ellipse
//------------------------------------------------------------------------------
/// An ellipse or elliptical arc.  `major_axis` is relative to `center`; parameters are in
/// radians.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Ellipse {
    pub center: Point,
    pub major_axis: Vector,
    pub minor_axis_ratio: f64,
    pub start_parameter: f64,
    pub end_parameter: f64,
    pub extrusion: Extrusion,
}

impl Default for Ellipse {
    fn default() -> Self {
        Ellipse {
            center: Point::origin(),
            major_axis: Vector::x_axis(),
            minor_axis_ratio: 1.0,
            start_parameter: 0.0,
            end_parameter: 2.0 * PI,
            extrusion: Default::default(),
        }
    }
}

impl Ellipse {
    pub fn new(center: Point, major_axis: Vector, minor_axis_ratio: f64) -> Self {
        Ellipse {
            center,
            major_axis,
            minor_axis_ratio,
            ..Default::default()
        }
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            10 | 20 | 30 => self.center.set(pair)?,
            11 | 21 | 31 => self.major_axis.set(pair)?,
            40 => self.minor_axis_ratio = pair.assert_f64()?,
            41 => self.start_parameter = pair.assert_f64()?,
            42 => self.end_parameter = pair.assert_f64()?,
            _ => return self.extrusion.apply(pair),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            10 | 20 | 30 => self.center.get(code).map(CodePairValue::Double),
            11 | 21 | 31 => self.major_axis.get(code).map(CodePairValue::Double),
            40 => Some(CodePairValue::Double(self.minor_axis_ratio)),
            41 => Some(CodePairValue::Double(self.start_parameter)),
            42 => Some(CodePairValue::Double(self.end_parameter)),
            _ => self.extrusion.get(code),
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        self.center.add_code_pairs(pairs, 10);
        self.major_axis.add_code_pairs(pairs, 11);
        self.extrusion.add_direction(pairs);
        pairs.push(CodePair::new_f64(40, self.minor_axis_ratio));
        pairs.push(CodePair::new_f64(41, self.start_parameter));
        pairs.push(CodePair::new_f64(42, self.end_parameter));
    }
    pub fn is_closed(&self) -> bool {
        let span = self.end_parameter - self.start_parameter;
        span == 0.0 || (span.abs() - 2.0 * PI).abs() < 1e-9
    }
    /// The ellipse as a line strip, sampled evenly by parameter.
    pub fn extract_geometry(&self) -> Geometry {
        let mut end = self.end_parameter;
        if end <= self.start_parameter {
            end += 2.0 * PI;
        }
        let delta = end - self.start_parameter;
        let parts = ((2.0 * PI / delta).abs() as usize).max(1);
        let count = if self.is_closed() {
            CIRCLE_SEGMENTS
        } else {
            (ARC_MAX_POINTS / parts + 1).min(ARC_MAX_POINTS)
        };

        let minor_axis = self
            .extrusion
            .direction
            .normalize()
            .cross(&self.major_axis);
        let minor_axis = Vector::new(
            minor_axis.x * self.minor_axis_ratio,
            minor_axis.y * self.minor_axis_ratio,
            minor_axis.z * self.minor_axis_ratio,
        );
        let increment = delta / count as f64;
        let vertices: Vec<Point> = (0..=count)
            .map(|i| {
                let (sin, cos) = (self.start_parameter + increment * i as f64).sin_cos();
                Point::new(
                    self.center.x + self.major_axis.x * cos + minor_axis.x * sin,
                    self.center.y + self.major_axis.y * cos + minor_axis.y * sin,
                    self.center.z + self.major_axis.z * cos + minor_axis.z * sin,
                )
            })
            .collect();

        // the ellipse axes are already in world space
        Geometry {
            thickness: self.extrusion.thickness,
            ..Geometry::new(GeometryKind::Lines, vertices)
        }
    }
}

//------------------------------------------------------------------------------
//                                                                    ModelPoint
//------------------------------------------------------------------------------
/// A POINT entity.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ModelPoint {
    pub location: Point,
    pub angle: f64,
    pub extrusion: Extrusion,
}

impl ModelPoint {
    pub fn new(p: Point) -> Self {
        ModelPoint {
            location: p,
            ..Default::default()
        }
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            10 | 20 | 30 => self.location.set(pair)?,
            50 => self.angle = pair.assert_f64()?,
            _ => return self.extrusion.apply(pair),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            10 | 20 | 30 => self.location.get(code).map(CodePairValue::Double),
            50 => Some(CodePairValue::Double(self.angle)),
            _ => self.extrusion.get(code),
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        self.extrusion.add_thickness(pairs);
        self.location.add_code_pairs(pairs, 10);
        self.extrusion.add_direction(pairs);
        if self.angle != 0.0 {
            pairs.push(CodePair::new_f64(50, self.angle));
        }
    }
    pub fn extract_geometry(&self) -> Geometry {
        let mut geometry = Geometry::new(GeometryKind::Points, vec![self.location]);
        self.extrusion.apply_to(&mut geometry);
        geometry
    }
}

fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(center.x + radius * cos, center.y + radius * sin, center.z)
}
