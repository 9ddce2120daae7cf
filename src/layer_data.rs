// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::collections::HashMap;

use itertools::Itertools;

use crate::{Point, TransformationMatrix};

/// Vertices stored once each, looked up by exact coordinates.
#[derive(Clone, Debug, Default)]
struct VertexSet {
    vertices: Vec<Point>,
    lookup: HashMap<[u64; 3], i32>,
}

impl VertexSet {
    fn index_of(&mut self, p: Point) -> i32 {
        // -0.0 and 0.0 are the same vertex
        let key = [
            (p.x + 0.0).to_bits(),
            (p.y + 0.0).to_bits(),
            (p.z + 0.0).to_bits(),
        ];
        let vertices = &mut self.vertices;
        *self.lookup.entry(key).or_insert_with(|| {
            vertices.push(p);
            (vertices.len() - 1) as i32
        })
    }
}

/// The world space geometry collected for one color: points, line segments, and faces.
///
/// Lines and faces index into their own vertex lists; each face index list is terminated by
/// `-1`.  With fill mode off, faces are added as their outlines.
#[derive(Clone, Debug)]
pub struct LayerData {
    color_index: i16,
    fill_mode: bool,
    points: Vec<Point>,
    line_vertices: VertexSet,
    line_indices: Vec<i32>,
    face_vertices: VertexSet,
    face_indices: Vec<i32>,
}

// public implementation
impl LayerData {
    pub fn new(color_index: i16, fill_mode: bool) -> Self {
        LayerData {
            color_index,
            fill_mode,
            points: vec![],
            line_vertices: Default::default(),
            line_indices: vec![],
            face_vertices: Default::default(),
            face_indices: vec![],
        }
    }
    /// The color number, 1 through 255, everything in this layer data is drawn with.
    pub fn color_index(&self) -> i16 {
        self.color_index
    }
    pub fn fill_mode(&self) -> bool {
        self.fill_mode
    }
    pub fn set_fill_mode(&mut self, fill_mode: bool) {
        self.fill_mode = fill_mode;
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.line_indices.is_empty() && self.face_indices.is_empty()
    }

    pub fn add_point(&mut self, p: Point, matrix: Option<&TransformationMatrix>) {
        self.points.push(transform(p, matrix));
    }
    /// Adds the segment `v0`-`v1`.  Zero length segments are dropped.
    pub fn add_line(&mut self, v0: Point, v1: Point, matrix: Option<&TransformationMatrix>) {
        let i0 = self.line_vertices.index_of(transform(v0, matrix));
        let i1 = self.line_vertices.index_of(transform(v1, matrix));
        if i0 != i1 {
            self.line_indices.push(i0);
            self.line_indices.push(i1);
        }
    }
    pub fn add_triangle(
        &mut self,
        v0: Point,
        v1: Point,
        v2: Point,
        matrix: Option<&TransformationMatrix>,
    ) {
        self.add_polygon(&[v0, v1, v2], matrix);
    }
    pub fn add_quad(
        &mut self,
        v0: Point,
        v1: Point,
        v2: Point,
        v3: Point,
        matrix: Option<&TransformationMatrix>,
    ) {
        self.add_polygon(&[v0, v1, v2, v3], matrix);
    }
    /// Adds a convex polygon.  Triangles and quads are kept whole; larger polygons are split
    /// into a triangle fan.  Repeated corners are collapsed, and a polygon that collapses to
    /// a segment is added as a line.
    pub fn add_polygon(&mut self, vertices: &[Point], matrix: Option<&TransformationMatrix>) {
        let mut corners: Vec<Point> = vertices
            .iter()
            .map(|v| transform(*v, matrix))
            .dedup()
            .collect();
        while corners.len() > 1 && corners.first() == corners.last() {
            corners.pop();
        }

        if !self.fill_mode || corners.len() < 3 {
            self.add_outline(&corners);
            return;
        }

        if corners.len() <= 4 {
            self.add_face(&corners);
        } else {
            let first = corners[0];
            for (b, c) in corners[1..].iter().tuple_windows() {
                self.add_face(&[first, *b, *c]);
            }
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn line_vertices(&self) -> &[Point] {
        &self.line_vertices.vertices
    }
    /// Pairs of indices into `line_vertices`.
    pub fn line_indices(&self) -> &[i32] {
        &self.line_indices
    }
    pub fn face_vertices(&self) -> &[Point] {
        &self.face_vertices.vertices
    }
    /// Indices into `face_vertices`, `-1` after each face.
    pub fn face_indices(&self) -> &[i32] {
        &self.face_indices
    }
    /// Every line segment as a pair of points.
    pub fn lines(&self) -> Vec<(Point, Point)> {
        let vertices = self.line_vertices();
        self.line_indices
            .iter()
            .tuples()
            .map(|(a, b)| (vertices[*a as usize], vertices[*b as usize]))
            .collect()
    }
    /// Every face as its corner points.
    pub fn faces(&self) -> Vec<Vec<Point>> {
        let vertices = self.face_vertices();
        self.face_indices
            .split(|i| *i < 0)
            .filter(|face| !face.is_empty())
            .map(|face| face.iter().map(|i| vertices[*i as usize]).collect())
            .collect()
    }
}

// private implementation
impl LayerData {
    fn add_face(&mut self, corners: &[Point]) {
        for corner in corners {
            let index = self.face_vertices.index_of(*corner);
            self.face_indices.push(index);
        }
        self.face_indices.push(-1);
    }
    /// Corners are already transformed.
    fn add_outline(&mut self, corners: &[Point]) {
        match corners.len() {
            0 => (),
            1 => self.points.push(corners[0]),
            2 => self.add_line(corners[0], corners[1], None),
            _ => {
                for (a, b) in corners.iter().circular_tuple_windows() {
                    self.add_line(*a, *b, None);
                }
            }
        }
    }
}

fn transform(p: Point, matrix: Option<&TransformationMatrix>) -> Point {
    match matrix {
        Some(m) => m.transform_point(p),
        None => p,
    }
}
