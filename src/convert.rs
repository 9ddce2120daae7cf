// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::f64::consts::PI;

use itertools::Itertools;

use crate::entities::{generate_ucs, CIRCLE_SEGMENTS};
use crate::entity::{COLOR_BYBLOCK, COLOR_BYLAYER};
use crate::layer::DEFAULT_LAYER_COLOR;
use crate::{
    CodePairValue, Entity, EntityType, Geometry, GeometryKind, LayerData, Model, Point, State,
    TransformationMatrix, TraversalFlags, Vector, Visit,
};

const COLOR_COUNT: usize = 255;

/// Curves are never split into more segments than this.
const MAX_CURVE_SEGMENTS: usize = 1024;

/// Options for `Converter`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConverterSettings {
    /// The largest distance allowed between a curve and its segments.
    pub max_error: f64,
    /// Segments per full circle; when positive this overrides `max_error`.
    pub num_sub: i32,
    /// Whether faces are filled.  Replaced by the drawing's `$FILLMODE` when present.
    pub fill_mode: bool,
    /// Color every entity by its layer, ignoring the entity's own color.
    pub layer_color: bool,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        ConverterSettings {
            max_error: 0.1,
            num_sub: -1,
            fill_mode: true,
            layer_color: false,
        }
    }
}

/// Flattens a model into world space points, lines, and faces grouped by color.
///
/// Inserts are exploded, so every entity is converted once for each place it appears.
#[derive(Clone, Debug)]
pub struct Converter {
    settings: ConverterSettings,
    layer_data: Vec<Option<LayerData>>,
}

// public implementation
impl Converter {
    pub fn new(settings: ConverterSettings) -> Self {
        Converter {
            settings,
            layer_data: vec![None; COLOR_COUNT],
        }
    }
    pub fn settings(&self) -> &ConverterSettings {
        &self.settings
    }
    /// Reads the header variables that affect conversion.  Called by `convert`.
    pub fn find_header_variables(&mut self, model: &Model) {
        if let Some(header) = model.header() {
            match header.get_value("$FILLMODE") {
                Some(CodePairValue::Short(v)) => self.settings.fill_mode = v != 0,
                Some(CodePairValue::Integer(v)) => self.settings.fill_mode = v != 0,
                _ => (),
            }
        }
    }
    /// Converts every entity of the model's ENTITIES section.  Returns `Visit::Stop` only if
    /// the traversal was cut short.
    pub fn convert(&mut self, model: &Model) -> Visit {
        self.find_header_variables(model);
        model.traverse_entities(false, TraversalFlags::EXPLODE_INSERTS, |state, entity| {
            self.convert_entity(model, state, entity);
            Visit::Continue
        })
    }
    /// Adds one entity, already placed by `state`, to the layer data of its color.
    pub fn convert_entity(&mut self, model: &Model, state: &State, entity: &Entity) {
        let geometry = self.entity_geometry(entity);
        if geometry.is_empty() {
            return;
        }

        let mut matrix = *state.matrix();
        let in_object_coordinates = match entity.specific {
            EntityType::Line(_) | EntityType::ModelPoint(_) => false,
            _ => geometry.extrusion_direction != Vector::z_axis(),
        };
        if in_object_coordinates {
            matrix.mult_right(&generate_ucs(geometry.extrusion_direction));
        }
        let extrusion = if geometry.thickness == 0.0 {
            None
        } else if in_object_coordinates {
            Some(Vector::new(0.0, 0.0, geometry.thickness))
        } else {
            let d = geometry.extrusion_direction.normalize();
            Some(Vector::new(
                d.x * geometry.thickness,
                d.y * geometry.thickness,
                d.z * geometry.thickness,
            ))
        };

        let color = self.color_index(model, state, entity);
        let fill_mode = self.settings.fill_mode;
        let data = self.layer_data_mut(color, fill_mode);
        for run in geometry.runs() {
            match geometry.kind {
                GeometryKind::Points => add_points(data, &run, extrusion, &matrix),
                GeometryKind::Lines => add_lines(data, &run, extrusion, &matrix),
                GeometryKind::Polygons => add_polygon(data, &run, extrusion, &matrix),
                GeometryKind::None => (),
            }
        }
    }
    /// The color, 1 through 255, `entity` is drawn with.
    pub fn color_index(&self, model: &Model, state: &State, entity: &Entity) -> i16 {
        let color = if self.settings.layer_color {
            layer_color(model, entity)
        } else {
            match entity.color_number() {
                COLOR_BYLAYER => layer_color(model, entity),
                COLOR_BYBLOCK => match state.current_insert() {
                    Some(insert) if insert.color_number() == COLOR_BYLAYER => {
                        layer_color(model, insert)
                    }
                    Some(insert) if insert.color_number() != COLOR_BYBLOCK => {
                        insert.color_number()
                    }
                    _ => DEFAULT_LAYER_COLOR,
                },
                c => c,
            }
        };

        // negative colors mark layers that are turned off
        let color = color.saturating_abs();
        if color < 1 || color as usize > COLOR_COUNT {
            warn!("illegal color number {}, using {}", color, DEFAULT_LAYER_COLOR);
            return DEFAULT_LAYER_COLOR;
        }
        color
    }
    /// The geometry collected for `color_index`, if any was added.
    pub fn layer_data(&self, color_index: i16) -> Option<&LayerData> {
        if color_index < 1 {
            return None;
        }
        self.layer_data
            .get(color_index as usize - 1)
            .and_then(|d| d.as_ref())
    }
    /// Every color that received geometry, lowest color first.
    pub fn layers(&self) -> impl Iterator<Item = &LayerData> {
        self.layer_data.iter().filter_map(|d| d.as_ref())
    }
}

// private implementation
impl Converter {
    fn layer_data_mut(&mut self, color_index: i16, fill_mode: bool) -> &mut LayerData {
        let slot = &mut self.layer_data[color_index as usize - 1];
        slot.get_or_insert_with(|| LayerData::new(color_index, fill_mode))
    }
    /// The entity's geometry, with circles and arcs split according to the settings.
    fn entity_geometry(&self, entity: &Entity) -> Geometry {
        let mut geometry = entity.extract_geometry();
        match entity.specific {
            EntityType::Circle(ref circle) => {
                geometry.vertices = self.arc_points(circle.center, circle.radius, 0.0, 2.0 * PI);
            }
            EntityType::Arc(ref arc) => {
                let mut sweep = arc.end_angle - arc.start_angle;
                if sweep <= 0.0 {
                    sweep += 360.0;
                }
                geometry.vertices = self.arc_points(
                    arc.center,
                    arc.radius,
                    arc.start_angle.to_radians(),
                    sweep.to_radians(),
                );
            }
            _ => (),
        }
        geometry
    }
    fn arc_points(&self, center: Point, radius: f64, start: f64, sweep: f64) -> Vec<Point> {
        let fraction = sweep / (2.0 * PI);
        let segments = if self.settings.num_sub > 0 {
            (f64::from(self.settings.num_sub) * fraction).ceil()
        } else if self.settings.max_error > 0.0 && self.settings.max_error < radius {
            let step = 2.0 * (1.0 - self.settings.max_error / radius).acos();
            (sweep / step).ceil()
        } else {
            (CIRCLE_SEGMENTS as f64 * fraction).ceil()
        };
        let minimum = if fraction >= 1.0 { 3 } else { 1 };
        let segments = (segments as usize).max(minimum).min(MAX_CURVE_SEGMENTS);

        let increment = sweep / segments as f64;
        let mut points: Vec<Point> = (0..=segments)
            .map(|i| {
                let (sin, cos) = (start + increment * i as f64).sin_cos();
                Point::new(center.x + radius * cos, center.y + radius * sin, center.z)
            })
            .collect();
        if fraction >= 1.0 {
            points[segments] = points[0];
        }
        points
    }
}

fn layer_color(model: &Model, entity: &Entity) -> i16 {
    model
        .get_layer(entity.layer())
        .map_or(DEFAULT_LAYER_COLOR, |l| l.color_number)
}

fn offset(p: Point, v: Vector) -> Point {
    Point::new(p.x + v.x, p.y + v.y, p.z + v.z)
}

fn add_points(
    data: &mut LayerData,
    points: &[Point],
    extrusion: Option<Vector>,
    matrix: &TransformationMatrix,
) {
    for p in points {
        match extrusion {
            Some(e) => data.add_line(*p, offset(*p, e), Some(matrix)),
            None => data.add_point(*p, Some(matrix)),
        }
    }
}

/// A line strip; with thickness every segment becomes a wall.
fn add_lines(
    data: &mut LayerData,
    strip: &[Point],
    extrusion: Option<Vector>,
    matrix: &TransformationMatrix,
) {
    for (a, b) in strip.iter().tuple_windows() {
        match extrusion {
            Some(e) => data.add_quad(*a, *b, offset(*b, e), offset(*a, e), Some(matrix)),
            None => data.add_line(*a, *b, Some(matrix)),
        }
    }
}

/// A polygon; with thickness it becomes a prism with both caps.
fn add_polygon(
    data: &mut LayerData,
    polygon: &[Point],
    extrusion: Option<Vector>,
    matrix: &TransformationMatrix,
) {
    match extrusion {
        None => data.add_polygon(polygon, Some(matrix)),
        Some(e) => {
            let top: Vec<Point> = polygon.iter().map(|p| offset(*p, e)).collect();
            for ((a, ta), (b, tb)) in polygon.iter().zip(&top).circular_tuple_windows() {
                if a != b {
                    data.add_quad(*a, *b, *tb, *ta, Some(matrix));
                }
            }
            data.add_polygon(polygon, Some(matrix));
            data.add_polygon(&top, Some(matrix));
        }
    }
}
