// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::code_pair_put_back::CodePairPutBack;
use crate::entities::*;
use crate::layer::DEFAULT_LAYER_COLOR;
use crate::record_holder::read_records;
use crate::{
    CodePair, CodePairValue, DxfError, DxfResult, Geometry, Handle, LayerId, RecordHolder,
    Registry,
};

pub const ENTITY_DELETED: u32 = 0x1;
pub const ENTITY_VERTICES_FOLLOW: u32 = 0x4;
pub const ENTITY_TAGGED: u32 = 0x8;
pub const ENTITY_COLOR_NUMBER: u32 = 0x10;
pub const ENTITY_SUBCLASS_MARKER: u32 = 0x20;
pub const ENTITY_HANDLE: u32 = 0x40;
pub const ENTITY_ACAD_REACTORS: u32 = 0x80;
pub const ENTITY_ACAD_XDICTIONARY: u32 = 0x100;
pub const ENTITY_PAPERSPACE: u32 = 0x200;
pub const ENTITY_LINETYPE: u32 = 0x400;

/// The color number meaning "use the color of the enclosing INSERT".
pub const COLOR_BYBLOCK: i16 = 0;
/// The color number meaning "use the color of the entity's layer".
pub const COLOR_BYLAYER: i16 = 256;

//------------------------------------------------------------------------------
//                                                                  EntityCommon
//------------------------------------------------------------------------------
/// The values every entity carries, plus the generic records kept for round tripping.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityCommon {
    pub layer: LayerId,
    pub color_number: i16,
    /// `ENTITY_*` flags.
    pub flags: u32,
    pub(crate) records: Vec<CodePair>,
}

impl Default for EntityCommon {
    fn default() -> Self {
        EntityCommon {
            layer: LayerId(0),
            color_number: COLOR_BYLAYER,
            flags: 0,
            records: vec![],
        }
    }
}

impl EntityCommon {
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
    pub fn set_flag(&mut self, flag: u32, value: bool) {
        if value {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
    /// The handle from the code 5 record, if present.
    pub fn handle(&self) -> Option<Handle> {
        self.records
            .iter()
            .find(|r| r.code == 5)
            .and_then(|r| r.as_str())
            .and_then(Handle::parse)
    }
    /// Consumes the color; notes which optional groups were present but keeps them as
    /// generic records.
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            62 => {
                self.color_number = pair.assert_i16()?;
                self.flags |= ENTITY_COLOR_NUMBER;
                return Ok(true);
            }
            5 => self.flags |= ENTITY_HANDLE,
            6 => self.flags |= ENTITY_LINETYPE,
            66 => self.flags |= ENTITY_VERTICES_FOLLOW,
            67 => {
                if pair.assert_i16()? != 0 {
                    self.flags |= ENTITY_PAPERSPACE;
                }
            }
            100 => self.flags |= ENTITY_SUBCLASS_MARKER,
            102 => match pair.as_str() {
                Some("{ACAD_REACTORS") => self.flags |= ENTITY_ACAD_REACTORS,
                Some("{ACAD_XDICTIONARY") => self.flags |= ENTITY_ACAD_XDICTIONARY,
                _ => (),
            },
            _ => (),
        }
        Ok(false)
    }
    /// Handles the codes whose values must be registered with the model.
    pub(crate) fn apply_read(&mut self, pair: &CodePair, registry: &mut Registry) -> DxfResult<bool> {
        match pair.code {
            8 => {
                let name = pair.assert_string()?;
                self.layer = registry.add_layer(&name, DEFAULT_LAYER_COLOR, 0);
                Ok(true)
            }
            5 => {
                if let Some(handle) = pair.as_str().and_then(Handle::parse) {
                    registry.register_handle(handle);
                }
                self.apply(pair)
            }
            _ => self.apply(pair),
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>, registry: &Registry) {
        pairs.push(CodePair::new_str(8, registry.layer_name(self.layer)));
        if self.has_flag(ENTITY_COLOR_NUMBER) {
            pairs.push(CodePair::new_i16(62, self.color_number));
        }
    }
}

//------------------------------------------------------------------------------
//                                                                    EntityType
//------------------------------------------------------------------------------
#[derive(Clone, Debug, PartialEq)]
pub enum EntityType {
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    ModelPoint(ModelPoint),
    Solid(Face),
    Trace(Face),
    Face3D(Face),
    Polyline(Polyline),
    Vertex(Vertex),
    LwPolyline(LwPolyline),
    Insert(Insert),
    Text(Text),
    Spline(Spline),
    Seqend,
    EndBlock,
    /// Any other entity, kept verbatim as generic records.
    Unknown(String),
}

impl EntityType {
    pub fn from_type_string(type_string: &str) -> EntityType {
        match type_string {
            "LINE" => EntityType::Line(Default::default()),
            "ARC" => EntityType::Arc(Default::default()),
            "CIRCLE" => EntityType::Circle(Default::default()),
            "ELLIPSE" => EntityType::Ellipse(Default::default()),
            "POINT" => EntityType::ModelPoint(Default::default()),
            "SOLID" => EntityType::Solid(Face::new_solid(Default::default())),
            "TRACE" => EntityType::Trace(Face::new_solid(Default::default())),
            "3DFACE" => EntityType::Face3D(Face::new_3d(Default::default())),
            "POLYLINE" => EntityType::Polyline(Default::default()),
            "VERTEX" => EntityType::Vertex(Default::default()),
            "LWPOLYLINE" => EntityType::LwPolyline(Default::default()),
            "INSERT" => EntityType::Insert(Default::default()),
            "TEXT" => EntityType::Text(Default::default()),
            "SPLINE" => EntityType::Spline(Default::default()),
            "SEQEND" => EntityType::Seqend,
            "ENDBLK" => EntityType::EndBlock,
            _ => EntityType::Unknown(String::from(type_string)),
        }
    }
    pub fn type_string(&self) -> &str {
        match self {
            EntityType::Line(_) => "LINE",
            EntityType::Arc(_) => "ARC",
            EntityType::Circle(_) => "CIRCLE",
            EntityType::Ellipse(_) => "ELLIPSE",
            EntityType::ModelPoint(_) => "POINT",
            EntityType::Solid(_) => "SOLID",
            EntityType::Trace(_) => "TRACE",
            EntityType::Face3D(_) => "3DFACE",
            EntityType::Polyline(_) => "POLYLINE",
            EntityType::Vertex(_) => "VERTEX",
            EntityType::LwPolyline(_) => "LWPOLYLINE",
            EntityType::Insert(_) => "INSERT",
            EntityType::Text(_) => "TEXT",
            EntityType::Spline(_) => "SPLINE",
            EntityType::Seqend => "SEQEND",
            EntityType::EndBlock => "ENDBLK",
            EntityType::Unknown(ref name) => name,
        }
    }
    fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match self {
            EntityType::Line(ref mut e) => e.apply(pair),
            EntityType::Arc(ref mut e) => e.apply(pair),
            EntityType::Circle(ref mut e) => e.apply(pair),
            EntityType::Ellipse(ref mut e) => e.apply(pair),
            EntityType::ModelPoint(ref mut e) => e.apply(pair),
            EntityType::Solid(ref mut e)
            | EntityType::Trace(ref mut e)
            | EntityType::Face3D(ref mut e) => e.apply(pair),
            EntityType::Polyline(ref mut e) => e.apply(pair),
            EntityType::Vertex(ref mut e) => e.apply(pair),
            EntityType::LwPolyline(ref mut e) => e.apply(pair),
            EntityType::Insert(ref mut e) => e.apply(pair),
            EntityType::Text(ref mut e) => e.apply(pair),
            EntityType::Spline(ref mut e) => e.apply(pair),
            EntityType::Seqend | EntityType::EndBlock | EntityType::Unknown(_) => Ok(false),
        }
    }
    fn get(&self, code: i32, index: usize) -> Option<CodePairValue> {
        match self {
            EntityType::Line(ref e) => e.get(code),
            EntityType::Arc(ref e) => e.get(code),
            EntityType::Circle(ref e) => e.get(code),
            EntityType::Ellipse(ref e) => e.get(code),
            EntityType::ModelPoint(ref e) => e.get(code),
            EntityType::Solid(ref e) | EntityType::Trace(ref e) | EntityType::Face3D(ref e) => {
                e.get(code)
            }
            EntityType::Polyline(ref e) => e.get(code),
            EntityType::Vertex(ref e) => e.get(code),
            EntityType::LwPolyline(ref e) => e.get(code, index),
            EntityType::Insert(ref e) => e.get(code),
            EntityType::Text(ref e) => e.get(code),
            EntityType::Spline(ref e) => e.get(code, index),
            EntityType::Seqend | EntityType::EndBlock | EntityType::Unknown(_) => None,
        }
    }
    fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        match self {
            EntityType::Line(ref e) => e.add_code_pairs(pairs),
            EntityType::Arc(ref e) => e.add_code_pairs(pairs),
            EntityType::Circle(ref e) => e.add_code_pairs(pairs),
            EntityType::Ellipse(ref e) => e.add_code_pairs(pairs),
            EntityType::ModelPoint(ref e) => e.add_code_pairs(pairs),
            EntityType::Solid(ref e) | EntityType::Trace(ref e) | EntityType::Face3D(ref e) => {
                e.add_code_pairs(pairs)
            }
            EntityType::Polyline(ref e) => e.add_code_pairs(pairs),
            EntityType::Vertex(ref e) => e.add_code_pairs(pairs),
            EntityType::LwPolyline(ref e) => e.add_code_pairs(pairs),
            EntityType::Insert(ref e) => e.add_code_pairs(pairs),
            EntityType::Text(ref e) => e.add_code_pairs(pairs),
            EntityType::Spline(ref e) => e.add_code_pairs(pairs),
            EntityType::Seqend | EntityType::EndBlock | EntityType::Unknown(_) => (),
        }
    }
    fn add_trailing_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        match self {
            EntityType::LwPolyline(ref e) => e.add_vertex_code_pairs(pairs),
            EntityType::Insert(ref e) => e.add_trailing_code_pairs(pairs),
            _ => (),
        }
    }
}

//------------------------------------------------------------------------------
//                                                                        Entity
//------------------------------------------------------------------------------
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub common: EntityCommon,
    pub specific: EntityType,
}

// public implementation
impl Entity {
    /// Creates a new `Entity` on the default layer with a BYLAYER color.
    pub fn new(specific: EntityType) -> Self {
        Entity {
            common: Default::default(),
            specific,
        }
    }
    pub fn type_string(&self) -> &str {
        self.specific.type_string()
    }
    pub fn is_deleted(&self) -> bool {
        self.common.has_flag(ENTITY_DELETED)
    }
    /// Marks the entity deleted; deleted entities are skipped by traversal and not written.
    pub fn set_deleted(&mut self, deleted: bool) {
        self.common.set_flag(ENTITY_DELETED, deleted);
    }
    pub fn layer(&self) -> LayerId {
        self.common.layer
    }
    /// Moves the entity to the layer `name`, creating the layer if needed.
    pub fn set_layer(&mut self, registry: &mut Registry, name: &str) -> LayerId {
        self.common.layer = registry.add_layer(name, DEFAULT_LAYER_COLOR, 0);
        self.common.layer
    }
    pub fn color_number(&self) -> i16 {
        self.common.color_number
    }
    pub fn set_color_number(&mut self, color_number: i16) {
        self.common.color_number = color_number;
        self.common.flags |= ENTITY_COLOR_NUMBER;
    }
    pub fn handle(&self) -> Option<Handle> {
        self.common.handle()
    }
    /// Stores `handle` as the entity's code 5 record.
    pub fn set_handle(&mut self, handle: Handle) {
        let value = handle.as_string();
        match self.common.records.iter_mut().find(|r| r.code == 5) {
            Some(record) => *record = CodePair::new_str(5, &value),
            None => self.common.records.insert(0, CodePair::new_str(5, &value)),
        }
        self.common.flags |= ENTITY_HANDLE;
    }
    /// The entity's geometry in its own coordinate system.
    pub fn extract_geometry(&self) -> Geometry {
        match self.specific {
            EntityType::Line(ref e) => e.extract_geometry(),
            EntityType::Arc(ref e) => e.extract_geometry(),
            EntityType::Circle(ref e) => e.extract_geometry(),
            EntityType::Ellipse(ref e) => e.extract_geometry(),
            EntityType::ModelPoint(ref e) => e.extract_geometry(),
            EntityType::Solid(ref e) | EntityType::Trace(ref e) | EntityType::Face3D(ref e) => {
                e.extract_geometry()
            }
            EntityType::Polyline(ref e) => e.extract_geometry(),
            EntityType::Vertex(ref e) => e.extract_geometry(),
            EntityType::LwPolyline(ref e) => e.extract_geometry(),
            _ => Geometry::none(),
        }
    }
    /// A deep copy whose layer and block references are registered with `target`.
    pub fn copy_into(&self, source: &Registry, target: &mut Registry) -> Entity {
        let mut copy = Entity {
            common: self.common.clone(),
            specific: self.specific.clone(),
        };
        let layer = source.layers().layer_or_default(self.common.layer);
        copy.common.layer = target.add_layer(layer.name(), layer.color_number, layer.flags);
        match copy.specific {
            EntityType::Insert(ref mut ins) => {
                let name = String::from(ins.block_name());
                ins.set_block(target, &name);
                ins.attributes = ins
                    .attributes
                    .iter()
                    .map(|a| a.copy_into(source, target))
                    .collect();
                ins.seqend = ins
                    .seqend
                    .as_ref()
                    .map(|s| Box::new(s.copy_into(source, target)));
            }
            EntityType::Polyline(ref mut poly) => {
                poly.vertices = poly
                    .vertices
                    .iter()
                    .map(|v| v.copy_into(source, target))
                    .collect();
                poly.seqend = poly
                    .seqend
                    .as_ref()
                    .map(|s| Box::new(s.copy_into(source, target)));
            }
            _ => (),
        }
        copy
    }
}

// internal visibility only
impl Entity {
    /// Reads one entity starting at its `0/type` pair.  Returns `None`, with the pair put back,
    /// at `0/ENDSEC`, `0/ENDBLK`, or `0/EOF`.
    pub(crate) fn read(
        iter: &mut CodePairPutBack,
        registry: &mut Registry,
    ) -> DxfResult<Option<Entity>> {
        let pair = match iter.next() {
            Some(Ok(pair)) => pair,
            Some(Err(e)) => return Err(e),
            None => return Ok(None),
        };
        if pair.code != 0 {
            return Err(DxfError::UnexpectedCodePair(
                pair,
                String::from("expected 0/<entity-type>"),
            ));
        }

        let type_string = pair.assert_string()?;
        match &*type_string {
            "ENDSEC" | "ENDBLK" | "EOF" => {
                iter.put_back(Ok(pair));
                Ok(None)
            }
            _ => {
                let mut entity = Entity::new(EntityType::from_type_string(&type_string));
                read_records(&mut entity, iter, registry)?;
                Ok(Some(entity))
            }
        }
    }
    /// Appends the entity, and the VERTEX/ATTRIB/SEQEND entities it owns, to `pairs`.
    /// Deleted entities write nothing.
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>, registry: &Registry) {
        if self.is_deleted() {
            return;
        }

        pairs.push(CodePair::new_str(0, self.type_string()));
        self.common.add_code_pairs(pairs, registry);
        self.specific.add_code_pairs(pairs);
        self.write_records(pairs);
        self.specific.add_trailing_code_pairs(pairs);

        match self.specific {
            EntityType::Polyline(ref poly) => {
                for v in &poly.vertices {
                    v.add_code_pairs(pairs, registry);
                }
                self.add_seqend_code_pairs(&poly.seqend, pairs, registry);
            }
            EntityType::Insert(ref ins) if ins.attributes_follow => {
                for a in &ins.attributes {
                    a.add_code_pairs(pairs, registry);
                }
                self.add_seqend_code_pairs(&ins.seqend, pairs, registry);
            }
            _ => (),
        }
    }
    /// Resolves the block reference by name.  Names that are unknown are reported and left
    /// unresolved.
    pub(crate) fn fix_references(&mut self, registry: &Registry) {
        if let EntityType::Insert(ref mut ins) = self.specific {
            let block = registry.find_block(ins.block_name());
            if block.is_none() {
                warn!("BLOCK {} not found", ins.block_name());
            }
            ins.set_block_id(block);
            for a in &mut ins.attributes {
                a.fix_references(registry);
            }
        }
    }
}

// private implementation
impl Entity {
    fn add_seqend_code_pairs(
        &self,
        seqend: &Option<Box<Entity>>,
        pairs: &mut Vec<CodePair>,
        registry: &Registry,
    ) {
        match seqend {
            Some(seqend) => seqend.add_code_pairs(pairs, registry),
            None => {
                pairs.push(CodePair::new_str(0, "SEQEND"));
                pairs.push(CodePair::new_str(8, registry.layer_name(self.common.layer)));
            }
        }
    }
}

impl RecordHolder for Entity {
    fn records(&self) -> &[CodePair] {
        &self.common.records
    }
    fn records_mut(&mut self) -> &mut Vec<CodePair> {
        &mut self.common.records
    }
    fn handle_record(&mut self, pair: &CodePair) -> DxfResult<bool> {
        if self.specific.apply(pair)? {
            return Ok(true);
        }
        self.common.apply(pair)
    }
    fn handle_read_record(&mut self, pair: &CodePair, registry: &mut Registry) -> DxfResult<bool> {
        match (pair.code, &mut self.specific) {
            (2, EntityType::Insert(ref mut ins)) => {
                let name = pair.assert_string()?;
                ins.set_block(registry, &name);
                Ok(true)
            }
            (8, _) | (5, _) => self.common.apply_read(pair, registry),
            _ => self.handle_record(pair),
        }
    }
    fn typed_record(&self, code: i32, index: usize) -> Option<CodePairValue> {
        match code {
            62 if self.common.has_flag(ENTITY_COLOR_NUMBER) => {
                Some(CodePairValue::Short(self.common.color_number))
            }
            _ => self.specific.get(code, index),
        }
    }
    fn is_protected_code(&self, code: i32) -> bool {
        match (code, &self.specific) {
            (8, _) => true,
            (2, EntityType::Insert(_)) => true,
            _ => false,
        }
    }
}
