// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::rc::Rc;

use crate::code_pair_put_back::CodePairPutBack;
use crate::entity::ENTITY_COLOR_NUMBER;
use crate::entity_iter::EntityIter;
use crate::layer::DEFAULT_LAYER_COLOR;
use crate::record_holder::read_records;
use crate::{
    CodePair, CodePairValue, DxfError, DxfResult, Entity, EntityCommon, EntityType, Point,
    RecordHolder, Registry,
};

/// Identifies a block by its position in the model's BLOCKS section.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BlockId(pub usize);

/// A block is a named collection of entities, placed in the drawing by INSERT entities.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub common: EntityCommon,
    name: Rc<str>,
    pub base_point: Point,
    pub flags: i16,
    /// The entities that make up the block definition.
    pub entities: Vec<Entity>,
    /// The ENDBLK entity as read; a bare ENDBLK on the block's layer is written if `None`.
    pub end_block: Option<Entity>,
}

// public implementation
impl Block {
    /// Creates an empty block, interning `name` with `registry`.  The block becomes visible to
    /// inserts once it is added to a model.
    pub fn new(registry: &mut Registry, name: &str) -> Self {
        Block {
            common: Default::default(),
            name: registry.add_reference(name, None),
            base_point: Point::origin(),
            flags: 0,
            entities: vec![],
            end_block: None,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The interned name, shared with the model's reference table.
    pub fn name_rc(&self) -> &Rc<str> {
        &self.name
    }
    pub fn is_anonymous(&self) -> bool {
        self.flags & 1 != 0
    }
    pub fn has_attribute_definitions(&self) -> bool {
        self.flags & 2 != 0
    }
    pub fn is_xref(&self) -> bool {
        self.flags & 4 != 0
    }
    /// A deep copy whose name, layer, and entities are registered with `target`.  The copy
    /// is not registered as a block; see `Model::add_block`.
    pub fn copy_into(&self, source: &Registry, target: &mut Registry) -> Block {
        let layer = source.layers().layer_or_default(self.common.layer);
        let mut common = self.common.clone();
        common.layer = target.add_layer(layer.name(), layer.color_number, layer.flags);
        Block {
            common,
            name: target.add_reference(self.name(), None),
            base_point: self.base_point,
            flags: self.flags,
            entities: self
                .entities
                .iter()
                .map(|e| e.copy_into(source, target))
                .collect(),
            end_block: self.end_block.as_ref().map(|e| e.copy_into(source, target)),
        }
    }
}

// internal visibility only
impl Block {
    /// Reads one block after its `0/BLOCK` marker, through its ENDBLK entity.
    pub(crate) fn read(iter: &mut CodePairPutBack, registry: &mut Registry) -> DxfResult<Block> {
        let mut block = Block {
            common: Default::default(),
            name: Rc::from(""),
            base_point: Point::origin(),
            flags: 0,
            entities: vec![],
            end_block: None,
        };
        read_records(&mut block, iter, registry)?;

        {
            let mut entities = EntityIter::new(iter, registry);
            entities.read_entities_into_vec(&mut block.entities)?;
        }

        let pair = next_pair!(iter);
        if !pair.is_marker("ENDBLK") {
            return Err(DxfError::UnexpectedCodePair(
                pair,
                String::from("expected 0/ENDBLK"),
            ));
        }
        let mut end_block = Entity::new(EntityType::EndBlock);
        read_records(&mut end_block, iter, registry)?;
        block.end_block = Some(end_block);
        Ok(block)
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>, registry: &Registry) {
        pairs.push(CodePair::new_str(0, "BLOCK"));
        self.common.add_code_pairs(pairs, registry);
        pairs.push(CodePair::new_str(2, self.name()));
        pairs.push(CodePair::new_i16(70, self.flags));
        self.base_point.add_code_pairs(pairs, 10);
        self.write_records(pairs);
        for e in &self.entities {
            e.add_code_pairs(pairs, registry);
        }
        match self.end_block {
            Some(ref end_block) => end_block.add_code_pairs(pairs, registry),
            None => {
                pairs.push(CodePair::new_str(0, "ENDBLK"));
                pairs.push(CodePair::new_str(8, registry.layer_name(self.common.layer)));
            }
        }
    }
    pub(crate) fn fix_references(&mut self, registry: &Registry) {
        for e in &mut self.entities {
            e.fix_references(registry);
        }
    }
}

impl RecordHolder for Block {
    fn records(&self) -> &[CodePair] {
        &self.common.records
    }
    fn records_mut(&mut self) -> &mut Vec<CodePair> {
        &mut self.common.records
    }
    fn handle_record(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            10 | 20 | 30 => self.base_point.set(pair)?,
            70 => self.flags = pair.assert_i16()?,
            _ => return self.common.apply(pair),
        }
        Ok(true)
    }
    fn handle_read_record(&mut self, pair: &CodePair, registry: &mut Registry) -> DxfResult<bool> {
        match pair.code {
            2 => {
                self.name = registry.add_reference(&pair.assert_string()?, None);
                Ok(true)
            }
            8 => {
                self.common.layer =
                    registry.add_layer(&pair.assert_string()?, DEFAULT_LAYER_COLOR, 0);
                Ok(true)
            }
            5 => self.common.apply_read(pair, registry),
            _ => self.handle_record(pair),
        }
    }
    fn typed_record(&self, code: i32, _index: usize) -> Option<CodePairValue> {
        match code {
            2 => Some(CodePairValue::Str(String::from(self.name()))),
            10 | 20 | 30 => self.base_point.get(code).map(CodePairValue::Double),
            70 => Some(CodePairValue::Short(self.flags)),
            62 if self.common.has_flag(ENTITY_COLOR_NUMBER) => {
                Some(CodePairValue::Short(self.common.color_number))
            }
            _ => None,
        }
    }
    fn is_protected_code(&self, code: i32) -> bool {
        code == 2 || code == 8
    }
}

//------------------------------------------------------------------------------
//                                                                 BlocksSection
//------------------------------------------------------------------------------
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlocksSection {
    pub blocks: Vec<Block>,
}

impl BlocksSection {
    pub fn find_block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name() == name)
    }
    /// Reads blocks until `0/ENDSEC`.  When `register` is set each block is registered under
    /// its index so inserts can resolve it.
    pub(crate) fn read(
        iter: &mut CodePairPutBack,
        registry: &mut Registry,
        register: bool,
    ) -> DxfResult<BlocksSection> {
        let mut section = BlocksSection::default();
        loop {
            let pair = next_pair!(iter);
            if pair.is_marker("BLOCK") {
                let block = Block::read(iter, registry)?;
                if register {
                    let id = BlockId(section.blocks.len());
                    registry.add_block(block.name(), id);
                }
                section.blocks.push(block);
            } else if pair.is_end_of_section() {
                iter.put_back(Ok(pair));
                break;
            } else {
                return Err(DxfError::UnexpectedCodePair(
                    pair,
                    String::from("expected 0/BLOCK or 0/ENDSEC"),
                ));
            }
        }

        Ok(section)
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>, registry: &Registry) {
        for block in &self.blocks {
            block.add_code_pairs(pairs, registry);
        }
    }
    pub(crate) fn fix_references(&mut self, registry: &Registry) {
        for block in &mut self.blocks {
            block.fix_references(registry);
        }
    }
}
