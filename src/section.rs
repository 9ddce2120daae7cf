// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::class::ClassesSection;
use crate::code_pair_put_back::CodePairPutBack;
use crate::entity_iter::EntityIter;
use crate::{
    BlocksSection, CodePair, DxfResult, Entity, HeaderSection, ObjectsSection, Registry,
    TablesSection,
};

/// The top-level ENTITIES section.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntitiesSection {
    pub entities: Vec<Entity>,
}

impl EntitiesSection {
    pub(crate) fn read(
        iter: &mut CodePairPutBack,
        registry: &mut Registry,
    ) -> DxfResult<EntitiesSection> {
        let mut section = EntitiesSection::default();
        {
            let mut entities = EntityIter::new(iter, registry);
            entities.read_entities_into_vec(&mut section.entities)?;
        }
        Ok(section)
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>, registry: &Registry) {
        for e in &self.entities {
            e.add_code_pairs(pairs, registry);
        }
    }
    pub(crate) fn fix_references(&mut self, registry: &Registry) {
        for e in &mut self.entities {
            e.fix_references(registry);
        }
    }
}

/// A section whose name isn't recognized.  Its body is kept verbatim.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnknownSection {
    pub name: String,
    pub records: Vec<CodePair>,
}

impl UnknownSection {
    fn read(iter: &mut CodePairPutBack, name: &str) -> DxfResult<UnknownSection> {
        let mut section = UnknownSection {
            name: String::from(name),
            records: vec![],
        };
        loop {
            match iter.next() {
                Some(Ok(pair)) => {
                    if pair.is_end_of_section() {
                        iter.put_back(Ok(pair));
                        break;
                    }
                    section.records.push(pair);
                }
                Some(Err(e)) => return Err(e),
                None => break,
            }
        }

        Ok(section)
    }
}

/// One `0/SECTION` .. `0/ENDSEC` block of a DXF file.
#[derive(Clone, Debug, PartialEq)]
pub enum Section {
    Header(HeaderSection),
    Classes(ClassesSection),
    Tables(TablesSection),
    Blocks(BlocksSection),
    Entities(EntitiesSection),
    Objects(ObjectsSection),
    Unknown(UnknownSection),
}

// public implementation
impl Section {
    /// Creates an empty section for `name`; unrecognized names give an `Unknown` section.
    pub fn new(name: &str) -> Self {
        match name {
            "HEADER" => Section::Header(Default::default()),
            "CLASSES" => Section::Classes(Default::default()),
            "TABLES" => Section::Tables(Default::default()),
            "BLOCKS" => Section::Blocks(Default::default()),
            "ENTITIES" => Section::Entities(Default::default()),
            "OBJECTS" => Section::Objects(Default::default()),
            _ => Section::Unknown(UnknownSection {
                name: String::from(name),
                records: vec![],
            }),
        }
    }
    /// The value written after `2` in the section's framing.
    pub fn name(&self) -> &str {
        match *self {
            Section::Header(_) => "HEADER",
            Section::Classes(_) => "CLASSES",
            Section::Tables(_) => "TABLES",
            Section::Blocks(_) => "BLOCKS",
            Section::Entities(_) => "ENTITIES",
            Section::Objects(_) => "OBJECTS",
            Section::Unknown(ref s) => &s.name,
        }
    }
    /// The number of code pairs the section body writes, excluding the framing.
    pub fn count_records(&self, registry: &Registry) -> usize {
        let mut pairs = vec![];
        self.add_code_pairs(&mut pairs, registry);
        pairs.len()
    }
}

// internal visibility only
impl Section {
    /// Reads a section body after its `2/<name>` pair, leaving `0/ENDSEC` unread.
    /// `first_blocks` is set when this is the first BLOCKS section of the model.
    pub(crate) fn read(
        iter: &mut CodePairPutBack,
        registry: &mut Registry,
        name: &str,
        first_blocks: bool,
    ) -> DxfResult<Section> {
        debug!("reading section {}", name);
        let section = match name {
            "HEADER" => Section::Header(HeaderSection::read(iter)?),
            "CLASSES" => Section::Classes(ClassesSection::read(iter, registry)?),
            "TABLES" => Section::Tables(TablesSection::read(iter, registry)?),
            "BLOCKS" => Section::Blocks(BlocksSection::read(iter, registry, first_blocks)?),
            "ENTITIES" => Section::Entities(EntitiesSection::read(iter, registry)?),
            "OBJECTS" => Section::Objects(ObjectsSection::read(iter, registry)?),
            _ => {
                debug!("keeping unknown section {} verbatim", name);
                Section::Unknown(UnknownSection::read(iter, name)?)
            }
        };
        Ok(section)
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>, registry: &Registry) {
        match *self {
            Section::Header(ref s) => s.add_code_pairs(pairs),
            Section::Classes(ref s) => s.add_code_pairs(pairs),
            Section::Tables(ref s) => s.add_code_pairs(pairs),
            Section::Blocks(ref s) => s.add_code_pairs(pairs, registry),
            Section::Entities(ref s) => s.add_code_pairs(pairs, registry),
            Section::Objects(ref s) => s.add_code_pairs(pairs),
            Section::Unknown(ref s) => pairs.extend(s.records.iter().cloned()),
        }
    }
    pub(crate) fn fix_references(&mut self, registry: &Registry) {
        match *self {
            Section::Blocks(ref mut s) => s.fix_references(registry),
            Section::Entities(ref mut s) => s.fix_references(registry),
            _ => (),
        }
    }
}
