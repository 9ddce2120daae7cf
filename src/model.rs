// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::rc::Rc;

use encoding_rs::Encoding;

use crate::code_pair_iter::new_code_pair_iter_from_reader;
use crate::code_pair_put_back::{CodePairPutBack, ProgressCallback};
use crate::code_pair_writer::CodePairWriter;
use crate::enums::AcadVersion;
use crate::section::EntitiesSection;
use crate::state::Traverser;
use crate::{
    Block, BlockId, BlocksSection, Class, CodePair, CodePairValue, DxfError, DxfResult, Entity,
    Handle, HeaderSection, Layer, LayerId, ObjectsSection, Registry, Section, State,
    TablesSection, TraversalFlags, Visit,
};

/// A DXF drawing: its sections, the header comments, and the registry every item in the
/// sections refers to.
#[derive(Clone, Debug, Default)]
pub struct Model {
    sections: Vec<Section>,
    registry: Registry,
    comments: Vec<String>,
}

// public implementation
impl Model {
    /// Creates an empty model containing only the default layer.
    pub fn new() -> Self {
        Default::default()
    }
    /// Loads a `Model` from anything that implements the `Read` trait.
    pub fn load<T>(reader: &mut T) -> DxfResult<Model>
    where
        T: Read + ?Sized,
    {
        Model::load_with_encoding(reader, encoding_rs::WINDOWS_1252)
    }
    /// Loads a `Model` from anything that implements the `Read` trait using the specified text encoding.
    pub fn load_with_encoding<T>(reader: &mut T, encoding: &'static Encoding) -> DxfResult<Model>
    where
        T: Read + ?Sized,
    {
        Model::load_internal(reader, encoding, None)
    }
    /// Loads a `Model`, reporting the fraction of the input consumed to `callback`.  Loading
    /// stops with `DxfError::Aborted` as soon as `callback` returns `false`.
    pub fn load_with_progress<T, F>(
        reader: &mut T,
        encoding: &'static Encoding,
        callback: F,
    ) -> DxfResult<Model>
    where
        T: Read + ?Sized,
        F: FnMut(f32) -> bool,
    {
        Model::load_internal(reader, encoding, Some(Box::new(callback)))
    }
    /// Loads a `Model` from disk, using a `BufReader`.
    pub fn load_file(file_name: &str) -> DxfResult<Model> {
        let path = Path::new(file_name);
        let file = File::open(&path)?;
        let mut buf_reader = BufReader::new(file);
        Model::load(&mut buf_reader)
    }
    /// Loads a `Model` from DXF text.
    pub fn parse(text: &str) -> DxfResult<Model> {
        Model::load_with_encoding(&mut text.as_bytes(), encoding_rs::UTF_8)
    }
    /// Writes the model as text DXF.
    ///
    /// If any handle has been seen and the header has a `$HANDSEED` variable, the variable is
    /// first set to the next unused handle.
    pub fn save<T>(&mut self, writer: &mut T) -> DxfResult<()>
    where
        T: Write + ?Sized,
    {
        self.save_internal(writer, true, encoding_rs::WINDOWS_1252)
    }
    /// Writes the model as binary DXF.
    pub fn save_binary<T>(&mut self, writer: &mut T) -> DxfResult<()>
    where
        T: Write + ?Sized,
    {
        self.save_internal(writer, false, encoding_rs::WINDOWS_1252)
    }
    /// Writes the model to disk, using a `BufWriter`.
    pub fn save_file(&mut self, file_name: &str) -> DxfResult<()> {
        let path = Path::new(file_name);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer)
    }
    /// The model as DXF text, as `save` would write it.
    pub fn to_dxf_string(&mut self) -> DxfResult<String> {
        let mut buf = vec![];
        self.save_internal(&mut buf, true, encoding_rs::UTF_8)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// The `999` comments that precede the first section.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }
    pub fn add_comment(&mut self, comment: &str) {
        self.comments.push(String::from(comment));
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
    /// The first section named `name`.
    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }
    pub fn find_section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }
    /// Inserts `section` at `index`, or appends it when `index` is `None` or past the end.
    pub fn insert_section(&mut self, section: Section, index: Option<usize>) {
        match index {
            Some(i) if i <= self.sections.len() => self.sections.insert(i, section),
            _ => self.sections.push(section),
        }
    }
    pub fn remove_section(&mut self, index: usize) -> Option<Section> {
        if index < self.sections.len() {
            Some(self.sections.remove(index))
        } else {
            None
        }
    }

    pub fn header(&self) -> Option<&HeaderSection> {
        self.sections.iter().find_map(|s| match *s {
            Section::Header(ref h) => Some(h),
            _ => None,
        })
    }
    pub fn header_mut(&mut self) -> Option<&mut HeaderSection> {
        self.sections.iter_mut().find_map(|s| match *s {
            Section::Header(ref mut h) => Some(h),
            _ => None,
        })
    }
    pub fn classes(&self) -> Option<&[Class]> {
        self.sections.iter().find_map(|s| match *s {
            Section::Classes(ref c) => Some(&c.classes[..]),
            _ => None,
        })
    }
    pub fn tables(&self) -> Option<&TablesSection> {
        self.sections.iter().find_map(|s| match *s {
            Section::Tables(ref t) => Some(t),
            _ => None,
        })
    }
    pub fn blocks(&self) -> Option<&BlocksSection> {
        self.sections.iter().find_map(|s| match *s {
            Section::Blocks(ref b) => Some(b),
            _ => None,
        })
    }
    pub fn entities(&self) -> Option<&[Entity]> {
        self.sections.iter().find_map(|s| match *s {
            Section::Entities(ref e) => Some(&e.entities[..]),
            _ => None,
        })
    }
    /// The entities of the ENTITIES section.  Inserts whose block names change should be
    /// followed by `fix_references`.
    pub fn entities_mut(&mut self) -> Option<&mut Vec<Entity>> {
        self.sections.iter_mut().find_map(|s| match *s {
            Section::Entities(ref mut e) => Some(&mut e.entities),
            _ => None,
        })
    }
    pub fn objects(&self) -> Option<&ObjectsSection> {
        self.sections.iter().find_map(|s| match *s {
            Section::Objects(ref o) => Some(o),
            _ => None,
        })
    }

    /// Appends `entity` to the ENTITIES section, creating the section if needed.
    pub fn add_entity(&mut self, entity: Entity) {
        if let Some(handle) = entity.handle() {
            self.registry.register_handle(handle);
        }
        let index = self.section_index("ENTITIES");
        if let Section::Entities(ref mut section) = self.sections[index] {
            section.entities.push(entity);
        }
    }
    /// Appends `block` to the BLOCKS section, creating the section if needed, and registers
    /// it so inserts of its name resolve to it.
    pub fn add_block(&mut self, block: Block) -> BlockId {
        let index = self.section_index("BLOCKS");
        let mut id = BlockId(0);
        if let Section::Blocks(ref mut section) = self.sections[index] {
            id = BlockId(section.blocks.len());
            self.registry.add_block(block.name(), id);
            section.blocks.push(block);
        }
        self.fix_references();
        id
    }
    pub fn get_block(&self, id: BlockId) -> Option<&Block> {
        self.blocks().and_then(|b| b.blocks.get(id.0))
    }
    pub fn find_block(&self, name: &str) -> Option<&Block> {
        self.registry.find_block(name).and_then(|id| self.get_block(id))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
    /// Adds a layer, or returns the existing layer of that name unchanged.
    pub fn add_layer(&mut self, name: &str, color_number: i16, flags: i16) -> LayerId {
        self.registry.add_layer(name, color_number, flags)
    }
    pub fn get_layer(&self, id: LayerId) -> Option<&Layer> {
        self.registry.get_layer(id)
    }
    pub fn find_layer(&self, name: &str) -> Option<LayerId> {
        self.registry.find_layer(name)
    }
    /// The layer count, including the default layer.
    pub fn num_layers(&self) -> usize {
        self.registry.num_layers()
    }
    pub fn add_reference(&mut self, name: &str, id: Option<BlockId>) -> Rc<str> {
        self.registry.add_reference(name, id)
    }
    pub fn find_reference(&self, name: &str) -> Option<BlockId> {
        self.registry.find_reference(name)
    }
    pub fn remove_reference(&mut self, name: &str) -> bool {
        self.registry.remove_reference(name)
    }
    pub fn get_unique_handle(&mut self) -> Handle {
        self.registry.get_unique_handle()
    }
    pub fn largest_handle(&self) -> u64 {
        self.registry.largest_handle()
    }

    /// The values of the header variable `name`.
    pub fn get_variable(&self, name: &str) -> Option<Vec<CodePair>> {
        self.header().and_then(|h| h.get_variable(name))
    }
    /// Sets the header variable `name`, creating the HEADER section if needed.  Returns the
    /// number of values written.
    pub fn set_variable(&mut self, name: &str, values: &[CodePair]) -> usize {
        if self.header().is_none() {
            self.sections
                .insert(0, Section::Header(HeaderSection::default()));
        }
        match self.header_mut() {
            Some(header) => header.set_variable(name, values),
            None => 0,
        }
    }
    /// The file version recorded in the header's `$ACADVER`.
    pub fn dxf_version(&self) -> Option<AcadVersion> {
        self.header().and_then(|h| h.version())
    }
    /// The number of code pairs `save` writes.
    pub fn count_records(&self) -> usize {
        let framing: usize = self
            .sections
            .iter()
            .map(|s| 3 + s.count_records(&self.registry))
            .sum();
        self.comments.len() + framing + 1
    }
    /// A deep copy with its own registry.  Layer ids are preserved.
    pub fn copy(&self) -> Model {
        let mut copy = Model::new();
        copy.comments = self.comments.clone();
        for layer in self.registry.layers().iter() {
            copy.registry
                .add_layer(layer.name(), layer.color_number, layer.flags);
        }
        copy.registry.register_handle(Handle(self.registry.largest_handle()));

        let mut first_blocks = true;
        for section in &self.sections {
            let section = match *section {
                Section::Blocks(ref blocks) => {
                    let mut section = BlocksSection::default();
                    for block in &blocks.blocks {
                        let block = block.copy_into(&self.registry, &mut copy.registry);
                        if first_blocks {
                            let id = BlockId(section.blocks.len());
                            copy.registry.add_block(block.name(), id);
                        }
                        section.blocks.push(block);
                    }
                    first_blocks = false;
                    Section::Blocks(section)
                }
                Section::Entities(ref entities) => Section::Entities(EntitiesSection {
                    entities: entities
                        .entities
                        .iter()
                        .map(|e| e.copy_into(&self.registry, &mut copy.registry))
                        .collect(),
                }),
                ref other => other.clone(),
            };
            copy.sections.push(section);
        }

        copy.fix_references();
        copy
    }

    /// Re-registers the blocks of the first BLOCKS section under their current positions and
    /// resolves every insert by block name.  Call after blocks are removed or reordered.
    pub fn fix_references(&mut self) {
        self.registry.clear_block_ids();
        if let Some(blocks) = self.blocks() {
            let names: Vec<Rc<str>> = blocks.blocks.iter().map(|b| Rc::clone(b.name_rc())).collect();
            for (i, name) in names.iter().enumerate() {
                self.registry.add_block(name, BlockId(i));
            }
        }

        let registry = &self.registry;
        for section in self.sections.iter_mut().filter(|s| s.name() == "BLOCKS") {
            section.fix_references(registry);
        }
        for section in self.sections.iter_mut().filter(|s| s.name() == "ENTITIES") {
            section.fix_references(registry);
        }
    }
    /// Walks the model's entities depth-first, calling `callback` for each one visited.
    ///
    /// With `traverse_blocks_section` the contents of every block definition are visited
    /// first, untransformed.  With `TraversalFlags::EXPLODE_INSERTS` each INSERT is replaced
    /// by its block's entities once per grid cell; otherwise the INSERT itself is visited.
    /// Returns `Visit::Stop` if `callback` ended the traversal.
    pub fn traverse_entities<'a, F>(
        &'a self,
        traverse_blocks_section: bool,
        flags: TraversalFlags,
        callback: F,
    ) -> Visit
    where
        F: FnMut(&State<'a>, &'a Entity) -> Visit,
    {
        let blocks: &'a [Block] = match self.blocks() {
            Some(section) => &section.blocks,
            None => &[],
        };
        let mut traverser = Traverser::new(blocks, callback);
        let state = State::new(flags);
        if traverse_blocks_section {
            for block in blocks {
                if traverser.traverse_block(&state, block) == Visit::Stop {
                    return Visit::Stop;
                }
            }
        }
        match self.entities() {
            Some(entities) => traverser.traverse_entities(&state, entities),
            None => Visit::Continue,
        }
    }
}

// internal visibility only
impl Model {
    /// All code pairs of the model, from the header comments through `0/EOF`.
    pub(crate) fn code_pairs(&self) -> Vec<CodePair> {
        let mut pairs = vec![];
        for comment in &self.comments {
            pairs.push(CodePair::new_str(999, comment));
        }
        for section in &self.sections {
            pairs.push(CodePair::new_str(0, "SECTION"));
            pairs.push(CodePair::new_str(2, section.name()));
            section.add_code_pairs(&mut pairs, &self.registry);
            pairs.push(CodePair::new_str(0, "ENDSEC"));
        }
        pairs.push(CodePair::new_str(0, "EOF"));
        pairs
    }
}

// private implementation
impl Model {
    fn load_internal<T>(
        reader: &mut T,
        encoding: &'static Encoding,
        callback: Option<ProgressCallback>,
    ) -> DxfResult<Model>
    where
        T: Read + ?Sized,
    {
        let mut iter = CodePairPutBack::from_code_pair_iter(new_code_pair_iter_from_reader(
            reader, encoding,
        )?);
        if let Some(callback) = callback {
            iter.set_callback(callback);
        }

        let mut model = Model::new();
        let mut result = model.read_sections(&mut iter);
        if result.is_ok() && iter.aborted() {
            // cancelled by the progress report for the final pair
            result = Err(DxfError::Aborted(iter.file_position()));
        }
        if let Err(e) = result {
            if iter.aborted() {
                error!("DXF loading aborted by user");
            } else if iter.is_binary() {
                error!("DXF read failed at offset {}", iter.file_position());
            } else {
                error!("DXF read failed at line {}", iter.file_position());
            }
            return Err(e);
        }

        model.fix_references();
        Ok(model)
    }
    fn read_sections(&mut self, iter: &mut CodePairPutBack) -> DxfResult<()> {
        loop {
            let pair = match iter.next() {
                Some(Ok(pair)) => pair,
                Some(Err(e)) => return Err(e),
                None => break, // ideally should have been 0/EOF
            };
            if pair.code == 999 {
                self.comments.push(pair.assert_string()?);
                continue;
            }
            if pair.is_end_of_file() {
                break;
            }
            if !pair.is_marker("SECTION") {
                return Err(DxfError::UnexpectedCodePair(
                    pair,
                    String::from("expected 0/SECTION or 0/EOF"),
                ));
            }

            let name = match iter.next() {
                Some(Ok(CodePair {
                    code: 2,
                    value: CodePairValue::Str(s),
                    ..
                })) => s,
                Some(Ok(pair)) => {
                    return Err(DxfError::UnexpectedCodePair(
                        pair,
                        String::from("expected 2/<section-name>"),
                    ))
                }
                Some(Err(e)) => return Err(e),
                None => return Err(DxfError::UnexpectedEndOfInput),
            };
            let first_blocks = name == "BLOCKS" && self.blocks().is_none();
            let section = Section::read(iter, &mut self.registry, &name, first_blocks)?;

            let end = next_pair!(iter);
            if !end.is_end_of_section() {
                return Err(DxfError::UnexpectedCodePair(
                    end,
                    String::from("expected 0/ENDSEC"),
                ));
            }
            self.sections.push(section);
        }

        Ok(())
    }
    fn save_internal<T>(
        &mut self,
        writer: &mut T,
        as_ascii: bool,
        encoding: &'static Encoding,
    ) -> DxfResult<()>
    where
        T: Write + ?Sized,
    {
        self.update_handle_seed();
        let pairs = self.code_pairs();
        let mut code_pair_writer = if as_ascii {
            CodePairWriter::new_ascii_writer(writer, encoding)
        } else {
            CodePairWriter::new_binary_writer(writer, encoding)
        };
        code_pair_writer.write_prelude()?;
        code_pair_writer.write_code_pairs(&pairs)
    }
    /// Stores the next unused handle in `$HANDSEED` without consuming it.
    fn update_handle_seed(&mut self) {
        if self.registry.largest_handle() == 0 {
            return;
        }
        if self.get_variable("$HANDSEED").is_none() {
            return;
        }

        let seed = self.registry.get_unique_handle();
        self.registry.release_last_handle();
        if let Some(header) = self.header_mut() {
            header.set_variable("$HANDSEED", &[CodePair::new_str(5, &seed.as_string())]);
        }
    }
    /// The index of the first section named `name`, inserting an empty one if there is none.
    fn section_index(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name() == name) {
            Some(i) => i,
            None => {
                let i = self.new_section_position(name);
                self.sections.insert(i, Section::new(name));
                i
            }
        }
    }
    /// Where a new standard section goes so the usual section order is kept.
    fn new_section_position(&self, name: &str) -> usize {
        const ORDER: [&str; 6] = ["HEADER", "CLASSES", "TABLES", "BLOCKS", "ENTITIES", "OBJECTS"];
        let rank = |n: &str| ORDER.iter().position(|o| *o == n);
        match rank(name) {
            Some(r) => self
                .sections
                .iter()
                .position(|s| rank(s.name()).map_or(false, |sr| sr > r))
                .unwrap_or_else(|| self.sections.len()),
            None => self.sections.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::*;
    use crate::helper_functions::tests::*;
    use crate::*;

    #[test]
    fn empty_model_writes_only_eof() {
        let mut model = Model::new();
        assert_eq!("  0\r\nEOF\r\n", to_test_string(&mut model));
        assert_eq!(1, model.count_records());
        assert_eq!(1, model.num_layers());
    }

    #[test]
    fn header_comments_round_trip() {
        let mut model = parse_model(
            &vec!["999", "made by hand", "  0", "SECTION", "  2", "ENTITIES", "  0", "ENDSEC", "  0", "EOF"]
                .join("\r\n"),
        );
        assert_eq!(vec![String::from("made by hand")], model.comments());
        assert!(to_test_string(&mut model).starts_with("999\r\nmade by hand\r\n  0\r\nSECTION"));
    }

    #[test]
    fn missing_section_name_is_an_error() {
        let text = vec!["  0", "SECTION", "  1", "ENTITIES", "  0", "ENDSEC", "  0", "EOF"].join("\r\n");
        assert!(Model::parse(&text).is_err());
    }

    #[test]
    fn unexpected_top_level_pair_is_an_error() {
        let text = vec!["  0", "LINE", "  0", "EOF"].join("\r\n");
        assert!(Model::parse(&text).is_err());
    }

    #[test]
    fn missing_eof_is_tolerated() {
        let text = vec!["  0", "SECTION", "  2", "ENTITIES", "  0", "ENDSEC"].join("\r\n");
        assert!(Model::parse(&text).is_ok());
    }

    #[test]
    fn handle_seed_is_updated_on_write() {
        let mut model = parse_model(
            &vec![
                "  0", "SECTION", "  2", "HEADER", "  9", "$HANDSEED", "  5", "1", "  0", "ENDSEC",
                "  0", "SECTION", "  2", "ENTITIES", "  0", "LINE", "  5", "2A", "  0", "ENDSEC",
                "  0", "EOF",
            ]
            .join("\r\n"),
        );
        assert_eq!(0x2A, model.largest_handle());
        assert_contains(&mut model, vec!["$HANDSEED", "  5", "2B"].join("\r\n"));
        // the seed is not consumed
        assert_eq!(0x2A, model.largest_handle());
        assert_eq!(Handle(0x2B), model.get_unique_handle());
    }

    #[test]
    fn handle_seed_is_left_alone_without_handles() {
        let mut model = from_section("HEADER", vec!["  9", "$HANDSEED", "  5", "FF"]);
        assert_contains(&mut model, vec!["$HANDSEED", "  5", "FF"].join("\r\n"));
    }

    #[test]
    fn add_entity_creates_entities_section_in_order() {
        let mut model = from_section("OBJECTS", vec![]);
        model.set_variable("$ACADVER", &[CodePair::new_str(1, "AC1009")]);
        model.add_entity(Entity::new(EntityType::Line(Line::default())));
        let names: Vec<&str> = model.sections().iter().map(|s| s.name()).collect();
        assert_eq!(vec!["HEADER", "ENTITIES", "OBJECTS"], names);
        assert_eq!(1, model.entities().unwrap().len());
        assert_eq!(Some(enums::AcadVersion::R12), model.dxf_version());
    }

    #[test]
    fn added_block_resolves_pending_inserts() {
        let mut model = Model::new();
        let ins = Insert::new(model.registry_mut(), "LATER", Point::origin());
        assert_eq!(None, ins.block());
        model.add_entity(Entity::new(EntityType::Insert(ins)));
        let block = Block::new(model.registry_mut(), "LATER");
        let id = model.add_block(block);
        match model.entities().unwrap()[0].specific {
            EntityType::Insert(ref ins) => assert_eq!(Some(id), ins.block()),
            _ => panic!("expected an insert"),
        }
        assert_eq!("LATER", model.find_block("LATER").unwrap().name());
    }

    #[test]
    fn insert_and_remove_sections() {
        let mut model = Model::new();
        model.insert_section(Section::new("ENTITIES"), None);
        model.insert_section(Section::new("HEADER"), Some(0));
        assert_eq!("HEADER", model.sections()[0].name());
        assert_eq!("ENTITIES", model.remove_section(1).unwrap().name());
        assert!(model.remove_section(1).is_none());
        assert!(model.find_section("ENTITIES").is_none());
    }

    #[test]
    fn count_records_matches_written_pairs() {
        let mut model = from_section("ENTITIES", vec!["  0", "LINE", "  8", "WALLS"]);
        let expected = model.count_records();
        let text = to_test_string(&mut model);
        assert_eq!(expected * 2, text.lines().count());
    }

    #[test]
    fn copy_has_its_own_registry() {
        let text = vec![
            "  0", "SECTION", "  2", "BLOCKS", "  0", "BLOCK", "  2", "B", "  8", "0", "  0",
            "LINE", "  8", "INNER", "  0", "ENDBLK", "  0", "ENDSEC", "  0", "SECTION", "  2",
            "ENTITIES", "  0", "INSERT", "  2", "B", "  8", "OUTER", "  0", "ENDSEC", "  0", "EOF",
        ]
        .join("\r\n");
        let mut model = parse_model(&text);
        model.add_layer("UNUSED", 3, 0);
        let mut copy = model.copy();
        assert_eq!(model.num_layers(), copy.num_layers());
        assert_eq!(model.find_layer("UNUSED"), copy.find_layer("UNUSED"));
        let block_name = std::rc::Rc::clone(copy.find_block("B").unwrap().name_rc());
        match copy.entities().unwrap()[0].specific {
            EntityType::Insert(ref ins) => {
                assert_eq!(Some(BlockId(0)), ins.block());
                assert!(std::rc::Rc::ptr_eq(&block_name, ins.block_name_rc()));
            }
            _ => panic!("expected an insert"),
        }
        assert_eq!(to_test_string(&mut model), to_test_string(&mut copy));
    }

    #[test]
    fn traverse_visits_blocks_section_on_request() {
        let text = vec![
            "  0", "SECTION", "  2", "BLOCKS", "  0", "BLOCK", "  2", "B", "  0", "LINE", "  0",
            "ENDBLK", "  0", "ENDSEC", "  0", "SECTION", "  2", "ENTITIES", "  0", "POINT", "  0",
            "ENDSEC", "  0", "EOF",
        ]
        .join("\r\n");
        let model = parse_model(&text);
        let mut seen = vec![];
        model.traverse_entities(true, TraversalFlags::NONE, |_, e| {
            seen.push(String::from(e.type_string()));
            Visit::Continue
        });
        assert_eq!(vec!["LINE", "POINT"], seen);

        seen.clear();
        model.traverse_entities(false, TraversalFlags::NONE, |_, e| {
            seen.push(String::from(e.type_string()));
            Visit::Continue
        });
        assert_eq!(vec!["POINT"], seen);
    }
}
