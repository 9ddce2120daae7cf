// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::code_pair_put_back::CodePairPutBack;
use crate::record_holder::read_records;
use crate::{
    CodePair, CodePairValue, DxfError, DxfResult, LayerId, Point, RecordHolder, Registry, Vector,
};

//------------------------------------------------------------------------------
//                                                                    LayerEntry
//------------------------------------------------------------------------------
/// A LAYER table entry.  Reading one registers the layer with the model's layer table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerEntry {
    pub name: String,
    /// Negative when the layer is turned off.
    pub color_number: i16,
    layer: Option<LayerId>,
}

impl LayerEntry {
    /// The model layer this entry describes, once registered.
    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }
    /// Sets the color number, keeping the registered layer's color in step.
    pub fn set_color_number(&mut self, registry: &mut Registry, color_number: i16) {
        self.color_number = color_number;
        if let Some(layer) = self.layer.and_then(|id| registry.layers_mut().get_mut(id)) {
            layer.color_number = color_number.abs();
        }
    }
}

//------------------------------------------------------------------------------
//                                                                      UcsEntry
//------------------------------------------------------------------------------
/// A UCS table entry.
#[derive(Clone, Debug, PartialEq)]
pub struct UcsEntry {
    pub name: String,
    pub origin: Point,
    pub x_axis: Vector,
    pub y_axis: Vector,
}

impl Default for UcsEntry {
    fn default() -> Self {
        UcsEntry {
            name: String::new(),
            origin: Point::origin(),
            x_axis: Vector::x_axis(),
            y_axis: Vector::y_axis(),
        }
    }
}

//------------------------------------------------------------------------------
//                                                                    TableEntry
//------------------------------------------------------------------------------
#[derive(Clone, Debug, PartialEq)]
pub enum TableEntryType {
    Layer(LayerEntry),
    Ucs(UcsEntry),
    /// Any other entry type, kept verbatim.
    Unknown(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableEntry {
    pub specific: TableEntryType,
    records: Vec<CodePair>,
}

// public implementation
impl TableEntry {
    pub fn new(specific: TableEntryType) -> Self {
        TableEntry {
            specific,
            records: vec![],
        }
    }
    pub fn type_string(&self) -> &str {
        match self.specific {
            TableEntryType::Layer(_) => "LAYER",
            TableEntryType::Ucs(_) => "UCS",
            TableEntryType::Unknown(ref name) => name,
        }
    }
}

// internal visibility only
impl TableEntry {
    pub(crate) fn read(
        type_string: &str,
        iter: &mut CodePairPutBack,
        registry: &mut Registry,
    ) -> DxfResult<TableEntry> {
        let specific = match type_string {
            "LAYER" => TableEntryType::Layer(Default::default()),
            "UCS" => TableEntryType::Ucs(Default::default()),
            _ => TableEntryType::Unknown(String::from(type_string)),
        };
        let mut entry = TableEntry::new(specific);
        read_records(&mut entry, iter, registry)?;
        entry.register_layer(registry);
        Ok(entry)
    }
    /// Registers a LAYER entry with the layer table; an existing layer takes the entry's
    /// color and flags.
    pub(crate) fn register_layer(&mut self, registry: &mut Registry) {
        let flags = match self.find_record(70, 0).map(|r| r.assert_i16()) {
            Some(Ok(flags)) => flags,
            _ => 0,
        };
        if let TableEntryType::Layer(ref mut layer) = self.specific {
            if layer.layer.is_some() || layer.name.is_empty() {
                return;
            }
            let color_number = layer.color_number.abs();
            let id = registry.add_layer(&layer.name, color_number, flags);
            if let Some(existing) = registry.layers_mut().get_mut(id) {
                existing.color_number = color_number;
                existing.flags = flags;
            }
            layer.layer = Some(id);
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::new_str(0, self.type_string()));
        match self.specific {
            TableEntryType::Layer(ref layer) => {
                pairs.push(CodePair::new_str(2, &layer.name));
                pairs.push(CodePair::new_i16(62, layer.color_number));
            }
            TableEntryType::Ucs(ref ucs) => {
                pairs.push(CodePair::new_str(2, &ucs.name));
                ucs.origin.add_code_pairs(pairs, 10);
                ucs.x_axis.add_code_pairs(pairs, 11);
                ucs.y_axis.add_code_pairs(pairs, 12);
            }
            TableEntryType::Unknown(_) => (),
        }
        self.write_records(pairs);
    }
}

impl RecordHolder for TableEntry {
    fn records(&self) -> &[CodePair] {
        &self.records
    }
    fn records_mut(&mut self) -> &mut Vec<CodePair> {
        &mut self.records
    }
    fn handle_record(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match self.specific {
            TableEntryType::Layer(ref mut layer) => match pair.code {
                2 => layer.name = pair.assert_string()?,
                62 => layer.color_number = pair.assert_i16()?,
                _ => return Ok(false),
            },
            TableEntryType::Ucs(ref mut ucs) => match pair.code {
                2 => ucs.name = pair.assert_string()?,
                10 | 20 | 30 => ucs.origin.set(pair)?,
                11 | 21 | 31 => ucs.x_axis.set(pair)?,
                12 | 22 | 32 => ucs.y_axis.set(pair)?,
                _ => return Ok(false),
            },
            TableEntryType::Unknown(_) => return Ok(false),
        }
        Ok(true)
    }
    fn typed_record(&self, code: i32, _index: usize) -> Option<CodePairValue> {
        match self.specific {
            TableEntryType::Layer(ref layer) => match code {
                2 => Some(CodePairValue::Str(layer.name.clone())),
                62 => Some(CodePairValue::Short(layer.color_number)),
                _ => None,
            },
            TableEntryType::Ucs(ref ucs) => match code {
                2 => Some(CodePairValue::Str(ucs.name.clone())),
                10 | 20 | 30 => ucs.origin.get(code).map(CodePairValue::Double),
                11 | 21 | 31 => ucs.x_axis.get(code).map(CodePairValue::Double),
                12 | 22 | 32 => ucs.y_axis.get(code).map(CodePairValue::Double),
                _ => None,
            },
            TableEntryType::Unknown(_) => None,
        }
    }
    fn is_protected_code(&self, code: i32) -> bool {
        match self.specific {
            // the name is the layer table key
            TableEntryType::Layer(ref layer) => code == 2 && layer.layer.is_some(),
            _ => false,
        }
    }
}

//------------------------------------------------------------------------------
//                                                                         Table
//------------------------------------------------------------------------------
/// One `0/TABLE ... 0/ENDTAB` block of the TABLES section.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub name: String,
    /// The records between the table name and the first entry, minus the entry count.
    pub records: Vec<CodePair>,
    pub entries: Vec<TableEntry>,
}

// internal visibility only
impl Table {
    pub(crate) fn read(iter: &mut CodePairPutBack, registry: &mut Registry) -> DxfResult<Table> {
        let mut table = Table::default();
        loop {
            match iter.next() {
                Some(Ok(pair)) => match pair.code {
                    0 => {
                        iter.put_back(Ok(pair));
                        break;
                    }
                    2 => table.name = pair.assert_string()?,
                    // the entry count is recomputed on write
                    70 => (),
                    _ => table.records.push(pair),
                },
                Some(Err(e)) => return Err(e),
                None => return Err(DxfError::UnexpectedEndOfInput),
            }
        }

        loop {
            let pair = next_pair!(iter);
            let type_string = pair.assert_string()?;
            if type_string == "ENDTAB" {
                // swallow any trailing ENDTAB data
                let mut end = TableEntry::new(TableEntryType::Unknown(type_string));
                read_records(&mut end, iter, registry)?;
                break;
            }
            if pair.is_end_of_section() || pair.is_end_of_file() {
                return Err(DxfError::UnexpectedCodePair(
                    pair,
                    String::from("expected 0/ENDTAB"),
                ));
            }
            table
                .entries
                .push(TableEntry::read(&type_string, iter, registry)?);
        }

        Ok(table)
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::new_str(0, "TABLE"));
        pairs.push(CodePair::new_str(2, &self.name));
        pairs.extend(self.records.iter().cloned());
        pairs.push(CodePair::new_i16(70, self.entries.len() as i16));
        for entry in &self.entries {
            entry.add_code_pairs(pairs);
        }
        pairs.push(CodePair::new_str(0, "ENDTAB"));
    }
}

//------------------------------------------------------------------------------
//                                                                 TablesSection
//------------------------------------------------------------------------------
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TablesSection {
    pub tables: Vec<Table>,
}

impl TablesSection {
    pub fn find_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
    pub(crate) fn read(
        iter: &mut CodePairPutBack,
        registry: &mut Registry,
    ) -> DxfResult<TablesSection> {
        let mut section = TablesSection::default();
        loop {
            let pair = next_pair!(iter);
            if pair.is_marker("TABLE") {
                section.tables.push(Table::read(iter, registry)?);
            } else if pair.is_end_of_section() {
                iter.put_back(Ok(pair));
                break;
            } else {
                return Err(DxfError::UnexpectedCodePair(
                    pair,
                    String::from("expected 0/TABLE or 0/ENDSEC"),
                ));
            }
        }

        Ok(section)
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        for table in &self.tables {
            table.add_code_pairs(pairs);
        }
    }
}
