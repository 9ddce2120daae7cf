// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::code_pair_put_back::CodePairPutBack;
use crate::record_holder::read_records;
use crate::{CodePair, CodePairValue, DxfError, DxfResult, RecordHolder, Registry};

/// A CLASSES section entry.
///
/// The entry's marker is read from either code 0 (R14+) or code 9 (R13) and is written back
/// with the same code.
#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    /// The marker value, normally `CLASS`.
    pub dxf_name: String,
    pub marker_code: i32,
    pub class_name: String,
    pub application_name: String,
    pub version_number: i32,
    pub flag_280: i8,
    pub flag_281: i8,
    records: Vec<CodePair>,
}

impl Default for Class {
    fn default() -> Self {
        Class {
            dxf_name: String::from("CLASS"),
            marker_code: 0,
            class_name: String::from("Default class name"),
            application_name: String::from("Default app name"),
            version_number: 0,
            flag_280: 0,
            flag_281: 0,
            records: vec![],
        }
    }
}

// internal visibility only
impl Class {
    pub(crate) fn read_classes(
        iter: &mut CodePairPutBack,
        registry: &mut Registry,
    ) -> DxfResult<Vec<Class>> {
        let mut classes = vec![];
        loop {
            let pair = match iter.next() {
                Some(Ok(pair)) => pair,
                Some(Err(e)) => return Err(e),
                None => return Err(DxfError::UnexpectedEndOfInput),
            };
            if pair.code != 0 && pair.code != 9 {
                error!("unexpected code {} reading classes", pair.code);
                return Err(DxfError::UnexpectedCodePair(
                    pair,
                    String::from("expected 0/CLASS or 9/CLASS"),
                ));
            }
            if pair.is_end_of_section() || pair.is_end_of_file() {
                iter.put_back(Ok(pair));
                break;
            }

            let mut class = Class {
                dxf_name: pair.assert_string()?,
                marker_code: pair.code,
                ..Default::default()
            };
            read_records(&mut class, iter, registry)?;
            classes.push(class);
        }

        Ok(classes)
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::new_str(self.marker_code, &self.dxf_name));
        pairs.push(CodePair::new_str(1, &self.class_name));
        pairs.push(CodePair::new_str(2, &self.application_name));
        pairs.push(CodePair::new_i32(90, self.version_number));
        pairs.push(CodePair::new_i8(280, self.flag_280));
        pairs.push(CodePair::new_i8(281, self.flag_281));
        self.write_records(pairs);
    }
}

impl RecordHolder for Class {
    fn records(&self) -> &[CodePair] {
        &self.records
    }
    fn records_mut(&mut self) -> &mut Vec<CodePair> {
        &mut self.records
    }
    fn handle_record(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            1 => self.class_name = pair.assert_string()?,
            2 => self.application_name = pair.assert_string()?,
            90 => self.version_number = pair.assert_i32()?,
            280 => self.flag_280 = pair.assert_i8()?,
            281 => self.flag_281 = pair.assert_i8()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
    fn typed_record(&self, code: i32, _index: usize) -> Option<CodePairValue> {
        match code {
            1 => Some(CodePairValue::Str(self.class_name.clone())),
            2 => Some(CodePairValue::Str(self.application_name.clone())),
            90 => Some(CodePairValue::Integer(self.version_number)),
            280 => Some(CodePairValue::Int8(self.flag_280)),
            281 => Some(CodePairValue::Int8(self.flag_281)),
            _ => None,
        }
    }
    /// R13 classes start with `9/CLASS` rather than `0/CLASS`.
    fn is_terminator_code(&self, code: i32) -> bool {
        code == 0 || code == 9
    }
}

//------------------------------------------------------------------------------
//                                                                ClassesSection
//------------------------------------------------------------------------------
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassesSection {
    pub classes: Vec<Class>,
}

impl ClassesSection {
    pub(crate) fn read(
        iter: &mut CodePairPutBack,
        registry: &mut Registry,
    ) -> DxfResult<ClassesSection> {
        Ok(ClassesSection {
            classes: Class::read_classes(iter, registry)?,
        })
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        for class in &self.classes {
            class.add_code_pairs(pairs);
        }
    }
}
