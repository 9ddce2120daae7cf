// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::code_pair_put_back::CodePairPutBack;
use crate::record_holder::read_records;
use crate::{CodePair, DxfError, DxfResult, RecordHolder, Registry};

/// An OBJECTS section item.  No object type is modeled; every object keeps its records
/// verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub object_type: String,
    records: Vec<CodePair>,
}

impl Object {
    pub fn new(object_type: &str) -> Self {
        Object {
            object_type: String::from(object_type),
            records: vec![],
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::new_str(0, &self.object_type));
        self.write_records(pairs);
    }
}

impl RecordHolder for Object {
    fn records(&self) -> &[CodePair] {
        &self.records
    }
    fn records_mut(&mut self) -> &mut Vec<CodePair> {
        &mut self.records
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectsSection {
    pub objects: Vec<Object>,
}

impl ObjectsSection {
    pub(crate) fn read(
        iter: &mut CodePairPutBack,
        registry: &mut Registry,
    ) -> DxfResult<ObjectsSection> {
        let mut section = ObjectsSection::default();
        loop {
            let pair = next_pair!(iter);
            if pair.is_end_of_section() || pair.is_end_of_file() {
                iter.put_back(Ok(pair));
                break;
            }
            if pair.code != 0 {
                return Err(DxfError::UnexpectedCodePair(
                    pair,
                    String::from("expected 0/<object-type>"),
                ));
            }

            let mut object = Object::new(&pair.assert_string()?);
            read_records(&mut object, iter, registry)?;
            section.objects.push(object);
        }

        Ok(section)
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        for object in &self.objects {
            object.add_code_pairs(pairs);
        }
    }
}
