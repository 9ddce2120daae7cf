// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::code_pair_put_back::CodePairPutBack;
use crate::enums::*;
use crate::{CodePair, CodePairValue, DxfError, DxfResult};

/// The HEADER section: an ordered run of variables, each a `9/$NAME` marker followed by its
/// value records up to the next marker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeaderSection {
    pub records: Vec<CodePair>,
}

// public implementation
impl HeaderSection {
    /// The value records of `name`, or `None` if the variable is not present.
    pub fn get_variable(&self, name: &str) -> Option<Vec<CodePair>> {
        let start = self.find_variable(name)? + 1;
        Some(
            self.records[start..]
                .iter()
                .take_while(|r| r.code != 9)
                .cloned()
                .collect(),
        )
    }
    /// The first value of `name`.
    pub fn get_value(&self, name: &str) -> Option<CodePairValue> {
        let index = self.find_variable(name)? + 1;
        match self.records.get(index) {
            Some(r) if r.code != 9 => Some(r.value.clone()),
            _ => None,
        }
    }
    /// Overwrites the values of `name` whose codes match `values`.  A missing variable is
    /// appended with exactly `values`.  Returns how many values were stored.
    ///
    /// Each value goes to the first record with its code, so when `values` repeats a code
    /// only that first record is assigned, and it ends up holding the last such value.
    pub fn set_variable(&mut self, name: &str, values: &[CodePair]) -> usize {
        let start = match self.find_variable(name) {
            Some(index) => index + 1,
            None => {
                self.records.push(CodePair::new_str(9, name));
                let start = self.records.len();
                for value in values {
                    self.records.push(CodePair::create(value.code));
                }
                start
            }
        };

        let mut count = 0;
        for value in values {
            let found = self.records[start..]
                .iter_mut()
                .take_while(|r| r.code != 9)
                .find(|r| r.code == value.code);
            if let Some(record) = found {
                record.value = value.value.clone();
                count += 1;
            }
        }

        debug!("set header variable {} ({} values)", name, count);
        count
    }
    /// The file version recorded in `$ACADVER`.
    pub fn version(&self) -> Option<AcadVersion> {
        match self.get_value("$ACADVER") {
            Some(CodePairValue::Str(ref s)) => AcadVersion::from(s),
            _ => None,
        }
    }
}

// internal visibility only
impl HeaderSection {
    pub(crate) fn read(iter: &mut CodePairPutBack) -> DxfResult<HeaderSection> {
        let mut header = HeaderSection::default();
        loop {
            match iter.next() {
                Some(Ok(pair)) => {
                    if pair.code == 0 {
                        iter.put_back(Ok(pair));
                        break;
                    }
                    if header.records.is_empty() && pair.code != 9 {
                        return Err(DxfError::UnexpectedCodePair(
                            pair,
                            String::from("expected 9/<variable-name>"),
                        ));
                    }
                    header.records.push(pair);
                }
                Some(Err(e)) => return Err(e),
                None => break,
            }
        }

        Ok(header)
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        pairs.extend(self.records.iter().cloned());
    }
}

// private implementation
impl HeaderSection {
    fn find_variable(&self, name: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.code == 9 && r.as_str() == Some(name))
    }
}
