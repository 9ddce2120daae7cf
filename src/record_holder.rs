// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::code_pair_put_back::CodePairPutBack;
use crate::{CodePair, CodePairValue, DxfResult, Registry};

/// An object persisted as a run of code pairs.
///
/// Every field read for the object is first offered to `handle_record`; fields it declines
/// are kept, in order, as generic records and written back unchanged.  Implementors only
/// provide the record storage and whichever hooks their typed fields need.
pub trait RecordHolder {
    /// The generic records kept for fields with no typed counterpart.
    fn records(&self) -> &[CodePair];
    fn records_mut(&mut self) -> &mut Vec<CodePair>;

    /// Consumes `pair` into a typed field; returns `false` to keep it as a generic record.
    fn handle_record(&mut self, _pair: &CodePair) -> DxfResult<bool> {
        Ok(false)
    }
    /// Like `handle_record`, but called while reading so fields can register names, layers,
    /// and handles with the model.
    fn handle_read_record(&mut self, pair: &CodePair, _registry: &mut Registry) -> DxfResult<bool> {
        self.handle_record(pair)
    }
    /// The value of a typed field, if `code` is stored as one.
    fn typed_record(&self, _code: i32, _index: usize) -> Option<CodePairValue> {
        None
    }
    /// Filters generic records on write.
    fn should_write_record(&self, _code: i32) -> bool {
        true
    }
    /// Codes that must be changed through a dedicated setter instead of `set_record`.
    fn is_protected_code(&self, _code: i32) -> bool {
        false
    }
    /// Codes that start the next object while reading.
    fn is_terminator_code(&self, code: i32) -> bool {
        code == 0
    }

    /// Sets the first record with `code`.  See `set_indexed_record`.
    fn set_record(&mut self, code: i32, value: CodePairValue) -> DxfResult<bool> {
        self.set_indexed_record(code, value, 0)
    }
    /// Sets the `index`th record with `code`, overwriting it if present and appending it
    /// otherwise.  Returns `Ok(false)` without changing anything for a protected code.
    fn set_indexed_record(
        &mut self,
        code: i32,
        value: CodePairValue,
        index: usize,
    ) -> DxfResult<bool> {
        if self.is_protected_code(code) {
            error!("group code {} cannot be set through set_record", code);
            debug_assert!(false, "group code {} cannot be set through set_record", code);
            return Ok(false);
        }

        let pair = CodePair::with_value(code, value)?;
        if !self.handle_record(&pair)? {
            let existing = self
                .records_mut()
                .iter_mut()
                .filter(|r| r.code == code)
                .nth(index);
            match existing {
                Some(record) => record.value = pair.value,
                None => self.records_mut().push(pair),
            }
        }

        Ok(true)
    }
    /// Sets several records at once.  New generic records are placed ahead of the existing
    /// ones.  Returns how many values were applied; protected codes are skipped.
    fn set_records(&mut self, values: Vec<(i32, CodePairValue)>) -> DxfResult<usize> {
        let mut applied = 0;
        let mut new_records = vec![];
        for (code, value) in values {
            if self.is_protected_code(code) {
                error!("group code {} cannot be set through set_records", code);
                debug_assert!(false, "group code {} cannot be set through set_records", code);
                continue;
            }

            let pair = CodePair::with_value(code, value)?;
            applied += 1;
            if self.handle_record(&pair)? {
                continue;
            }
            match self.records_mut().iter_mut().find(|r| r.code == code) {
                Some(record) => record.value = pair.value,
                None => new_records.push(pair),
            }
        }

        if !new_records.is_empty() {
            let records = self.records_mut();
            let old = std::mem::replace(records, new_records);
            records.extend(old);
        }

        Ok(applied)
    }
    /// The `index`th value for `code`, checking typed fields before generic records.
    fn get_record(&self, code: i32, index: usize) -> Option<CodePairValue> {
        match self.typed_record(code, index) {
            Some(value) => Some(value),
            None => self.find_record(code, index).map(|r| r.value.clone()),
        }
    }
    /// The `index`th generic record with `code`.
    fn find_record(&self, code: i32, index: usize) -> Option<&CodePair> {
        self.records().iter().filter(|r| r.code == code).nth(index)
    }
    fn find_record_mut(&mut self, code: i32, index: usize) -> Option<&mut CodePair> {
        self.records_mut()
            .iter_mut()
            .filter(|r| r.code == code)
            .nth(index)
    }
    /// A deep copy of the generic records.
    fn copy_records(&self) -> Vec<CodePair> {
        self.records().to_vec()
    }
    /// The number of records this object writes.
    fn count_records(&self) -> usize {
        self.records()
            .iter()
            .filter(|r| self.should_write_record(r.code))
            .count()
    }
    /// Appends the generic records that pass `should_write_record`.
    fn write_records(&self, pairs: &mut Vec<CodePair>) {
        for record in self.records() {
            if self.should_write_record(record.code) {
                pairs.push(record.clone());
            }
        }
    }
}

/// Reads fields into `holder` until the next terminator code (0 unless the holder says
/// otherwise), which is put back for the caller.
pub(crate) fn read_records<H>(
    holder: &mut H,
    iter: &mut CodePairPutBack,
    registry: &mut Registry,
) -> DxfResult<()>
where
    H: RecordHolder + ?Sized,
{
    loop {
        match iter.next() {
            Some(Ok(pair)) if holder.is_terminator_code(pair.code) => {
                iter.put_back(Ok(pair));
                return Ok(());
            }
            Some(Ok(pair)) => {
                if !holder.handle_read_record(&pair, registry)? {
                    holder.records_mut().push(pair);
                }
            }
            Some(Err(e)) => {
                error!("unable to read record data: {}", e);
                return Err(e);
            }
            // end of input also ends the object; the caller decides whether that is an error
            None => return Ok(()),
        }
    }
}
