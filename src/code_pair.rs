// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::fmt;
use std::fmt::{Debug, Formatter};

use crate::{CodePairValue, DxfError, DxfResult, ExpectedType};

/// The basic primitive of a DXF file; a code indicating the type of the data contained, and the
/// data itself.  Fields that an item does not model directly are kept as `CodePair` records so
/// they can be written back unchanged.
#[derive(Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CodePair {
    pub code: i32,
    pub value: CodePairValue,
    pub offset: usize,
}

impl CodePair {
    pub fn new(code: i32, val: CodePairValue, offset: usize) -> Self {
        CodePair {
            code,
            value: val,
            offset,
        }
    }
    /// Creates a record holding the default value of the kind dictated by `code`.
    pub fn create(code: i32) -> Self {
        CodePair::new(
            code,
            CodePairValue::default_for(ExpectedType::for_code(code)),
            0,
        )
    }
    /// Creates a record for `code`, converting `val` to the kind dictated by the code.
    pub fn with_value(code: i32, val: CodePairValue) -> DxfResult<Self> {
        match val.coerce(ExpectedType::for_code(code)) {
            Some(v) => Ok(CodePair::new(code, v, 0)),
            None => Err(DxfError::WrongValueType(0)),
        }
    }
    pub fn new_str(code: i32, val: &str) -> Self {
        CodePair::new(code, CodePairValue::Str(val.to_string()), 0)
    }
    pub fn new_hex(code: i32, val: &str) -> Self {
        CodePair::new(code, CodePairValue::Hex(val.to_string()), 0)
    }
    pub fn new_i8(code: i32, val: i8) -> Self {
        CodePair::new(code, CodePairValue::Int8(val), 0)
    }
    pub fn new_i16(code: i32, val: i16) -> Self {
        CodePair::new(code, CodePairValue::Short(val), 0)
    }
    pub fn new_i32(code: i32, val: i32) -> Self {
        CodePair::new(code, CodePairValue::Integer(val), 0)
    }
    pub fn new_f32(code: i32, val: f32) -> Self {
        CodePair::new(code, CodePairValue::Float(val), 0)
    }
    pub fn new_f64(code: i32, val: f64) -> Self {
        CodePair::new(code, CodePairValue::Double(val), 0)
    }
    pub fn assert_i8(&self) -> DxfResult<i8> {
        match self.value {
            CodePairValue::Int8(i) => Ok(i),
            _ => Err(DxfError::WrongValueType(self.offset)),
        }
    }
    pub fn assert_i16(&self) -> DxfResult<i16> {
        match self.value {
            CodePairValue::Int8(i) => Ok(i16::from(i)),
            CodePairValue::Short(s) => Ok(s),
            _ => Err(DxfError::WrongValueType(self.offset)),
        }
    }
    pub fn assert_i32(&self) -> DxfResult<i32> {
        match self.value {
            CodePairValue::Integer(i) => Ok(i),
            CodePairValue::Short(s) => Ok(i32::from(s)),
            _ => Err(DxfError::WrongValueType(self.offset)),
        }
    }
    pub fn assert_f64(&self) -> DxfResult<f64> {
        match self.value {
            CodePairValue::Double(f) => Ok(f),
            CodePairValue::Float(f) => Ok(f64::from(f)),
            _ => Err(DxfError::WrongValueType(self.offset)),
        }
    }
    pub fn assert_string(&self) -> DxfResult<String> {
        match self.value {
            CodePairValue::Str(ref s) | CodePairValue::Hex(ref s) => Ok(s.clone()),
            _ => Err(DxfError::WrongValueType(self.offset)),
        }
    }
    /// Borrows the text of a string or hex record.
    pub fn as_str(&self) -> Option<&str> {
        match self.value {
            CodePairValue::Str(ref s) | CodePairValue::Hex(ref s) => Some(s),
            _ => None,
        }
    }
    /// `true` for the `0/ENDSEC` section terminator.
    pub fn is_end_of_section(&self) -> bool {
        self.is_marker("ENDSEC")
    }
    /// `true` for the `0/EOF` file terminator.
    pub fn is_end_of_file(&self) -> bool {
        self.is_marker("EOF")
    }
    pub(crate) fn is_marker(&self, name: &str) -> bool {
        match self.value {
            CodePairValue::Str(ref s) => self.code == 0 && s == name,
            _ => false,
        }
    }
}

impl Debug for CodePair {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}/{:?}", self.code, &self.value)
    }
}

impl PartialEq for CodePair {
    fn eq(&self, other: &CodePair) -> bool {
        // not comparing offsets
        self.code == other.code && self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use crate::{CodePair, CodePairValue};

    #[test]
    fn create_uses_classified_kind() {
        assert_eq!(CodePairValue::Double(0.0), CodePair::create(220).value);
        assert_eq!(CodePairValue::Short(0), CodePair::create(62).value);
        assert_eq!(CodePairValue::Int8(0), CodePair::create(280).value);
        assert_eq!(CodePairValue::Hex(String::new()), CodePair::create(330).value);
        assert_eq!(CodePairValue::Str(String::new()), CodePair::create(999).value);
    }

    #[test]
    fn with_value_converts_width() {
        let pair = CodePair::with_value(90, CodePairValue::Short(4)).unwrap();
        assert_eq!(CodePairValue::Integer(4), pair.value);
        assert!(CodePair::with_value(10, CodePairValue::Str(String::from("x"))).is_err());
    }

    #[test]
    fn sentinel_records() {
        assert!(CodePair::new_str(0, "ENDSEC").is_end_of_section());
        assert!(CodePair::new_str(0, "EOF").is_end_of_file());
        assert!(!CodePair::new_str(2, "ENDSEC").is_end_of_section());
        assert!(!CodePair::new_str(0, "SECTION").is_end_of_file());
    }
}
