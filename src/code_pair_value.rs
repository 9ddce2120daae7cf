// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::fmt;
use std::fmt::{Debug, Formatter};

use crate::ExpectedType;

/// The value half of a `CodePair`.  The variant always matches `ExpectedType::for_code` of the
/// owning code.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CodePairValue {
    Int8(i8),
    Short(i16),
    Integer(i32),
    Float(f32),
    Double(f64),
    Str(String),
    Hex(String),
}

impl CodePairValue {
    /// Returns the zero value of the given kind.
    pub fn default_for(expected_type: ExpectedType) -> Self {
        match expected_type {
            ExpectedType::Int8 => CodePairValue::Int8(0),
            ExpectedType::Int16 => CodePairValue::Short(0),
            ExpectedType::Int32 => CodePairValue::Integer(0),
            ExpectedType::Float => CodePairValue::Float(0.0),
            ExpectedType::Double => CodePairValue::Double(0.0),
            ExpectedType::Str => CodePairValue::Str(String::new()),
            ExpectedType::Hex => CodePairValue::Hex(String::new()),
        }
    }
    pub fn expected_type(&self) -> ExpectedType {
        match *self {
            CodePairValue::Int8(_) => ExpectedType::Int8,
            CodePairValue::Short(_) => ExpectedType::Int16,
            CodePairValue::Integer(_) => ExpectedType::Int32,
            CodePairValue::Float(_) => ExpectedType::Float,
            CodePairValue::Double(_) => ExpectedType::Double,
            CodePairValue::Str(_) => ExpectedType::Str,
            CodePairValue::Hex(_) => ExpectedType::Hex,
        }
    }
    /// Converts this value into the given kind.  Integers and reals convert freely between
    /// widths; text kinds only convert to each other.
    pub(crate) fn coerce(self, expected_type: ExpectedType) -> Option<CodePairValue> {
        if self.expected_type() == expected_type {
            return Some(self);
        }

        match (self, expected_type) {
            (CodePairValue::Str(s), ExpectedType::Hex) => Some(CodePairValue::Hex(s)),
            (CodePairValue::Hex(s), ExpectedType::Str) => Some(CodePairValue::Str(s)),
            (CodePairValue::Str(_), _) | (CodePairValue::Hex(_), _) => None,
            (_, ExpectedType::Str) | (_, ExpectedType::Hex) => None,
            (v, ExpectedType::Float) => v.as_f64().map(|f| CodePairValue::Float(f as f32)),
            (v, ExpectedType::Double) => v.as_f64().map(CodePairValue::Double),
            (v, ExpectedType::Int8) => v.as_i32().map(|i| CodePairValue::Int8(i as i8)),
            (v, ExpectedType::Int16) => v.as_i32().map(|i| CodePairValue::Short(i as i16)),
            (v, ExpectedType::Int32) => v.as_i32().map(CodePairValue::Integer),
        }
    }
    pub(crate) fn as_i32(&self) -> Option<i32> {
        match *self {
            CodePairValue::Int8(i) => Some(i32::from(i)),
            CodePairValue::Short(s) => Some(i32::from(s)),
            CodePairValue::Integer(i) => Some(i),
            CodePairValue::Float(f) => Some(f as i32),
            CodePairValue::Double(d) => Some(d as i32),
            _ => None,
        }
    }
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match *self {
            CodePairValue::Int8(i) => Some(f64::from(i)),
            CodePairValue::Short(s) => Some(f64::from(s)),
            CodePairValue::Integer(i) => Some(f64::from(i)),
            CodePairValue::Float(f) => Some(f64::from(f)),
            CodePairValue::Double(d) => Some(d),
            _ => None,
        }
    }
}

impl Debug for CodePairValue {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            CodePairValue::Int8(i) => write!(formatter, "{: >6}", i),
            CodePairValue::Short(s) => write!(formatter, "{: >6}", s),
            CodePairValue::Integer(i) => write!(formatter, "{: >9}", i),
            CodePairValue::Float(f) => write!(formatter, "{}", format_f64(f64::from(f))),
            CodePairValue::Double(d) => write!(formatter, "{}", format_f64(d)),
            CodePairValue::Str(ref s) => write!(formatter, "{}", s),
            CodePairValue::Hex(ref s) => write!(formatter, "{}", s),
        }
    }
}

/// Formats an `f64` value with up to 12 digits of precision, ensuring at least one trailing digit after the decimal.
pub(crate) fn format_f64(val: f64) -> String {
    // format with 12 digits of precision
    let mut val = format!("{:.12}", val);

    // trim trailing zeros
    while val.ends_with('0') {
        val.pop();
    }

    // ensure it doesn't end with a decimal
    if val.ends_with('.') {
        val.push('0');
    }

    val
}
