// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use once_cell::sync::Lazy;

/// The kind of value carried by a group code.  The kind is a pure function of the code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExpectedType {
    Int8,
    Int16,
    Int32,
    Float,
    Double,
    Str,
    Hex,
}

const TABLE_SIZE: usize = 1072;

static TYPE_TABLE: Lazy<[ExpectedType; TABLE_SIZE]> = Lazy::new(|| {
    let mut table = [ExpectedType::Str; TABLE_SIZE];
    for (code, slot) in table.iter_mut().enumerate() {
        *slot = classify(code as i32);
    }
    table
});

impl ExpectedType {
    /// Returns the value kind for the specified group code.  Defined for every `i32`.
    pub fn for_code(code: i32) -> ExpectedType {
        if code >= 0 && (code as usize) < TABLE_SIZE {
            TYPE_TABLE[code as usize]
        } else {
            ExpectedType::Str
        }
    }
}

fn classify(code: i32) -> ExpectedType {
    match code {
        std::i32::MIN..=-1 => ExpectedType::Str,
        0..=9 => ExpectedType::Str,
        10..=59 => ExpectedType::Double,
        60..=79 => ExpectedType::Int16,
        80..=89 => ExpectedType::Str,
        90..=99 => ExpectedType::Int32,
        100..=139 => ExpectedType::Str,
        140..=147 => ExpectedType::Double,
        148..=169 => ExpectedType::Str,
        170..=178 => ExpectedType::Int16,
        210 | 220 | 230 => ExpectedType::Double,
        179..=269 => ExpectedType::Str,
        270..=275 => ExpectedType::Int8,
        276..=279 => ExpectedType::Str,
        280..=289 => ExpectedType::Int8,
        290..=309 => ExpectedType::Str,
        310..=369 => ExpectedType::Hex,
        370..=999 => ExpectedType::Str,
        1000..=1009 => ExpectedType::Str,
        // control point data in extended records is kept as text
        1010..=1059 => ExpectedType::Str,
        1060..=1070 => ExpectedType::Int16,
        1071 => ExpectedType::Int32,
        _ => ExpectedType::Str,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrusion_codes_are_doubles() {
        for code in &[210, 220, 230] {
            assert_eq!(ExpectedType::Double, ExpectedType::for_code(*code));
        }
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(211));
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(239));
    }

    #[test]
    fn classification_is_stable_over_whole_range() {
        for code in 0..TABLE_SIZE as i32 {
            assert_eq!(classify(code), ExpectedType::for_code(code));
            assert_eq!(ExpectedType::for_code(code), ExpectedType::for_code(code));
        }
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(999));
    }

    #[test]
    fn range_boundaries() {
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(-5));
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(9));
        assert_eq!(ExpectedType::Double, ExpectedType::for_code(10));
        assert_eq!(ExpectedType::Double, ExpectedType::for_code(59));
        assert_eq!(ExpectedType::Int16, ExpectedType::for_code(60));
        assert_eq!(ExpectedType::Int16, ExpectedType::for_code(79));
        assert_eq!(ExpectedType::Int32, ExpectedType::for_code(90));
        assert_eq!(ExpectedType::Double, ExpectedType::for_code(147));
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(148));
        assert_eq!(ExpectedType::Int16, ExpectedType::for_code(178));
        assert_eq!(ExpectedType::Int8, ExpectedType::for_code(270));
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(276));
        assert_eq!(ExpectedType::Int8, ExpectedType::for_code(289));
        assert_eq!(ExpectedType::Hex, ExpectedType::for_code(310));
        assert_eq!(ExpectedType::Hex, ExpectedType::for_code(369));
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(1040));
        assert_eq!(ExpectedType::Int16, ExpectedType::for_code(1070));
        assert_eq!(ExpectedType::Int32, ExpectedType::for_code(1071));
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(1072));
        assert_eq!(ExpectedType::Str, ExpectedType::for_code(100_000));
    }
}
