// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::io::{Cursor, Read};

use encoding_rs::Encoding;

use crate::helper_functions::*;
use crate::{CodePair, CodePairValue, DxfError, DxfResult, ExpectedType};

const BINARY_SENTINEL: &str = "AutoCAD Binary DXF";

pub(crate) trait CodePairIter: Iterator<Item = DxfResult<CodePair>> {
    /// The line (text) or byte offset (binary) of the next unread item.
    fn file_position(&self) -> usize;
    /// The fraction of the input consumed so far.
    fn relative_position(&self) -> f32;
    fn is_binary(&self) -> bool;
}

fn relative(cursor: &Cursor<Vec<u8>>) -> f32 {
    let len = cursor.get_ref().len();
    if len == 0 {
        1.0
    } else {
        cursor.position() as f32 / len as f32
    }
}

/// Directly returns code pairs.
#[cfg(test)]
pub(crate) struct DirectCodePairIter {
    pairs: Vec<CodePair>,
    offset: usize,
}

#[cfg(test)]
impl CodePairIter for DirectCodePairIter {
    fn file_position(&self) -> usize {
        self.offset
    }
    fn relative_position(&self) -> f32 {
        if self.pairs.is_empty() {
            1.0
        } else {
            self.offset as f32 / self.pairs.len() as f32
        }
    }
    fn is_binary(&self) -> bool {
        false
    }
}

#[cfg(test)]
impl Iterator for DirectCodePairIter {
    type Item = DxfResult<CodePair>;
    fn next(&mut self) -> Option<DxfResult<CodePair>> {
        if self.offset < self.pairs.len() {
            let pair = self.pairs[self.offset].clone();
            self.offset += 1;
            return Some(Ok(pair));
        }

        None
    }
}

#[cfg(test)]
impl DirectCodePairIter {
    pub(crate) fn new(pairs: Vec<CodePair>) -> Self {
        DirectCodePairIter { pairs, offset: 0 }
    }
}

/// Returns code pairs as read from text.  Handles the most common DXF files and when parsed from strings.
pub(crate) struct TextCodePairIter {
    reader: Cursor<Vec<u8>>,
    string_encoding: &'static Encoding,
    offset: usize,
}

impl CodePairIter for TextCodePairIter {
    fn file_position(&self) -> usize {
        self.offset
    }
    fn relative_position(&self) -> f32 {
        relative(&self.reader)
    }
    fn is_binary(&self) -> bool {
        false
    }
}

impl Iterator for TextCodePairIter {
    type Item = DxfResult<CodePair>;
    fn next(&mut self) -> Option<DxfResult<CodePair>> {
        self.read_code_pair()
    }
}

impl TextCodePairIter {
    pub fn new(reader: Cursor<Vec<u8>>, string_encoding: &'static Encoding) -> Self {
        TextCodePairIter {
            reader,
            string_encoding,
            offset: 0,
        }
    }
    fn read_code_pair(&mut self) -> Option<DxfResult<CodePair>> {
        // Read code.  If no line is available, fail gracefully.
        let allow_bom = self.offset == 0;
        self.offset += 1;
        let code_line = match read_line(&mut self.reader, allow_bom, encoding_rs::WINDOWS_1252) {
            Some(Ok(v)) => v,
            Some(Err(e)) => return Some(Err(e)),
            None => return None,
        };
        let code_line = code_line.trim();
        if code_line.is_empty() && self.reader.position() as usize >= self.reader.get_ref().len()
        {
            // trailing newline at the end of the file
            return None;
        }

        let code_offset = self.offset;
        let code = try_into_option!(parse_i32(code_line, code_offset));

        // Read value.  If no line is available die horribly.
        self.offset += 1;
        let value_line = match read_line(&mut self.reader, false, self.string_encoding) {
            Some(Ok(v)) => v,
            Some(Err(e)) => return Some(Err(e)),
            None => return Some(Err(DxfError::UnexpectedEndOfInput)),
        };

        let value = try_into_option!(parse_value(code, value_line, self.offset));
        Some(Ok(CodePair::new(code, value, code_offset)))
    }
}

fn parse_value(code: i32, value_line: String, offset: usize) -> DxfResult<CodePairValue> {
    let value = match ExpectedType::for_code(code) {
        ExpectedType::Int8 => CodePairValue::Int8(parse_i32(&value_line, offset)? as i8),
        ExpectedType::Int16 => CodePairValue::Short(parse_i32(&value_line, offset)? as i16),
        ExpectedType::Int32 => CodePairValue::Integer(parse_i32(&value_line, offset)?),
        ExpectedType::Float => CodePairValue::Float(parse_f64(&value_line, offset)? as f32),
        ExpectedType::Double => CodePairValue::Double(parse_f64(&value_line, offset)?),
        // primary text values keep their leading whitespace
        ExpectedType::Str if code == 1 => CodePairValue::Str(value_line),
        ExpectedType::Str => CodePairValue::Str(value_line.trim_start().to_string()),
        ExpectedType::Hex => CodePairValue::Hex(value_line.trim().to_string()),
    };
    Ok(value)
}

/// Returns code pairs as read from a binary file.  Created _after_ the sentinel has been consumed.
pub(crate) struct BinaryCodePairIter {
    reader: Cursor<Vec<u8>>,
    string_encoding: &'static Encoding,
    code_size_detection_complete: bool,
    codes_are_two_bytes: bool,
}

impl CodePairIter for BinaryCodePairIter {
    fn file_position(&self) -> usize {
        self.reader.position() as usize
    }
    fn relative_position(&self) -> f32 {
        relative(&self.reader)
    }
    fn is_binary(&self) -> bool {
        true
    }
}

impl Iterator for BinaryCodePairIter {
    type Item = DxfResult<CodePair>;
    fn next(&mut self) -> Option<DxfResult<CodePair>> {
        self.read_code_pair()
    }
}

impl BinaryCodePairIter {
    pub fn new(reader: Cursor<Vec<u8>>, string_encoding: &'static Encoding) -> Self {
        BinaryCodePairIter {
            reader,
            string_encoding,
            code_size_detection_complete: false,
            codes_are_two_bytes: false,
        }
    }
    fn read_code_pair(&mut self) -> Option<DxfResult<CodePair>> {
        let code_offset = self.file_position();

        // Read code.  If no data is available, fail gracefully.
        let mut code = match read_u8(&mut self.reader) {
            Some(Ok(c)) => i32::from(c),
            Some(Err(e)) => return Some(Err(DxfError::IoError(e))),
            None => return None,
        };

        // If reading a larger code and no data is available, die horribly.
        if self.codes_are_two_bytes {
            // post R13 codes are 2 bytes, read the second byte of the code
            let high_byte = i32::from(try_into_option!(read_u8_strict(&mut self.reader)));
            code += high_byte << 8;
        } else if code == 255 {
            // pre R13 codes are either 1 or 3 bytes
            code = i32::from(try_into_option!(read_i16(&mut self.reader)));
        }

        let value = try_into_option!(self.read_value(code));
        self.code_size_detection_complete = true;
        Some(Ok(CodePair::new(code, value, code_offset)))
    }
    fn read_value(&mut self, code: i32) -> DxfResult<CodePairValue> {
        let value = match ExpectedType::for_code(code) {
            ExpectedType::Int8 => {
                // after R13 8-bit values are encoded as a single byte
                if self.codes_are_two_bytes {
                    CodePairValue::Int8(read_u8_strict(&mut self.reader)? as i8)
                } else {
                    CodePairValue::Int8(read_i16(&mut self.reader)? as i8)
                }
            }
            ExpectedType::Int16 => CodePairValue::Short(read_i16(&mut self.reader)?),
            ExpectedType::Int32 => CodePairValue::Integer(read_i32(&mut self.reader)?),
            ExpectedType::Float => CodePairValue::Float(read_f32(&mut self.reader)?),
            ExpectedType::Double => CodePairValue::Double(read_f64(&mut self.reader)?),
            ExpectedType::Str => {
                let mut value = self.read_string_binary()?;
                if !self.code_size_detection_complete && code == 0 && value.is_empty() {
                    // If this is the first pair being read and the code is 0, the only valid string value is "SECTION".
                    // If the read value is instead empty, that means the string reader found a single 0x00 byte which
                    // indicates that this is a post R13 binary file where codes are always read as 2 bytes.  The 0x00
                    // byte was really the second byte of {0x00, 0x00}, so we need to do one more string read to catch
                    // the reader up.
                    self.codes_are_two_bytes = true;
                    value = self.read_string_binary()?;
                }
                CodePairValue::Str(value)
            }
            ExpectedType::Hex if is_binary_chunk(code) => {
                let length = read_u8_strict(&mut self.reader)? as usize;
                let mut data = Vec::with_capacity(length);
                for _ in 0..length {
                    data.push(read_u8_strict(&mut self.reader)?);
                }
                CodePairValue::Hex(bytes_to_hex(&data))
            }
            ExpectedType::Hex => CodePairValue::Hex(self.read_string_binary()?),
        };
        Ok(value)
    }
    fn read_string_binary(&mut self) -> DxfResult<String> {
        let mut bytes = vec![];
        loop {
            match read_u8(&mut self.reader) {
                Some(Ok(0)) => break,
                Some(Ok(c)) => bytes.push(c),
                Some(Err(e)) => return Err(DxfError::IoError(e)),
                None => return Err(DxfError::UnexpectedEndOfInput),
            }
        }

        let (text, _) = self.string_encoding.decode_without_bom_handling(&bytes);
        Ok(text.into_owned())
    }
}

/// Codes 310-319 carry raw bytes in binary files; the rest of the hex range is plain text.
pub(crate) fn is_binary_chunk(code: i32) -> bool {
    code >= 310 && code <= 319
}

//---------------------------

pub(crate) fn new_code_pair_iter_from_reader<T>(
    reader: &mut T,
    string_encoding: &'static Encoding,
) -> DxfResult<Box<dyn CodePairIter>>
where
    T: Read + ?Sized,
{
    let mut bytes = vec![];
    reader.read_to_end(&mut bytes)?;
    let sentinel_len = BINARY_SENTINEL.len();
    let is_binary = bytes.len() >= sentinel_len && &bytes[..sentinel_len] == BINARY_SENTINEL.as_bytes();
    let iter: Box<dyn CodePairIter> = if is_binary {
        let mut cursor = Cursor::new(bytes);
        cursor.set_position(sentinel_len as u64);
        // swallow the line terminator, then 0x1A,0x00
        let mut b = read_u8_strict(&mut cursor)?;
        if b == b'\r' {
            b = read_u8_strict(&mut cursor)?;
        }
        if b != b'\n' {
            return Err(DxfError::UnexpectedByte(b, cursor.position() as usize));
        }
        match read_u8_strict(&mut cursor)? {
            0x1A => (),
            _ => return Err(DxfError::InvalidBinaryFile),
        }
        match read_u8_strict(&mut cursor)? {
            0x00 => (),
            _ => return Err(DxfError::InvalidBinaryFile),
        }
        Box::new(BinaryCodePairIter::new(cursor, string_encoding))
    } else {
        Box::new(TextCodePairIter::new(Cursor::new(bytes), string_encoding))
    };
    Ok(iter)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::code_pair_iter::{BinaryCodePairIter, CodePairIter, TextCodePairIter};
    use crate::{CodePair, CodePairValue};

    use super::DirectCodePairIter;

    fn read_in_binary(codes_are_two_bytes: bool, data: Vec<u8>) -> CodePair {
        let mut reader = BinaryCodePairIter {
            reader: Cursor::new(data),
            string_encoding: encoding_rs::WINDOWS_1252,
            code_size_detection_complete: true,
            codes_are_two_bytes,
        };
        reader.read_code_pair().unwrap().unwrap()
    }

    #[test]
    fn read_string_in_binary() {
        // code 0x0001, value 0x41 = "A", NUL
        let pair = read_in_binary(true, vec![0x01, 0x00, 0x41, 0x00]);
        assert_eq!(1, pair.code);
        assert_eq!("A", pair.assert_string().expect("should be a string"));
    }

    #[test]
    fn read_binary_chunk_in_binary() {
        // code 0x136, length 2, data [0x01, 0x02]
        let pair = read_in_binary(true, vec![0x36, 0x01, 0x02, 0x01, 0x02]);
        assert_eq!(310, pair.code);
        assert_eq!(CodePairValue::Hex(String::from("0102")), pair.value);
    }

    #[test]
    fn read_escaped_code_in_legacy_binary() {
        // code 255 escape, code 1071 = 0x042F, value 5
        let pair = read_in_binary(false, vec![0xFF, 0x2F, 0x04, 0x05, 0x00, 0x00, 0x00]);
        assert_eq!(1071, pair.code);
        assert_eq!(5, pair.assert_i32().unwrap());
    }

    #[test]
    fn read_int8_in_legacy_binary_uses_two_bytes() {
        // code 255 escape, code 280 = 0x0118, value 3 as a 2 byte integer
        let pair = read_in_binary(false, vec![0xFF, 0x18, 0x01, 0x03, 0x00]);
        assert_eq!(280, pair.code);
        assert_eq!(3, pair.assert_i8().unwrap());
    }

    #[test]
    fn detect_two_byte_codes() {
        // 0/SECTION with a 2 byte code
        let mut data = vec![0x00, 0x00];
        data.extend_from_slice(b"SECTION\0");
        let mut reader = BinaryCodePairIter::new(Cursor::new(data), encoding_rs::WINDOWS_1252);
        let pair = reader.next().unwrap().unwrap();
        assert_eq!(CodePair::new_str(0, "SECTION"), pair);
        assert!(reader.codes_are_two_bytes);
    }

    fn read_in_text(data: &str) -> CodePair {
        let mut reader = TextCodePairIter::new(
            Cursor::new(data.as_bytes().to_vec()),
            encoding_rs::WINDOWS_1252,
        );
        reader.read_code_pair().unwrap().unwrap()
    }

    #[test]
    fn read_hex_in_ascii() {
        let pair = read_in_text("310\r\n0102");
        assert_eq!(310, pair.code);
        assert_eq!(CodePairValue::Hex(String::from("0102")), pair.value);
    }

    #[test]
    fn read_numbers_with_padding() {
        assert_eq!(
            CodePairValue::Short(7),
            read_in_text(" 62\r\n     7").value
        );
        assert_eq!(
            CodePairValue::Double(1.5),
            read_in_text(" 10\r\n1.5  ").value
        );
    }

    #[test]
    fn primary_text_keeps_leading_whitespace() {
        assert_eq!(CodePairValue::Str(String::from("  x")), read_in_text("1\r\n  x").value);
        assert_eq!(CodePairValue::Str(String::from("x")), read_in_text("2\r\n  x").value);
    }

    #[test]
    fn malformed_number_is_an_error() {
        let mut reader = TextCodePairIter::new(
            Cursor::new(b"10\r\nnot-a-number".to_vec()),
            encoding_rs::WINDOWS_1252,
        );
        assert!(reader.next().unwrap().is_err());
    }

    #[test]
    fn text_position_tracks_lines() {
        let mut reader = TextCodePairIter::new(
            Cursor::new(b"0\r\nSECTION\r\n2\r\nENTITIES".to_vec()),
            encoding_rs::WINDOWS_1252,
        );
        let first = reader.next().unwrap().unwrap();
        assert_eq!(1, first.offset);
        let second = reader.next().unwrap().unwrap();
        assert_eq!(3, second.offset);
        assert_eq!(4, reader.file_position());
    }

    #[test]
    fn read_code_pairs_directly() {
        // really just a smoke test to verify the direct code pair reader
        let mut reader = DirectCodePairIter::new(vec![
            CodePair::new_f64(10, 1.0),
            CodePair::new_str(1, "abc"),
        ]);
        assert_eq!(
            Some(CodePair::new_f64(10, 1.0)),
            reader.next().unwrap().ok()
        );
        assert_eq!(
            Some(CodePair::new_str(1, "abc")),
            reader.next().unwrap().ok()
        );
        assert!(reader.next().is_none());
    }
}
