// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use encoding_rs::Encoding;

use crate::code_pair_iter::is_binary_chunk;
use crate::helper_functions::parse_hex_string;
use crate::{CodePair, CodePairValue, DxfResult};

/// The output stream: serializes code pairs as text or binary DXF.
pub(crate) struct CodePairWriter<T>
where
    T: Write,
{
    writer: T,
    as_ascii: bool,
    string_encoding: &'static Encoding,
}

impl<T: Write> CodePairWriter<T> {
    pub fn new_ascii_writer(writer: T, string_encoding: &'static Encoding) -> Self {
        CodePairWriter {
            writer,
            as_ascii: true,
            string_encoding,
        }
    }
    pub fn new_binary_writer(writer: T, string_encoding: &'static Encoding) -> Self {
        CodePairWriter {
            writer,
            as_ascii: false,
            string_encoding,
        }
    }
    pub fn write_prelude(&mut self) -> DxfResult<()> {
        if !self.as_ascii {
            self.writer.write_all(b"AutoCAD Binary DXF\r\n")?;
            self.writer.write_u8(0x1A)?;
            self.writer.write_u8(0x00)?;
        }

        Ok(())
    }
    pub fn write_code_pair(&mut self, pair: &CodePair) -> DxfResult<()> {
        if self.as_ascii {
            self.write_ascii_code_pair(pair)
        } else {
            self.write_binary_code_pair(pair)
        }
    }
    pub fn write_code_pairs(&mut self, pairs: &[CodePair]) -> DxfResult<()> {
        for pair in pairs {
            self.write_code_pair(pair)?;
        }
        Ok(())
    }
    fn write_ascii_code_pair(&mut self, pair: &CodePair) -> DxfResult<()> {
        self.writer.write_fmt(format_args!("{: >3}\r\n", pair.code))?;
        match pair.value {
            CodePairValue::Str(ref s) | CodePairValue::Hex(ref s) => {
                let (bytes, _, _) = self.string_encoding.encode(s);
                self.writer.write_all(&bytes)?;
                self.writer.write_all(b"\r\n")?;
            }
            ref v => self.writer.write_fmt(format_args!("{:?}\r\n", v))?,
        }
        Ok(())
    }
    fn write_binary_code_pair(&mut self, pair: &CodePair) -> DxfResult<()> {
        // write code
        if pair.code >= 255 {
            self.writer.write_u8(255)?;
            self.writer.write_i16::<LittleEndian>(pair.code as i16)?;
        } else {
            self.writer.write_u8(pair.code as u8)?;
        }

        // write value
        match pair.value {
            CodePairValue::Int8(i) => self.writer.write_i16::<LittleEndian>(i16::from(i))?,
            CodePairValue::Short(s) => self.writer.write_i16::<LittleEndian>(s)?,
            CodePairValue::Integer(i) => self.writer.write_i32::<LittleEndian>(i)?,
            CodePairValue::Float(f) => self.writer.write_f32::<LittleEndian>(f)?,
            CodePairValue::Double(d) => self.writer.write_f64::<LittleEndian>(d)?,
            CodePairValue::Hex(ref s) if is_binary_chunk(pair.code) => {
                let mut data = vec![];
                parse_hex_string(s, &mut data, pair.offset)?;
                // the length prefix is a single byte
                if data.len() > 255 {
                    warn!("binary chunk for code {} truncated to 255 bytes", pair.code);
                    data.truncate(255);
                }
                self.writer.write_u8(data.len() as u8)?;
                self.writer.write_all(&data)?;
            }
            CodePairValue::Str(ref s) | CodePairValue::Hex(ref s) => {
                let (bytes, _, _) = self.string_encoding.encode(s);
                self.writer.write_all(&bytes)?;
                self.writer.write_u8(0)?;
            }
        }

        Ok(())
    }
}
