// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::io;
use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::Encoding;

use crate::{DxfError, DxfResult};

macro_rules! try_into_option {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => return Some(Err(e)),
        }
    };
}

macro_rules! next_pair {
    ($expr:expr) => {
        match $expr.next() {
            Some(Ok(pair)) => pair,
            Some(Err(e)) => return Err(e),
            None => return Err(DxfError::UnexpectedEndOfInput),
        }
    };
}

pub(crate) fn parse_i32(s: &str, offset: usize) -> DxfResult<i32> {
    match s.trim().parse::<i32>() {
        Ok(i) => Ok(i),
        Err(e) => Err(DxfError::ParseIntError(e, offset)),
    }
}

pub(crate) fn parse_f64(s: &str, offset: usize) -> DxfResult<f64> {
    match s.trim().parse::<f64>() {
        Ok(f) => Ok(f),
        Err(e) => Err(DxfError::ParseFloatError(e, offset)),
    }
}

/// Reads one line, stripping the line terminator.  Returns `None` at end of input.
pub(crate) fn read_line<T>(
    reader: &mut T,
    allow_bom: bool,
    encoding: &'static Encoding,
) -> Option<DxfResult<String>>
where
    T: Read + ?Sized,
{
    let mut bytes = vec![];
    let mut saw_any = false;
    loop {
        match read_u8(reader) {
            Some(Ok(b'\n')) => {
                saw_any = true;
                break;
            }
            Some(Ok(b)) => {
                saw_any = true;
                bytes.push(b);
            }
            Some(Err(e)) => return Some(Err(DxfError::IoError(e))),
            None => break,
        }
    }

    if !saw_any {
        return None;
    }

    if bytes.ends_with(&[b'\r']) {
        bytes.pop();
    }

    if allow_bom && bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes.drain(0..3);
    }

    let (text, _) = encoding.decode_without_bom_handling(&bytes);
    Some(Ok(text.into_owned()))
}

pub(crate) fn read_u8<T>(reader: &mut T) -> Option<io::Result<u8>>
where
    T: Read + ?Sized,
{
    let mut buf = [0];
    match reader.read(&mut buf) {
        Ok(0) => None,
        Ok(_) => Some(Ok(buf[0])),
        Err(e) => Some(Err(e)),
    }
}

pub(crate) fn read_u8_strict<T>(reader: &mut T) -> DxfResult<u8>
where
    T: Read + ?Sized,
{
    match read_u8(reader) {
        Some(Ok(b)) => Ok(b),
        Some(Err(e)) => Err(DxfError::IoError(e)),
        None => Err(DxfError::UnexpectedEndOfInput),
    }
}

pub(crate) fn read_i16<T: Read>(reader: &mut T) -> DxfResult<i16> {
    reader.read_i16::<LittleEndian>().map_err(eof_or_io)
}

pub(crate) fn read_i32<T: Read>(reader: &mut T) -> DxfResult<i32> {
    reader.read_i32::<LittleEndian>().map_err(eof_or_io)
}

pub(crate) fn read_f32<T: Read>(reader: &mut T) -> DxfResult<f32> {
    reader.read_f32::<LittleEndian>().map_err(eof_or_io)
}

pub(crate) fn read_f64<T: Read>(reader: &mut T) -> DxfResult<f64> {
    reader.read_f64::<LittleEndian>().map_err(eof_or_io)
}

fn eof_or_io(e: io::Error) -> DxfError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => DxfError::UnexpectedEndOfInput,
        _ => DxfError::IoError(e),
    }
}

/// Formats raw bytes as upper-case hex text.
pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Parses hex text into bytes; an odd trailing digit is treated as a low nibble.
pub(crate) fn parse_hex_string(data: &str, bytes: &mut Vec<u8>, offset: usize) -> DxfResult<()> {
    fn char_to_value(c: char, offset: usize) -> DxfResult<u8> {
        match c.to_digit(16) {
            Some(d) => Ok(d as u8),
            None => Err(DxfError::ParseError(offset)),
        }
    }

    let data = data.trim();
    let mut complete_byte = data.len() % 2 != 0; // handle strings with an odd number of bytes
    let mut current_byte = 0u8;
    for c in data.chars() {
        let value = char_to_value(c, offset)?;
        if complete_byte {
            let x = current_byte * 16 + value;
            bytes.push(x);
            current_byte = 0;
        } else {
            current_byte = value;
        }

        complete_byte = !complete_byte;
    }

    Ok(())
}
