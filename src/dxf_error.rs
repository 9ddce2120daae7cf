// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::error;
use std::fmt;
use std::io;
use std::num;

use crate::CodePair;

#[derive(Debug)]
pub enum DxfError {
    IoError(io::Error),
    ParseFloatError(num::ParseFloatError, usize),
    ParseIntError(num::ParseIntError, usize),
    ParseError(usize),
    UnexpectedCode(i32, usize),
    UnexpectedCodePair(CodePair, String),
    UnexpectedByte(u8, usize),
    UnexpectedEndOfInput,
    WrongValueType(usize),
    InvalidBinaryFile,
    Aborted(usize),
}

impl From<io::Error> for DxfError {
    fn from(ioe: io::Error) -> DxfError {
        DxfError::IoError(ioe)
    }
}

impl DxfError {
    /// Returns `true` if reading stopped because the progress callback asked to cancel.
    pub fn is_aborted(&self) -> bool {
        match *self {
            DxfError::Aborted(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DxfError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DxfError::IoError(ref e) => write!(formatter, "{}", e),
            DxfError::ParseFloatError(ref e, o) => write!(formatter, "{} at line/offset {}", e, o),
            DxfError::ParseIntError(ref e, o) => write!(formatter, "{} at line/offset {}", e, o),
            DxfError::ParseError(o) => write!(
                formatter,
                "there was a general parsing error at line/offset {}",
                o
            ),
            DxfError::UnexpectedCode(c, o) => write!(
                formatter,
                "an unexpected code '{}' was encountered at line/offset {}",
                c, o
            ),
            DxfError::UnexpectedCodePair(ref cp, ref s) => write!(
                formatter,
                "the code pair '{:?}' was not expected at this time: {} at line/offset {}",
                cp, s, cp.offset
            ),
            DxfError::UnexpectedByte(ref b, o) => write!(
                formatter,
                "the byte '0x{:02x}' was not expected at this time at line/offset {}",
                b, o
            ),
            DxfError::UnexpectedEndOfInput => write!(
                formatter,
                "the input unexpectedly ended before the drawing was completely loaded"
            ),
            DxfError::WrongValueType(o) => write!(
                formatter,
                "the CodePairValue does not contain the requested type at line/offset {}",
                o
            ),
            DxfError::InvalidBinaryFile => write!(formatter, "the binary file is invalid"),
            DxfError::Aborted(o) => write!(
                formatter,
                "loading was aborted by the progress callback at line/offset {}",
                o
            ),
        }
    }
}

impl error::Error for DxfError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            DxfError::IoError(ref e) => Some(e),
            DxfError::ParseFloatError(ref e, _) => Some(e),
            DxfError::ParseIntError(ref e, _) => Some(e),
            _ => None,
        }
    }
}
