// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

/// A hexadecimal object identifier as stored in group code 5.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Handle(pub u64);

impl Handle {
    pub fn empty() -> Self {
        Handle(0)
    }
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    pub fn as_string(self) -> String {
        format!("{:X}", self.0)
    }
    /// Parses a hex handle; malformed text yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        u64::from_str_radix(s.trim(), 16).ok().map(Handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_handles() {
        assert_eq!(Some(Handle(0x1F)), Handle::parse("1f"));
        assert_eq!(Some(Handle(0x2A)), Handle::parse(" 2A "));
        assert_eq!(None, Handle::parse("xyz"));
        assert_eq!("1F", Handle(0x1F).as_string());
    }
}
