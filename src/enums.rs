// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::fmt;

/// The drawing database version named by the `$ACADVER` header variable.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum AcadVersion {
    R10,
    R12,
    R13,
    R14,
    R2000,
    R2004,
    R2007,
    R2010,
    R2013,
    R2018,
}

impl AcadVersion {
    /// Maps an `$ACADVER` value to a version; unrecognized values yield `None`.
    pub fn from(val: &str) -> Option<AcadVersion> {
        match val.trim() {
            "AC1006" => Some(AcadVersion::R10),
            "AC1009" => Some(AcadVersion::R12),
            "AC1011" | "AC1012" => Some(AcadVersion::R13),
            "AC1013" | "AC1014" => Some(AcadVersion::R14),
            "AC1015" => Some(AcadVersion::R2000),
            "AC1018" => Some(AcadVersion::R2004),
            "AC1021" => Some(AcadVersion::R2007),
            "AC1024" => Some(AcadVersion::R2010),
            "AC1027" => Some(AcadVersion::R2013),
            "AC1032" => Some(AcadVersion::R2018),
            _ => None,
        }
    }
}

impl fmt::Display for AcadVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AcadVersion::R10 => "r10",
            AcadVersion::R12 => "r11/r12",
            AcadVersion::R13 => "r13",
            AcadVersion::R14 => "r14",
            AcadVersion::R2000 => "r2000",
            AcadVersion::R2004 => "r2004",
            AcadVersion::R2007 => "r2007",
            AcadVersion::R2010 => "r2010",
            AcadVersion::R2013 => "r2013",
            AcadVersion::R2018 => "r2018",
        };
        write!(f, "{}", name)
    }
}

enum_from_primitive! {
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum HorizontalTextJustification {
    Left = 0,
    Center = 1,
    Right = 2,
    Aligned = 3,
    Middle = 4,
    Fit = 5,
}
}

enum_from_primitive! {
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum PolylineCurvedAndSmoothSurfaceType {
    None = 0,
    QuadraticBSpline = 5,
    CubicBSpline = 6,
    Bezier = 8,
}
}

enum_from_primitive! {
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum VerticalTextJustification {
    Baseline = 0,
    Bottom = 1,
    Middle = 2,
    Top = 3,
}
}
