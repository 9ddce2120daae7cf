// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use enum_primitive::FromPrimitive;

use crate::entities::Extrusion;
use crate::enums::*;
use crate::{CodePair, CodePairValue, DxfResult, Point};

/// A single line of text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Text {
    pub value: String,
    pub location: Point,
    /// Only meaningful for justifications other than left/baseline.
    pub second_alignment_point: Point,
    pub text_height: f64,
    pub relative_x_scale_factor: f64,
    pub rotation: f64,
    pub horizontal_text_justification: HorizontalTextJustification,
    pub vertical_text_justification: VerticalTextJustification,
    pub extrusion: Extrusion,
}

impl Default for Text {
    fn default() -> Self {
        Text {
            value: String::new(),
            location: Point::origin(),
            second_alignment_point: Point::origin(),
            text_height: 1.0,
            relative_x_scale_factor: 1.0,
            rotation: 0.0,
            horizontal_text_justification: HorizontalTextJustification::Left,
            vertical_text_justification: VerticalTextJustification::Baseline,
            extrusion: Default::default(),
        }
    }
}

impl Text {
    pub fn new(value: &str, location: Point, text_height: f64) -> Self {
        Text {
            value: String::from(value),
            location,
            text_height,
            ..Default::default()
        }
    }
    fn is_justified(&self) -> bool {
        self.horizontal_text_justification != HorizontalTextJustification::Left
            || self.vertical_text_justification != VerticalTextJustification::Baseline
    }
    pub(crate) fn apply(&mut self, pair: &CodePair) -> DxfResult<bool> {
        match pair.code {
            1 => self.value = pair.assert_string()?,
            10 | 20 | 30 => self.location.set(pair)?,
            11 | 21 | 31 => self.second_alignment_point.set(pair)?,
            40 => self.text_height = pair.assert_f64()?,
            41 => self.relative_x_scale_factor = pair.assert_f64()?,
            50 => self.rotation = pair.assert_f64()?,
            // unrecognized justifications stay generic records so they survive a round trip
            72 => match HorizontalTextJustification::from_i16(pair.assert_i16()?) {
                Some(j) => self.horizontal_text_justification = j,
                None => return Ok(false),
            },
            73 => match VerticalTextJustification::from_i16(pair.assert_i16()?) {
                Some(j) => self.vertical_text_justification = j,
                None => return Ok(false),
            },
            _ => return self.extrusion.apply(pair),
        }
        Ok(true)
    }
    pub(crate) fn get(&self, code: i32) -> Option<CodePairValue> {
        match code {
            1 => Some(CodePairValue::Str(self.value.clone())),
            10 | 20 | 30 => self.location.get(code).map(CodePairValue::Double),
            11 | 21 | 31 => self
                .second_alignment_point
                .get(code)
                .map(CodePairValue::Double),
            40 => Some(CodePairValue::Double(self.text_height)),
            41 => Some(CodePairValue::Double(self.relative_x_scale_factor)),
            50 => Some(CodePairValue::Double(self.rotation)),
            72 => Some(CodePairValue::Short(
                self.horizontal_text_justification as i16,
            )),
            73 => Some(CodePairValue::Short(self.vertical_text_justification as i16)),
            _ => self.extrusion.get(code),
        }
    }
    pub(crate) fn add_code_pairs(&self, pairs: &mut Vec<CodePair>) {
        self.extrusion.add_thickness(pairs);
        self.location.add_code_pairs(pairs, 10);
        pairs.push(CodePair::new_f64(40, self.text_height));
        pairs.push(CodePair::new_str(1, &self.value));
        if self.rotation != 0.0 {
            pairs.push(CodePair::new_f64(50, self.rotation));
        }
        if self.relative_x_scale_factor != 1.0 {
            pairs.push(CodePair::new_f64(41, self.relative_x_scale_factor));
        }
        if self.horizontal_text_justification != HorizontalTextJustification::Left {
            pairs.push(CodePair::new_i16(
                72,
                self.horizontal_text_justification as i16,
            ));
        }
        if self.is_justified() {
            self.second_alignment_point.add_code_pairs(pairs, 11);
        }
        self.extrusion.add_direction(pairs);
        if self.vertical_text_justification != VerticalTextJustification::Baseline {
            pairs.push(CodePair::new_i16(73, self.vertical_text_justification as i16));
        }
    }
}
