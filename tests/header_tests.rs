// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

extern crate dxf_model;

use self::dxf_model::enums::*;
use self::dxf_model::*;

mod test_helpers;
use crate::test_helpers::helpers::*;

fn header() -> Model {
    from_section(
        "HEADER",
        vec![
            "9", "$ACADVER", "1", "AC1009", "9", "$INSBASE", "10", "1.0", "20", "2.0", "30", "3.0",
            "9", "$FILLMODE", "70", "1",
        ],
    )
}

#[test]
fn read_header_variables() {
    let model = header();
    assert_eq!(Some(AcadVersion::R12), model.dxf_version());
    assert_eq!(
        Some(vec![
            CodePair::new_f64(10, 1.0),
            CodePair::new_f64(20, 2.0),
            CodePair::new_f64(30, 3.0),
        ]),
        model.get_variable("$INSBASE")
    );
    assert_eq!(
        Some(CodePairValue::Short(1)),
        model.header().unwrap().get_value("$FILLMODE")
    );
    assert_eq!(None, model.get_variable("$MISSING"));
}

#[test]
fn set_existing_variable_keeps_position() {
    let mut model = header();
    assert_eq!(1, model.set_variable("$FILLMODE", &[CodePair::new_i16(70, 0)]));
    assert_eq!(
        1,
        model.set_variable("$INSBASE", &[CodePair::new_f64(20, 9.0), CodePair::new_f64(40, 1.0)])
    );
    assert_contains(
        &mut model,
        vec![
            "  9", "$INSBASE", " 10", "1.0", " 20", "9.0", " 30", "3.0", "  9", "$FILLMODE", " 70",
            "     0",
        ]
        .join("\r\n"),
    );
}

#[test]
fn set_variable_creates_the_header() {
    let mut model = from_section("ENTITIES", vec![]);
    assert!(model.header().is_none());
    assert_eq!(1, model.set_variable("$ACADVER", &[CodePair::new_str(1, "AC1009")]));
    assert_eq!("HEADER", model.sections()[0].name());
    assert_eq!(Some(AcadVersion::R12), model.dxf_version());
}

#[test]
fn header_must_start_with_a_variable() {
    let text = vec!["0", "SECTION", "2", "HEADER", "70", "1", "0", "ENDSEC", "0", "EOF"].join("\r\n");
    assert!(Model::parse(&text).is_err());
}

#[test]
fn unknown_versions_are_not_reported() {
    let model = from_section("HEADER", vec!["9", "$ACADVER", "1", "AC0000"]);
    assert_eq!(None, model.dxf_version());
    assert_eq!(
        Some(CodePairValue::Str(String::from("AC0000"))),
        model.header().unwrap().get_value("$ACADVER")
    );
}
