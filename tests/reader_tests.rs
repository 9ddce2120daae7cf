// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

extern crate dxf_model;

use self::dxf_model::enums::*;
use self::dxf_model::*;

mod test_helpers;
use crate::test_helpers::helpers::*;

#[test]
fn totally_empty_file() {
    let model = parse_model("");
    assert!(model.sections().is_empty());
}

#[test]
fn empty_file_trailing_newline() {
    let model = parse_model("0\nEOF\n");
    assert!(model.sections().is_empty());
}

#[test]
fn empty_file_no_trailing_newline() {
    let model = parse_model("0\nEOF");
    assert!(model.sections().is_empty());
}

#[test]
fn unsupported_section_is_kept() {
    let model = from_section(
        "UNSUPPORTED_SECTION",
        vec!["1", "garbage value 1", "2", "garbage value 2"],
    );
    assert_eq!(1, model.sections().len());
    assert_eq!("UNSUPPORTED_SECTION", model.sections()[0].name());
}

#[test]
fn read_lf_and_crlf() {
    let code_pairs = vec![
        "0", "SECTION", "2", "HEADER", "9", "$ACADVER", "1", "AC1009", "0", "ENDSEC", "0", "EOF",
    ];

    let lf_model = parse_model(&code_pairs.join("\n"));
    assert_eq!(Some(AcadVersion::R12), lf_model.dxf_version());

    let crlf_model = parse_model(&code_pairs.join("\r\n"));
    assert_eq!(Some(AcadVersion::R12), crlf_model.dxf_version());
}

#[test]
fn read_leading_comments() {
    let model = parse_model(
        &vec![
            "999", "first", "999", "second", "0", "SECTION", "2", "ENTITIES", "0", "ENDSEC", "0",
            "EOF",
        ]
        .join("\r\n"),
    );
    assert_eq!(vec!["first", "second"], model.comments());
    assert_eq!(1, model.sections().len());
}

#[test]
fn sections_keep_their_file_order() {
    let model = parse_model(
        &vec![
            "0", "SECTION", "2", "ENTITIES", "0", "ENDSEC", "0", "SECTION", "2", "HEADER", "0",
            "ENDSEC", "0", "EOF",
        ]
        .join("\r\n"),
    );
    let names: Vec<&str> = model.sections().iter().map(|s| s.name()).collect();
    assert_eq!(vec!["ENTITIES", "HEADER"], names);
}

#[test]
fn read_entities_with_layers() {
    let model = from_section(
        "ENTITIES",
        vec![
            "0", "LINE", "8", "WALLS", "10", "1.0", "20", "2.0", "30", "3.0", "11", "4.0", "21",
            "5.0", "31", "6.0", "0", "CIRCLE", "8", "0", "10", "1.0", "40", "2.5",
        ],
    );
    let entities = model.entities().unwrap();
    assert_eq!(2, entities.len());
    match entities[0].specific {
        EntityType::Line(ref line) => {
            assert_eq!(Point::new(1.0, 2.0, 3.0), line.p1);
            assert_eq!(Point::new(4.0, 5.0, 6.0), line.p2);
        }
        _ => panic!("expected a line"),
    }
    assert_eq!("WALLS", model.registry().layer_name(entities[0].layer()));
    assert_eq!(Some(entities[0].layer()), model.find_layer("WALLS"));
    match entities[1].specific {
        EntityType::Circle(ref circle) => assert_eq!(2.5, circle.radius),
        _ => panic!("expected a circle"),
    }
    assert_eq!(LayerId(0), entities[1].layer());
}

#[test]
fn unknown_entities_are_kept_with_their_records() {
    let mut model = from_section("ENTITIES", vec!["0", "ACAD_PROXY_ENTITY", "8", "0", "90", "498"]);
    let entities = model.entities().unwrap();
    assert_eq!("ACAD_PROXY_ENTITY", entities[0].type_string());
    assert_eq!(
        Some(CodePairValue::Integer(498)),
        entities[0].get_record(90, 0)
    );
    assert_contains(
        &mut model,
        vec!["  0", "ACAD_PROXY_ENTITY", "  8", "0", " 90", "      498"].join("\r\n"),
    );
}

#[test]
fn handles_are_registered_while_reading() {
    let model = from_section(
        "ENTITIES",
        vec!["0", "LINE", "5", "1F", "8", "0", "0", "LINE", "5", "A", "8", "0"],
    );
    assert_eq!(0x1F, model.largest_handle());
    assert_eq!(Some(Handle(0x1F)), model.entities().unwrap()[0].handle());
}

#[test]
fn read_polyline_with_vertices() {
    let model = from_section(
        "ENTITIES",
        vec![
            "0", "POLYLINE", "8", "0", "66", "1", "70", "1", "0", "VERTEX", "8", "0", "10", "1.0",
            "0", "VERTEX", "8", "0", "10", "2.0", "0", "SEQEND", "8", "0", "0", "LINE", "8", "0",
        ],
    );
    let entities = model.entities().unwrap();
    assert_eq!(2, entities.len());
    match entities[0].specific {
        EntityType::Polyline(ref poly) => {
            assert!(poly.is_closed());
            assert_eq!(2, poly.vertices.len());
            assert!(poly.seqend.is_some());
        }
        _ => panic!("expected a polyline"),
    }
    assert_eq!("LINE", entities[1].type_string());
}

#[test]
fn read_insert_with_attributes() {
    let model = from_section(
        "ENTITIES",
        vec![
            "0", "INSERT", "8", "0", "66", "1", "2", "TAG", "10", "0.0", "0", "ATTRIB", "8", "0",
            "0", "ATTRIB", "8", "0", "0", "SEQEND", "8", "0",
        ],
    );
    let entities = model.entities().unwrap();
    assert_eq!(1, entities.len());
    match entities[0].specific {
        EntityType::Insert(ref ins) => {
            assert_eq!("TAG", ins.block_name());
            assert_eq!(2, ins.attributes.len());
            assert!(ins.seqend.is_some());
            // the block was never defined
            assert_eq!(None, ins.block());
        }
        _ => panic!("expected an insert"),
    }
}

#[test]
fn malformed_numbers_are_errors() {
    let text = vec!["0", "SECTION", "2", "ENTITIES", "0", "LINE", "10", "one", "0", "ENDSEC", "0", "EOF"]
        .join("\r\n");
    match Model::parse(&text) {
        Err(DxfError::ParseFloatError(_, line)) => assert_eq!(8, line),
        other => panic!("expected a float parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn missing_value_line_is_an_error() {
    assert!(Model::parse("0\nSECTION\n2").is_err());
}

#[test]
fn missing_endsec_is_an_error() {
    let text = vec!["0", "SECTION", "2", "ENTITIES", "0", "LINE", "0", "EOF"].join("\r\n");
    assert!(Model::parse(&text).is_err());
}

#[test]
fn read_binary_file() {
    let mut model = from_section("ENTITIES", vec!["0", "LINE", "8", "0", "10", "1.5"]);
    let mut buf = vec![];
    model.save_binary(&mut buf).unwrap();
    assert!(buf.starts_with(b"AutoCAD Binary DXF\r\n\x1A\x00"));

    let reread = Model::load(&mut buf.as_slice()).unwrap();
    match reread.entities().unwrap()[0].specific {
        EntityType::Line(ref line) => assert_eq!(Point::new(1.5, 0.0, 0.0), line.p1),
        _ => panic!("expected a line"),
    }
}

#[test]
fn progress_is_reported_and_can_abort() {
    let text = vec![
        "0", "SECTION", "2", "ENTITIES", "0", "LINE", "8", "0", "0", "LINE", "8", "0", "0",
        "ENDSEC", "0", "EOF",
    ]
    .join("\r\n");

    let mut reported = vec![];
    let model = Model::load_with_progress(&mut text.as_bytes(), encoding_rs::UTF_8, |p| {
        reported.push(p);
        true
    })
    .unwrap();
    assert_eq!(2, model.entities().unwrap().len());
    assert!(!reported.is_empty());
    assert!(reported.iter().all(|p| *p >= 0.0 && *p <= 1.0));

    let result = Model::load_with_progress(&mut text.as_bytes(), encoding_rs::UTF_8, |_| false);
    match result {
        Err(e) => assert!(e.is_aborted()),
        Ok(_) => panic!("expected the load to be aborted"),
    }
}

#[test]
fn abort_on_the_final_progress_report_fails_the_load() {
    let text = vec![
        "0", "SECTION", "2", "ENTITIES", "0", "LINE", "8", "0", "0", "ENDSEC", "0", "EOF",
    ]
    .join("\r\n");
    let mut last = 0.0;
    let result = Model::load_with_progress(&mut text.as_bytes(), encoding_rs::UTF_8, |p| {
        last = p;
        p < 1.0
    });
    match result {
        Err(e) => assert!(e.is_aborted()),
        Ok(_) => panic!("expected the load to be aborted"),
    }
    assert_eq!(1.0, last);
}
