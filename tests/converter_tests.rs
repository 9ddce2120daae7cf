// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

extern crate dxf_model;

use self::dxf_model::*;

mod test_helpers;
use crate::test_helpers::helpers::*;

fn convert(model: &Model) -> Converter {
    let mut converter = Converter::new(ConverterSettings {
        num_sub: 4,
        ..Default::default()
    });
    assert_eq!(Visit::Continue, converter.convert(model));
    converter
}

fn near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9 && (a.z - b.z).abs() < 1e-9
}

#[test]
fn block_geometry_is_placed_for_every_insert() {
    let model = parse_model(
        &vec![
            "0", "SECTION", "2", "BLOCKS", "0", "BLOCK", "2", "TICK", "8", "0", "0", "LINE", "8",
            "0", "62", "2", "11", "1.0", "0", "ENDBLK", "8", "0", "0", "ENDSEC", "0", "SECTION",
            "2", "ENTITIES", "0", "INSERT", "8", "0", "2", "TICK", "10", "5.0", "0", "INSERT", "8",
            "0", "2", "TICK", "10", "5.0", "20", "5.0", "0", "ENDSEC", "0", "EOF",
        ]
        .join("\r\n"),
    );
    let converter = convert(&model);
    let lines = converter.layer_data(2).unwrap().lines();
    assert_eq!(
        vec![
            (Point::new(5.0, 0.0, 0.0), Point::new(6.0, 0.0, 0.0)),
            (Point::new(5.0, 5.0, 0.0), Point::new(6.0, 5.0, 0.0)),
        ],
        lines
    );
}

#[test]
fn points_and_polylines() {
    let model = from_section(
        "ENTITIES",
        vec![
            "0", "POINT", "8", "0", "10", "1.0", "20", "1.0", "0", "LWPOLYLINE", "8", "0", "62",
            "3", "70", "1", "10", "0.0", "20", "0.0", "10", "2.0", "20", "0.0", "10", "2.0", "20",
            "2.0",
        ],
    );
    let converter = convert(&model);
    assert_eq!(&[Point::new(1.0, 1.0, 0.0)], converter.layer_data(7).unwrap().points());
    // the closed polyline is three segments around a triangle
    let data = converter.layer_data(3).unwrap();
    assert_eq!(3, data.lines().len());
    assert_eq!(3, data.line_vertices().len());
}

#[test]
fn extruded_circles_use_their_object_coordinates() {
    let model = from_section(
        "ENTITIES",
        vec![
            "0", "CIRCLE", "8", "0", "10", "0.0", "20", "0.0", "30", "2.0", "40", "1.0", "210",
            "1.0", "220", "0.0", "230", "0.0",
        ],
    );
    let converter = convert(&model);
    let lines = converter.layer_data(7).unwrap().lines();
    assert_eq!(4, lines.len());
    // the circle lies in the plane x = 2, facing +X
    for (a, b) in lines {
        assert!((a.x - 2.0).abs() < 1e-9 && (b.x - 2.0).abs() < 1e-9);
        let ra = (a.y * a.y + a.z * a.z).sqrt();
        assert!((ra - 1.0).abs() < 1e-9);
    }
}

#[test]
fn thick_circle_becomes_a_closed_cylinder() {
    let model = from_section(
        "ENTITIES",
        vec!["0", "CIRCLE", "8", "0", "39", "3.0", "40", "1.0"],
    );
    let converter = convert(&model);
    let data = converter.layer_data(7).unwrap();
    let faces = data.faces();
    // four walls, and a cap at each end
    assert_eq!(6, faces.len());
    assert!(faces
        .iter()
        .flat_map(|f| f.iter())
        .all(|p| p.z.abs() < 1e-9 || (p.z - 3.0).abs() < 1e-9));
}

#[test]
fn arcs_honor_num_sub() {
    let model = from_section(
        "ENTITIES",
        vec!["0", "ARC", "8", "0", "40", "1.0", "50", "0.0", "51", "180.0"],
    );
    let mut converter = Converter::new(ConverterSettings {
        num_sub: 8,
        ..Default::default()
    });
    converter.convert(&model);
    let lines = converter.layer_data(7).unwrap().lines();
    assert_eq!(4, lines.len());
    assert!(near(Point::new(1.0, 0.0, 0.0), lines[0].0));
    assert!(near(Point::new(-1.0, 0.0, 0.0), lines[3].1));
}

#[test]
fn polyface_meshes_become_faces() {
    let model = from_section(
        "ENTITIES",
        vec![
            "0", "POLYLINE", "8", "0", "66", "1", "70", "64", "0", "VERTEX", "8", "0", "70", "192",
            "10", "0.0", "0", "VERTEX", "8", "0", "70", "192", "10", "1.0", "0", "VERTEX", "8", "0",
            "70", "192", "20", "1.0", "0", "VERTEX", "8", "0", "70", "128", "71", "1", "72", "2",
            "73", "3", "0", "SEQEND", "8", "0",
        ],
    );
    let converter = convert(&model);
    let faces = converter.layer_data(7).unwrap().faces();
    assert_eq!(
        vec![vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ]],
        faces
    );
}

#[test]
fn colors_without_geometry_have_no_layer_data() {
    let model = from_section("ENTITIES", vec!["0", "TEXT", "8", "0", "62", "4", "1", "label"]);
    let converter = convert(&model);
    assert!(converter.layer_data(4).is_none());
    assert_eq!(0, converter.layers().count());
    assert!(converter.layer_data(0).is_none());
}
