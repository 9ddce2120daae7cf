// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

extern crate dxf_model;

use self::dxf_model::entities::*;
use self::dxf_model::*;

mod test_helpers;
use crate::test_helpers::helpers::*;

fn model_with(blocks: Vec<&str>, entities: Vec<&str>) -> Model {
    let mut lines = vec!["0", "SECTION", "2", "BLOCKS"];
    lines.extend(blocks);
    lines.extend(vec!["0", "ENDSEC", "0", "SECTION", "2", "ENTITIES"]);
    lines.extend(entities);
    lines.extend(vec!["0", "ENDSEC", "0", "EOF"]);
    parse_model(&lines.join("\r\n"))
}

fn origins(visits: &[(String, TransformationMatrix)]) -> Vec<Point> {
    visits
        .iter()
        .map(|(_, m)| m.transform_point(Point::origin()))
        .collect()
}

/// OUTER holds an insert of INNER, which is defined after it.
fn nested_blocks() -> Vec<&'static str> {
    vec![
        "0", "BLOCK", "2", "OUTER", "8", "0", "0", "INSERT", "8", "0", "2", "INNER", "10", "1.0",
        "0", "ENDBLK", "8", "0", "0", "BLOCK", "2", "INNER", "8", "0", "0", "POINT", "8", "0",
        "0", "ENDBLK", "8", "0",
    ]
}

#[test]
fn forward_references_are_resolved_after_reading() {
    let model = model_with(nested_blocks(), vec![]);
    let outer = model.find_block("OUTER").unwrap();
    match outer.entities[0].specific {
        EntityType::Insert(ref ins) => assert_eq!(Some(BlockId(1)), ins.block()),
        _ => panic!("expected an insert"),
    }
    assert_eq!(Some(BlockId(1)), model.find_reference("INNER"));
}

#[test]
fn inserts_are_visited_without_exploding() {
    let model = model_with(
        nested_blocks(),
        vec!["0", "INSERT", "8", "0", "2", "OUTER", "10", "10.0"],
    );
    let visits = visited(&model, false, TraversalFlags::NONE);
    assert_eq!(1, visits.len());
    assert_eq!("INSERT", visits[0].0);
    assert_eq!(TransformationMatrix::identity(), visits[0].1);
}

#[test]
fn exploded_grid_visits_every_cell() {
    let model = model_with(
        nested_blocks(),
        vec![
            "0", "INSERT", "8", "0", "2", "OUTER", "10", "10.0", "70", "3", "71", "2", "44",
            "100.0", "45", "1000.0",
        ],
    );
    let visits = visited(&model, false, TraversalFlags::EXPLODE_INSERTS);
    assert_eq!(6, visits.len());
    assert!(visits.iter().all(|(t, _)| t == "POINT"));
    assert_eq!(
        vec![
            Point::new(11.0, 0.0, 0.0),
            Point::new(111.0, 0.0, 0.0),
            Point::new(211.0, 0.0, 0.0),
            Point::new(11.0, 1000.0, 0.0),
            Point::new(111.0, 1000.0, 0.0),
            Point::new(211.0, 1000.0, 0.0),
        ],
        origins(&visits)
    );
}

#[test]
fn insert_scale_rotation_and_base_point() {
    let model = model_with(
        vec![
            "0", "BLOCK", "2", "B", "8", "0", "10", "1.0", "20", "0.0", "30", "0.0", "0", "POINT",
            "8", "0", "10", "2.0", "0", "ENDBLK", "8", "0",
        ],
        vec![
            "0", "INSERT", "8", "0", "2", "B", "10", "5.0", "20", "5.0", "41", "2.0", "42", "2.0",
            "43", "2.0", "50", "90.0",
        ],
    );
    let mut points = vec![];
    model.traverse_entities(false, TraversalFlags::EXPLODE_INSERTS, |state, entity| {
        if let EntityType::ModelPoint(ref p) = entity.specific {
            points.push(state.matrix().transform_point(p.location));
        }
        Visit::Continue
    });
    assert_eq!(1, points.len());
    // (2,0) is 1 from the base point, scaled to 2, rotated onto +Y, then moved to (5,5)
    assert!((points[0].x - 5.0).abs() < 1e-9);
    assert!((points[0].y - 7.0).abs() < 1e-9);
}

#[test]
fn current_insert_is_the_innermost_insert() {
    let model = model_with(
        nested_blocks(),
        vec!["0", "INSERT", "8", "0", "2", "OUTER", "62", "4"],
    );
    let mut colors = vec![];
    model.traverse_entities(false, TraversalFlags::EXPLODE_INSERTS, |state, _| {
        colors.push(state.current_insert().map(|i| i.color_number()));
        Visit::Continue
    });
    // INNER is inserted with the default BYLAYER color
    assert_eq!(vec![Some(256)], colors);
}

#[test]
fn callback_can_stop_traversal() {
    let model = model_with(
        nested_blocks(),
        vec!["0", "INSERT", "8", "0", "2", "OUTER", "70", "5", "0", "LINE", "8", "0"],
    );
    let mut count = 0;
    let result = model.traverse_entities(false, TraversalFlags::EXPLODE_INSERTS, |_, _| {
        count += 1;
        if count == 2 {
            Visit::Stop
        } else {
            Visit::Continue
        }
    });
    assert_eq!(Visit::Stop, result);
    assert_eq!(2, count);
}

#[test]
fn self_inserting_block_is_not_exploded_forever() {
    let model = model_with(
        vec![
            "0", "BLOCK", "2", "LOOP", "8", "0", "0", "POINT", "8", "0", "0", "INSERT", "8", "0",
            "2", "LOOP", "0", "ENDBLK", "8", "0",
        ],
        vec!["0", "INSERT", "8", "0", "2", "LOOP"],
    );
    let visits = visited(&model, false, TraversalFlags::EXPLODE_INSERTS);
    let types: Vec<&str> = visits.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(vec!["POINT"], types);
}

#[test]
fn unresolved_inserts_are_visited_as_inserts() {
    let model = model_with(vec![], vec!["0", "INSERT", "8", "0", "2", "MISSING"]);
    let visits = visited(&model, false, TraversalFlags::EXPLODE_INSERTS);
    assert_eq!(1, visits.len());
    assert_eq!("INSERT", visits[0].0);
}

#[test]
fn blocks_section_is_visited_untransformed() {
    let model = model_with(
        nested_blocks(),
        vec!["0", "INSERT", "8", "0", "2", "INNER", "10", "3.0"],
    );
    let visits = visited(&model, true, TraversalFlags::NONE);
    let types: Vec<&str> = visits.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(vec!["INSERT", "POINT", "INSERT"], types);
    assert!(visits
        .iter()
        .all(|(_, m)| *m == TransformationMatrix::identity()));
}

#[test]
fn deleted_entities_are_skipped() {
    let mut model = model_with(nested_blocks(), vec!["0", "LINE", "8", "0", "0", "CIRCLE", "8", "0"]);
    model.entities_mut().unwrap()[0].set_deleted(true);
    let visits = visited(&model, false, TraversalFlags::NONE);
    assert_eq!(1, visits.len());
    assert_eq!("CIRCLE", visits[0].0);
}

#[test]
fn blocks_added_in_code_resolve_inserts() {
    let mut model = Model::new();
    let ins = Insert::new(model.registry_mut(), "LATER", Point::new(2.0, 0.0, 0.0));
    assert_eq!(None, ins.block());
    model.add_entity(Entity::new(EntityType::Insert(ins)));

    let mut block = Block::new(model.registry_mut(), "LATER");
    block
        .entities
        .push(Entity::new(EntityType::ModelPoint(ModelPoint::new(Point::origin()))));
    let id = model.add_block(block);

    match model.entities().unwrap()[0].specific {
        EntityType::Insert(ref ins) => assert_eq!(Some(id), ins.block()),
        _ => panic!("expected an insert"),
    }
    let visits = visited(&model, false, TraversalFlags::EXPLODE_INSERTS);
    assert_eq!(vec![Point::new(2.0, 0.0, 0.0)], origins(&visits));
}

#[test]
fn copied_model_traverses_the_same() {
    let model = model_with(
        nested_blocks(),
        vec!["0", "INSERT", "8", "0", "2", "OUTER", "10", "10.0", "70", "2", "44", "5.0"],
    );
    let copy = model.copy();
    assert_eq!(
        origins(&visited(&model, false, TraversalFlags::EXPLODE_INSERTS)),
        origins(&visited(&copy, false, TraversalFlags::EXPLODE_INSERTS))
    );
    assert_eq!(Some(BlockId(1)), copy.find_reference("INNER"));
}

#[test]
fn deleted_inserts_are_still_exploded() {
    let mut model = model_with(
        nested_blocks(),
        vec!["0", "INSERT", "8", "0", "2", "INNER", "70", "2", "71", "3"],
    );
    model.entities_mut().unwrap()[0].set_deleted(true);
    let visits = visited(&model, false, TraversalFlags::EXPLODE_INSERTS);
    assert_eq!(6, visits.len());
    assert!(visits.iter().all(|(t, _)| t == "POINT"));
    // the INSERT itself is not visited
    assert!(visited(&model, false, TraversalFlags::NONE).is_empty());
}

fn two_blocks() -> Model {
    model_with(
        vec![
            "0", "BLOCK", "2", "A", "8", "0", "0", "LINE", "8", "0", "0", "ENDBLK", "8", "0", "0",
            "BLOCK", "2", "B", "8", "0", "0", "POINT", "8", "0", "0", "ENDBLK", "8", "0",
        ],
        vec!["0", "INSERT", "8", "0", "2", "A", "0", "INSERT", "8", "0", "2", "B"],
    )
}

fn exploded_types(model: &Model) -> Vec<String> {
    visited(model, false, TraversalFlags::EXPLODE_INSERTS)
        .into_iter()
        .map(|(t, _)| t)
        .collect()
}

#[test]
fn removed_blocks_are_no_longer_resolved() {
    let mut model = two_blocks();
    if let Some(Section::Blocks(blocks)) = model.find_section_mut("BLOCKS") {
        blocks.blocks.remove(0);
    }
    model.fix_references();
    assert!(model.find_block("A").is_none());
    assert_eq!(Some(BlockId(0)), model.find_reference("B"));
    match model.entities().unwrap()[0].specific {
        EntityType::Insert(ref ins) => assert_eq!(None, ins.block()),
        _ => panic!("expected an insert"),
    }
    assert_eq!(vec!["INSERT", "POINT"], exploded_types(&model));
}

#[test]
fn reordered_blocks_are_resolved_by_name() {
    let mut model = two_blocks();
    if let Some(Section::Blocks(blocks)) = model.find_section_mut("BLOCKS") {
        blocks.blocks.swap(0, 1);
    }
    // stale ids never place the wrong block
    assert_eq!(vec!["INSERT", "INSERT"], exploded_types(&model));

    model.fix_references();
    assert_eq!(Some(BlockId(1)), model.find_reference("A"));
    assert_eq!(Some(BlockId(0)), model.find_reference("B"));
    assert_eq!(vec!["LINE", "POINT"], exploded_types(&model));
}
