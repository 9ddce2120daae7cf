// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

extern crate dxf_model;

#[cfg(test)]
#[allow(dead_code)]
pub mod helpers {
    use dxf_model::*;

    pub fn parse_model(s: &str) -> Model {
        Model::parse(s).unwrap()
    }

    pub fn from_section(section: &str, body: Vec<&str>) -> Model {
        let mut lines = vec!["0", "SECTION", "2", section];
        for line in body {
            lines.push(line);
        }
        lines.push("0");
        lines.push("ENDSEC");
        lines.push("0");
        lines.push("EOF");
        parse_model(&lines.join("\r\n"))
    }

    pub fn to_test_string(model: &mut Model) -> String {
        let contents = model.to_dxf_string().unwrap();
        println!("{}", contents); // will only be displayed on the console if the test fails
        contents
    }

    pub fn assert_contains(model: &mut Model, contents: String) {
        let actual = to_test_string(model);
        assert!(actual.contains(&contents));
    }

    pub fn assert_not_contains(model: &mut Model, contents: String) {
        let actual = to_test_string(model);
        assert!(!actual.contains(&contents));
    }

    /// The `(type, matrix)` of every entity visited.
    pub fn visited(
        model: &Model,
        traverse_blocks_section: bool,
        flags: TraversalFlags,
    ) -> Vec<(String, TransformationMatrix)> {
        let mut result = vec![];
        model.traverse_entities(traverse_blocks_section, flags, |state, entity| {
            result.push((String::from(entity.type_string()), *state.matrix()));
            Visit::Continue
        });
        result
    }
}
