// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::Dictionary;

/// The name of the layer every model starts with.
pub const DEFAULT_LAYER_NAME: &str = "0";

/// The color number given to the default layer.
pub const DEFAULT_LAYER_COLOR: i16 = 7;

/// Identifies a layer by its creation index; the default layer is always `LayerId(0)`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LayerId(pub usize);

/// A named drawing layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Layer {
    name: String,
    layer_num: usize,
    pub color_number: i16,
    pub flags: i16,
}

impl Layer {
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The sequential number assigned when the layer was created.
    pub fn layer_num(&self) -> usize {
        self.layer_num
    }
    pub fn is_default(&self) -> bool {
        self.layer_num == 0
    }
}

/// Owns every layer of a model.  Layers are reachable by name and by index, and both views
/// resolve to the same `LayerId`.
#[derive(Clone, Debug)]
pub struct LayerTable {
    names: Dictionary<LayerId>,
    layers: Vec<Layer>,
}

impl Default for LayerTable {
    fn default() -> Self {
        let mut table = LayerTable {
            names: Dictionary::new(),
            layers: vec![],
        };
        table.add_layer(DEFAULT_LAYER_NAME, DEFAULT_LAYER_COLOR, 0);
        table
    }
}

impl LayerTable {
    pub fn new() -> Self {
        Default::default()
    }
    /// Returns the layer named `name`, creating it with the next sequential number if it does
    /// not exist.  An existing layer keeps its color and flags.
    pub fn add_layer(&mut self, name: &str, color_number: i16, flags: i16) -> LayerId {
        if let Some(id) = self.names.find_reference(name) {
            return id;
        }

        let id = LayerId(self.layers.len());
        self.layers.push(Layer {
            name: String::from(name),
            layer_num: id.0,
            color_number,
            flags,
        });
        self.names.add_reference(name, Some(id));
        id
    }
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.0)
    }
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id.0)
    }
    pub fn find(&self, name: &str) -> Option<LayerId> {
        self.names.find_reference(name)
    }
    /// The layer for `id`, or the default layer if `id` is out of range.
    pub fn layer_or_default(&self, id: LayerId) -> &Layer {
        match self.layers.get(id.0) {
            Some(layer) => layer,
            None => &self.layers[0],
        }
    }
    /// The number of layers, including the default layer.
    pub fn len(&self) -> usize {
        self.layers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }
}
