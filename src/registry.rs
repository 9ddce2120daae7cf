// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::rc::Rc;

use crate::{BlockId, Dictionary, Handle, Layer, LayerId, LayerTable};

/// The model-wide tables that objects register with while they are read: named references
/// (blocks and anything else that needs a shared name), layers, and the largest handle seen.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    references: Dictionary<BlockId>,
    layers: LayerTable,
    largest_handle: u64,
}

// public implementation
impl Registry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Interns `name`; `id` may be `None` for a reference whose target has not been read yet.
    pub fn add_reference(&mut self, name: &str, id: Option<BlockId>) -> Rc<str> {
        self.references.add_reference(name, id)
    }
    pub fn find_reference(&self, name: &str) -> Option<BlockId> {
        self.references.find_reference(name)
    }
    pub fn find_ref_string(&self, name: &str) -> Option<Rc<str>> {
        self.references.find_ref_string(name)
    }
    pub fn remove_reference(&mut self, name: &str) -> bool {
        self.references.remove_reference(name)
    }
    /// Registers a block under `name` in the shared reference namespace.
    pub fn add_block(&mut self, name: &str, id: BlockId) -> Rc<str> {
        self.references.add_reference(name, Some(id))
    }
    pub fn find_block(&self, name: &str) -> Option<BlockId> {
        self.references.find_reference(name)
    }

    pub fn add_layer(&mut self, name: &str, color_number: i16, flags: i16) -> LayerId {
        self.layers.add_layer(name, color_number, flags)
    }
    pub fn get_layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }
    pub fn find_layer(&self, name: &str) -> Option<LayerId> {
        self.layers.find(name)
    }
    /// The name written for an entity on layer `id`.
    pub fn layer_name(&self, id: LayerId) -> &str {
        self.layers.layer_or_default(id).name()
    }
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }
    pub fn layers(&self) -> &LayerTable {
        &self.layers
    }
    pub fn layers_mut(&mut self) -> &mut LayerTable {
        &mut self.layers
    }

    /// Records `handle` so generated handles never collide with it.
    pub fn register_handle(&mut self, handle: Handle) {
        if handle.0 > self.largest_handle {
            self.largest_handle = handle.0;
        }
    }
    pub fn largest_handle(&self) -> u64 {
        self.largest_handle
    }
    /// Returns a handle larger than every handle registered or generated so far.
    pub fn get_unique_handle(&mut self) -> Handle {
        self.largest_handle += 1;
        Handle(self.largest_handle)
    }
}

// internal visibility only
impl Registry {
    /// Gives back the most recently generated handle.
    pub(crate) fn release_last_handle(&mut self) {
        if self.largest_handle > 0 {
            self.largest_handle -= 1;
        }
    }
    pub(crate) fn clear_block_ids(&mut self) {
        self.references.clear_ids();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_handles_exceed_registered_ones() {
        let mut registry = Registry::new();
        registry.register_handle(Handle(0x20));
        registry.register_handle(Handle(0x1F));
        assert_eq!(0x20, registry.largest_handle());
        assert_eq!(Handle(0x21), registry.get_unique_handle());
        assert_eq!(Handle(0x22), registry.get_unique_handle());
        registry.release_last_handle();
        assert_eq!(Handle(0x22), registry.get_unique_handle());
    }

    #[test]
    fn blocks_share_the_reference_namespace() {
        let mut registry = Registry::new();
        let pending = registry.add_reference("BOLT", None);
        assert_eq!(None, registry.find_block("BOLT"));
        let defined = registry.add_block("BOLT", BlockId(0));
        assert!(Rc::ptr_eq(&pending, &defined));
        assert_eq!(Some(BlockId(0)), registry.find_reference("BOLT"));
    }
}
