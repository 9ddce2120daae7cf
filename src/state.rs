// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::ops::BitOr;

use once_cell::unsync::OnceCell;

use crate::entities::Insert;
use crate::{Block, BlockId, Entity, EntityType, Point, TransformationMatrix};

/// Options controlling how `Model::traverse_entities` walks the entity graph.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TraversalFlags(u32);

impl TraversalFlags {
    pub const NONE: TraversalFlags = TraversalFlags(0);
    /// Visit the transformed contents of each INSERT's block instead of the INSERT itself.
    pub const EXPLODE_INSERTS: TraversalFlags = TraversalFlags(0x1);
    /// Also visit each VERTEX of a POLYLINE.
    pub const TRAVERSE_POLYLINE_VERTICES: TraversalFlags = TraversalFlags(0x2);

    pub fn contains(self, other: TraversalFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TraversalFlags {
    type Output = TraversalFlags;
    fn bitor(self, rhs: TraversalFlags) -> TraversalFlags {
        TraversalFlags(self.0 | rhs.0)
    }
}

/// Returned by traversal callbacks; `Stop` ends the whole traversal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Visit {
    Continue,
    Stop,
}

/// The traversal context handed to the callback with each visited entity.
#[derive(Clone, Debug)]
pub struct State<'a> {
    matrix: TransformationMatrix,
    inverse: OnceCell<Option<TransformationMatrix>>,
    current_insert: Option<&'a Entity>,
    flags: TraversalFlags,
}

impl<'a> State<'a> {
    pub fn new(flags: TraversalFlags) -> Self {
        State {
            matrix: TransformationMatrix::identity(),
            inverse: OnceCell::new(),
            current_insert: None,
            flags,
        }
    }
    /// The transform from the visited entity's coordinates to world coordinates.
    pub fn matrix(&self) -> &TransformationMatrix {
        &self.matrix
    }
    pub fn set_matrix(&mut self, matrix: TransformationMatrix) {
        self.matrix = matrix;
        self.inverse = OnceCell::new();
    }
    /// The inverse of `matrix`, computed on first use.  `None` if the matrix is singular.
    pub fn inverse_matrix(&self) -> Option<&TransformationMatrix> {
        self.inverse.get_or_init(|| self.matrix.inverse()).as_ref()
    }
    /// The innermost INSERT being exploded, or `None` at the top level.
    pub fn current_insert(&self) -> Option<&'a Entity> {
        self.current_insert
    }
    pub fn flags(&self) -> TraversalFlags {
        self.flags
    }
    fn nested(&self, insert: &'a Entity, matrix: TransformationMatrix) -> State<'a> {
        State {
            matrix,
            inverse: OnceCell::new(),
            current_insert: Some(insert),
            flags: self.flags,
        }
    }
}

/// Walks entities depth-first, composing INSERT transforms.
pub(crate) struct Traverser<'a, F>
where
    F: FnMut(&State<'a>, &'a Entity) -> Visit,
{
    blocks: &'a [Block],
    callback: F,
    /// Blocks currently being exploded, outermost first.
    active_blocks: Vec<BlockId>,
}

impl<'a, F> Traverser<'a, F>
where
    F: FnMut(&State<'a>, &'a Entity) -> Visit,
{
    pub(crate) fn new(blocks: &'a [Block], callback: F) -> Self {
        Traverser {
            blocks,
            callback,
            active_blocks: vec![],
        }
    }
    pub(crate) fn traverse_entities(&mut self, state: &State<'a>, entities: &'a [Entity]) -> Visit {
        for entity in entities {
            if self.traverse_entity(state, entity) == Visit::Stop {
                return Visit::Stop;
            }
        }
        Visit::Continue
    }
    /// Visits a block's entities; the block itself is not visited.
    pub(crate) fn traverse_block(&mut self, state: &State<'a>, block: &'a Block) -> Visit {
        self.traverse_entities(state, &block.entities)
    }
    /// Deleted entities are not visited, but a deleted INSERT still places its block contents
    /// and attributes.
    pub(crate) fn traverse_entity(&mut self, state: &State<'a>, entity: &'a Entity) -> Visit {
        match entity.specific {
            EntityType::Insert(ref ins) => self.traverse_insert(state, entity, ins),
            _ if entity.is_deleted() => Visit::Continue,
            EntityType::Polyline(ref poly) => {
                if (self.callback)(state, entity) == Visit::Stop {
                    return Visit::Stop;
                }
                if state.flags().contains(TraversalFlags::TRAVERSE_POLYLINE_VERTICES) {
                    return self.traverse_entities(state, &poly.vertices);
                }
                Visit::Continue
            }
            _ => (self.callback)(state, entity),
        }
    }

    fn traverse_insert(&mut self, state: &State<'a>, entity: &'a Entity, ins: &'a Insert) -> Visit {
        let blocks = self.blocks;
        let resolved = ins
            .block()
            .and_then(|id| blocks.get(id.0).map(|block| (id, block)))
            .filter(|(_, block)| block.name() == ins.block_name());
        match resolved {
            Some((id, block)) if state.flags().contains(TraversalFlags::EXPLODE_INSERTS) => {
                if self.active_blocks.contains(&id) {
                    warn!("BLOCK {} is inserted into itself; not exploding", block.name());
                } else {
                    self.active_blocks.push(id);
                    let result = self.explode(state, entity, ins, block);
                    self.active_blocks.pop();
                    if result == Visit::Stop {
                        return Visit::Stop;
                    }
                }
            }
            _ => {
                if !entity.is_deleted() && (self.callback)(state, entity) == Visit::Stop {
                    return Visit::Stop;
                }
            }
        }

        // attributes belong to the INSERT and are placed once
        let base_point = resolved.map_or_else(Point::origin, |(_, block)| block.base_point);
        let attributes = state.nested(entity, state.matrix().multiply(&ins.transform(base_point)));
        self.traverse_entities(&attributes, &ins.attributes)
    }

    fn explode(
        &mut self,
        state: &State<'a>,
        entity: &'a Entity,
        ins: &'a Insert,
        block: &'a Block,
    ) -> Visit {
        let transform = ins.transform(block.base_point);
        for row in 0..ins.row_count {
            for column in 0..ins.column_count {
                let mut matrix = *state.matrix();
                matrix.mult_right(&ins.cell_offset(row, column));
                matrix.mult_right(&transform);
                let cell = state.nested(entity, matrix);
                if self.traverse_block(&cell, block) == Visit::Stop {
                    return Visit::Stop;
                }
            }
        }
        Visit::Continue
    }
}
