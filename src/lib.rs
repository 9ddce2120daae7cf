//! This crate reads and writes DXF CAD drawings and walks them as an entity graph.
//!
//! A `Model` holds the sections of a drawing together with a `Registry` of the names, layers,
//! and handles its items share.  Inserts refer to their blocks by interned name, so a drawing
//! can be traversed with every INSERT exploded into world space geometry, and a `Converter`
//! can flatten it into points, lines, and faces grouped by color.
//!
//! # Usage
//!
//! Put this in your `Cargo.toml`:
//!
//! ``` toml
//! [dependencies]
//! dxf-model = "0.1.0"
//! ```
//!
//! Or if you want [serde](https://github.com/serde-rs/serde) support, enable the `serialize` feature:
//!
//! ``` toml
//! [dependencies]
//! dxf-model = { version = "0.1.0", features = ["serialize"] }
//! ```
//!
//! # Examples
//!
//! Open a DXF file from disk:
//!
//! ``` rust
//! # fn ex() -> dxf_model::DxfResult<()> {
//! use dxf_model::Model;
//! use dxf_model::entities::*;
//! use dxf_model::EntityType;
//!
//! let model = Model::load_file("path/to/file.dxf")?;
//! for e in model.entities().unwrap_or(&[]) {
//!     println!("found entity on layer {}", model.registry().layer_name(e.layer()));
//!     match e.specific {
//!         EntityType::Circle(ref circle) => {
//!             // do something with the circle
//!         },
//!         EntityType::Line(ref line) => {
//!             // do something with the line
//!         },
//!         _ => (),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Saving a DXF file to disk:
//!
//! ``` rust
//! # fn ex() -> dxf_model::DxfResult<()> {
//! use dxf_model::{Entity, EntityType, Model};
//! use dxf_model::entities::*;
//!
//! let mut model = Model::new();
//! model.add_entity(Entity::new(EntityType::Line(Line::default())));
//! model.save_file("path/to/file.dxf")?;
//! # Ok(())
//! # }
//! ```
//!
//! Walking every entity with inserts exploded:
//!
//! ``` rust
//! # fn ex() -> dxf_model::DxfResult<()> {
//! use dxf_model::{Model, TraversalFlags, Visit};
//!
//! let model = Model::load_file("path/to/file.dxf")?;
//! model.traverse_entities(false, TraversalFlags::EXPLODE_INSERTS, |state, entity| {
//!     println!("{} at {:?}", entity.type_string(), state.matrix());
//!     Visit::Continue
//! });
//! # Ok(())
//! # }
//! ```
//!
//! # Reference
//!
//! [R12 (non-Autodesk source)](http://www.martinreddy.net/gfx/3d/DXF12.spec)
//!
//! [2014](http://images.autodesk.com/adsk/files/autocad_2014_pdf_dxf_reference_enu.pdf)
//!

#![warn(clippy::doc_markdown)]

#[macro_use]
extern crate enum_primitive;

#[macro_use]
extern crate log;

#[cfg(feature = "serialize")]
#[macro_use]
extern crate serde_derive;

#[macro_use]
mod helper_functions;

mod code_pair;
pub use crate::code_pair::CodePair;

mod code_pair_value;
pub use crate::code_pair_value::CodePairValue;

mod expected_type;
pub use crate::expected_type::ExpectedType;

mod handle;
pub use crate::handle::Handle;

mod dxf_error;
pub use crate::dxf_error::DxfError;

mod dxf_result;
pub use crate::dxf_result::DxfResult;

mod code_pair_iter;
mod code_pair_put_back;
mod code_pair_writer;

pub mod enums;

mod point;
pub use crate::point::Point;

mod vector;
pub use crate::vector::Vector;

mod transformation_matrix;
pub use crate::transformation_matrix::TransformationMatrix;

mod geometry;
pub use crate::geometry::{Geometry, GeometryKind};

mod dictionary;
pub use crate::dictionary::Dictionary;

mod layer;
pub use crate::layer::{Layer, LayerId, LayerTable, DEFAULT_LAYER_COLOR, DEFAULT_LAYER_NAME};

mod registry;
pub use crate::registry::Registry;

mod record_holder;
pub use crate::record_holder::RecordHolder;

pub mod entities;

mod entity;
pub use crate::entity::*;

mod entity_iter;

mod header;
pub use crate::header::HeaderSection;

mod class;
pub use crate::class::{Class, ClassesSection};

mod table;
pub use crate::table::{LayerEntry, Table, TableEntry, TableEntryType, TablesSection, UcsEntry};

mod block;
pub use crate::block::{Block, BlockId, BlocksSection};

mod object;
pub use crate::object::{Object, ObjectsSection};

mod section;
pub use crate::section::{EntitiesSection, Section, UnknownSection};

mod state;
pub use crate::state::{State, TraversalFlags, Visit};

mod model;
pub use crate::model::Model;

mod layer_data;
pub use crate::layer_data::LayerData;

mod convert;
pub use crate::convert::{Converter, ConverterSettings};
