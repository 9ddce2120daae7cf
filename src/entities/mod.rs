// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

//! The typed entity payloads carried by `EntityType`.

mod curves;
mod extrusion;
mod face;
mod insert;
mod polyline;
mod spline;
mod text;

pub use self::curves::*;
pub use self::extrusion::*;
pub use self::face::*;
pub use self::insert::*;
pub use self::polyline::*;
pub use self::spline::*;
pub use self::text::*;
