// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Shared types for vectile: property values and their tags, protobuf wire
//! primitives and the error type used across the workspace.

mod error;
pub mod pbf;
pub mod value;

pub use error::{Error, Result};
pub use value::{
	EncodeAs, EncodedPropertyValue, GeomType, Index, OrderedF32, OrderedF64, PropertyKind, PropertyValue,
	PropertyValueType,
};
