// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

mod encoded;
mod index;
pub mod kind;
mod ordered_f32;
mod ordered_f64;
mod property;
mod r#type;

pub use encoded::EncodedPropertyValue;
pub use index::Index;
pub use kind::{
	BoolValue, DoubleValue, EncodeAs, FloatValue, IntValue, PropertyKind, SIntValue, StringValue, UIntValue,
};
pub use ordered_f32::OrderedF32;
pub use ordered_f64::OrderedF64;
pub use property::PropertyValue;
pub use r#type::{GeomType, PropertyValueType};
