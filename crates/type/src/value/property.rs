// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::value::{OrderedF32, OrderedF64, PropertyValueType};

/// An owned property value, one variant per tag.
///
/// Unlike a plain `i64`, the variant decides how the value is written:
/// `Int(6)` and `SInt(6)` are different values with different encodings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyValue {
	String(String),
	Float(OrderedF32),
	Double(OrderedF64),
	Int(i64),
	UInt(u64),
	SInt(i64),
	Bool(bool),
}

impl PropertyValue {
	pub fn value_type(&self) -> PropertyValueType {
		match self {
			PropertyValue::String(_) => PropertyValueType::String,
			PropertyValue::Float(_) => PropertyValueType::Float,
			PropertyValue::Double(_) => PropertyValueType::Double,
			PropertyValue::Int(_) => PropertyValueType::Int,
			PropertyValue::UInt(_) => PropertyValueType::UInt,
			PropertyValue::SInt(_) => PropertyValueType::SInt,
			PropertyValue::Bool(_) => PropertyValueType::Bool,
		}
	}

	pub fn float(value: f32) -> Self {
		PropertyValue::Float(OrderedF32(value))
	}

	pub fn double(value: f64) -> Self {
		PropertyValue::Double(OrderedF64(value))
	}
}

impl Display for PropertyValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			PropertyValue::String(v) => write!(f, "{v}"),
			PropertyValue::Float(v) => write!(f, "{v}"),
			PropertyValue::Double(v) => write!(f, "{v}"),
			PropertyValue::Int(v) => write!(f, "{v}"),
			PropertyValue::UInt(v) => write!(f, "{v}"),
			PropertyValue::SInt(v) => write!(f, "{v}"),
			PropertyValue::Bool(v) => write!(f, "{v}"),
		}
	}
}

impl From<&str> for PropertyValue {
	fn from(v: &str) -> Self {
		PropertyValue::String(v.to_string())
	}
}

impl From<String> for PropertyValue {
	fn from(v: String) -> Self {
		PropertyValue::String(v)
	}
}

impl From<f32> for PropertyValue {
	fn from(v: f32) -> Self {
		PropertyValue::float(v)
	}
}

impl From<f64> for PropertyValue {
	fn from(v: f64) -> Self {
		PropertyValue::double(v)
	}
}

// Plain signed integers default to zigzag, unsigned to plain varint.
impl From<i64> for PropertyValue {
	fn from(v: i64) -> Self {
		PropertyValue::SInt(v)
	}
}

impl From<i32> for PropertyValue {
	fn from(v: i32) -> Self {
		PropertyValue::SInt(v as i64)
	}
}

impl From<u64> for PropertyValue {
	fn from(v: u64) -> Self {
		PropertyValue::UInt(v)
	}
}

impl From<u32> for PropertyValue {
	fn from(v: u32) -> Self {
		PropertyValue::UInt(v as u64)
	}
}

impl From<bool> for PropertyValue {
	fn from(v: bool) -> Self {
		PropertyValue::Bool(v)
	}
}
