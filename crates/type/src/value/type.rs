// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, format_error, pbf::WireType};

/// The tag of a property value. The discriminants are the field numbers of
/// the protobuf `Value` message.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyValueType {
	String = 1,
	Float = 2,
	Double = 3,
	Int = 4,
	UInt = 5,
	SInt = 6,
	Bool = 7,
}

impl PropertyValueType {
	pub const ALL: [PropertyValueType; 7] = [
		PropertyValueType::String,
		PropertyValueType::Float,
		PropertyValueType::Double,
		PropertyValueType::Int,
		PropertyValueType::UInt,
		PropertyValueType::SInt,
		PropertyValueType::Bool,
	];

	pub fn field(&self) -> u32 {
		*self as u32
	}

	pub fn name(&self) -> &'static str {
		match self {
			PropertyValueType::String => "string",
			PropertyValueType::Float => "float",
			PropertyValueType::Double => "double",
			PropertyValueType::Int => "int",
			PropertyValueType::UInt => "uint",
			PropertyValueType::SInt => "sint",
			PropertyValueType::Bool => "bool",
		}
	}

	pub fn wire_type(&self) -> WireType {
		match self {
			PropertyValueType::String => WireType::LengthDelimited,
			PropertyValueType::Float => WireType::Fixed32,
			PropertyValueType::Double => WireType::Fixed64,
			PropertyValueType::Int
			| PropertyValueType::UInt
			| PropertyValueType::SInt
			| PropertyValueType::Bool => WireType::Varint,
		}
	}
}

impl Display for PropertyValueType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl TryFrom<u32> for PropertyValueType {
	type Error = Error;

	fn try_from(field: u32) -> Result<Self> {
		match field {
			1 => Ok(PropertyValueType::String),
			2 => Ok(PropertyValueType::Float),
			3 => Ok(PropertyValueType::Double),
			4 => Ok(PropertyValueType::Int),
			5 => Ok(PropertyValueType::UInt),
			6 => Ok(PropertyValueType::SInt),
			7 => Ok(PropertyValueType::Bool),
			other => format_error!("illegal property value type {other}"),
		}
	}
}

/// Geometry type of a feature.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeomType {
	#[default]
	Unknown = 0,
	Point = 1,
	LineString = 2,
	Polygon = 3,
}

impl GeomType {
	pub fn name(&self) -> &'static str {
		match self {
			GeomType::Unknown => "unknown",
			GeomType::Point => "point",
			GeomType::LineString => "linestring",
			GeomType::Polygon => "polygon",
		}
	}
}

impl Display for GeomType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl TryFrom<i32> for GeomType {
	type Error = Error;

	fn try_from(value: i32) -> Result<Self> {
		match value {
			0 => Ok(GeomType::Unknown),
			1 => Ok(GeomType::Point),
			2 => Ok(GeomType::LineString),
			3 => Ok(GeomType::Polygon),
			other => format_error!("unknown geometry type {other}"),
		}
	}
}
