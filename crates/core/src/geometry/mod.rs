// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Geometry command encoding.
//!
//! A geometry is a packed run of `uint32`: a command integer
//! `(id & 7) | (count << 3)` followed by `count` zigzag encoded
//! coordinate deltas (two per point) for MoveTo and LineTo, and no
//! parameters for ClosePath.

mod decoder;
mod encoder;

use std::fmt::{Display, Formatter};

pub use decoder::{
	DecodedGeometry, GeometryCollector, GeometryHandler, decode_geometry, decode_linestring_geometry,
	decode_point_geometry, decode_polygon_geometry,
};
pub use encoder::{EncodedGeometry, GeometryEncoder, LineStringEncoder, PointEncoder, PolygonEncoder};
use serde::{Deserialize, Serialize};
use vectile_type::GeomType;

pub const COMMAND_MOVE_TO: u32 = 1;
pub const COMMAND_LINE_TO: u32 = 2;
pub const COMMAND_CLOSE_PATH: u32 = 7;

/// Counts must fit into the 29 bits left after the command id.
pub const MAX_COMMAND_COUNT: u32 = (1 << 29) - 1;

pub const fn command_integer(id: u32, count: u32) -> u32 {
	(id & 0x7) | (count << 3)
}

pub const fn command_id(command: u32) -> u32 {
	command & 0x7
}

pub const fn command_count(command: u32) -> u32 {
	command >> 3
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
	pub x: i32,
	pub y: i32,
}

impl Point {
	pub const fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}
}

impl From<(i32, i32)> for Point {
	fn from((x, y): (i32, i32)) -> Self {
		Point::new(x, y)
	}
}

impl Display for Point {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "({},{})", self.x, self.y)
	}
}

/// Orientation of a polygon ring, derived from the sign of its area in
/// tile coordinates (y pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RingType {
	Outer,
	Inner,
	/// Zero area.
	Invalid,
}

/// The raw geometry of a feature together with its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry<'a> {
	data: &'a [u8],
	geom_type: GeomType,
}

impl<'a> Geometry<'a> {
	pub fn new(data: &'a [u8], geom_type: GeomType) -> Self {
		Self {
			data,
			geom_type,
		}
	}

	/// The packed command integers, without the protobuf field header.
	pub fn data(&self) -> &'a [u8] {
		self.data
	}

	pub fn geom_type(&self) -> GeomType {
		self.geom_type
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
	/// Reject zero length moves and degenerate rings. This covers every
	/// coordinate pair, MoveTo parameters included, so a geometry whose
	/// first point is the origin only decodes with `strict` off.
	///
	/// Default: true
	pub strict: bool,
}

impl Default for DecodeConfig {
	fn default() -> Self {
		Self {
			strict: true,
		}
	}
}

impl DecodeConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}
}
