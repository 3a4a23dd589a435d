// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use vectile_type::{
	GeomType, Result, format_error, geometry_error,
	pbf::{PackedUint32, decode_zigzag32},
};

use crate::geometry::{
	COMMAND_CLOSE_PATH, COMMAND_LINE_TO, COMMAND_MOVE_TO, Geometry, Point, RingType, command_count, command_id,
};

/// Receives decoded geometry. Every callback has an empty default, so a
/// handler only implements the ones for the geometry type it expects.
#[allow(unused_variables)]
pub trait GeometryHandler {
	fn points_begin(&mut self, count: u32) {}
	fn points_point(&mut self, point: Point) {}
	fn points_end(&mut self) {}

	fn linestring_begin(&mut self, count: u32) {}
	fn linestring_point(&mut self, point: Point) {}
	fn linestring_end(&mut self) {}

	/// `count` includes the repeated first point that closes the ring.
	fn ring_begin(&mut self, count: u32) {}
	fn ring_point(&mut self, point: Point) {}
	fn ring_end(&mut self, ring_type: RingType) {}
}

struct Decoder<'a> {
	commands: PackedUint32<'a>,
	cursor: Point,
	strict: bool,
}

impl<'a> Decoder<'a> {
	fn new(data: &'a [u8], strict: bool) -> Self {
		Self {
			commands: PackedUint32::new(data),
			cursor: Point::default(),
			strict,
		}
	}

	fn done(&self) -> bool {
		self.commands.is_empty()
	}

	/// Reads the next command and returns its count.
	fn command(&mut self, expected: u32) -> Result<u32> {
		let Some(command) = self.commands.next() else {
			return geometry_error!("expected command {expected} but geometry ended");
		};
		let command = command?;
		if command_id(command) != expected {
			return geometry_error!("expected command {expected} but got {}", command_id(command));
		}
		Ok(command_count(command))
	}

	fn parameter(&mut self) -> Result<i32> {
		match self.commands.next() {
			Some(value) => Ok(decode_zigzag32(value?)),
			None => geometry_error!("too few points in geometry"),
		}
	}

	/// Reads one coordinate pair relative to the cursor. In strict mode a
	/// zero length move is rejected, including the first MoveTo of a
	/// geometry that starts at the origin.
	fn point(&mut self) -> Result<Point> {
		let dx = self.parameter()?;
		let dy = self.parameter()?;
		if self.strict && dx == 0 && dy == 0 {
			return geometry_error!("found consecutive equal points (strict mode)");
		}
		self.cursor = Point::new(self.cursor.x.wrapping_add(dx), self.cursor.y.wrapping_add(dy));
		Ok(self.cursor)
	}

	fn move_to(&mut self) -> Result<Point> {
		if self.command(COMMAND_MOVE_TO)? != 1 {
			return geometry_error!("MoveTo command count is not 1");
		}
		self.point()
	}
}

pub fn decode_point_geometry(data: &[u8], strict: bool, handler: &mut impl GeometryHandler) -> Result<()> {
	let mut decoder = Decoder::new(data, strict);
	let count = decoder.command(COMMAND_MOVE_TO)?;
	if count == 0 {
		return geometry_error!("MoveTo command count is zero");
	}

	handler.points_begin(count);
	for _ in 0..count {
		let point = decoder.point()?;
		handler.points_point(point);
	}
	handler.points_end();

	if !decoder.done() {
		return geometry_error!("additional data after end of geometry");
	}
	Ok(())
}

pub fn decode_linestring_geometry(data: &[u8], strict: bool, handler: &mut impl GeometryHandler) -> Result<()> {
	let mut decoder = Decoder::new(data, strict);
	while !decoder.done() {
		let start = decoder.move_to()?;
		let count = decoder.command(COMMAND_LINE_TO)?;
		if count == 0 {
			return geometry_error!("LineTo command count is zero");
		}

		handler.linestring_begin(count + 1);
		handler.linestring_point(start);
		for _ in 0..count {
			let point = decoder.point()?;
			handler.linestring_point(point);
		}
		handler.linestring_end();
	}
	Ok(())
}

pub fn decode_polygon_geometry(data: &[u8], strict: bool, handler: &mut impl GeometryHandler) -> Result<()> {
	let mut decoder = Decoder::new(data, strict);
	while !decoder.done() {
		let start = decoder.move_to()?;
		let count = decoder.command(COMMAND_LINE_TO)?;
		if strict && count <= 1 {
			return geometry_error!("LineTo command count must be larger than 1 in a ring");
		}

		handler.ring_begin(count + 2);
		handler.ring_point(start);

		let mut sum: i128 = 0;
		let mut last = start;
		for _ in 0..count {
			let point = decoder.point()?;
			sum += det(last, point);
			last = point;
			handler.ring_point(point);
		}

		if decoder.command(COMMAND_CLOSE_PATH)? != 1 {
			return geometry_error!("ClosePath command count is not 1");
		}
		sum += det(last, start);
		handler.ring_point(start);

		let ring_type = match sum {
			s if s > 0 => RingType::Outer,
			s if s < 0 => RingType::Inner,
			_ => RingType::Invalid,
		};
		handler.ring_end(ring_type);
	}
	Ok(())
}

/// Each product fits in an i64 but a ring's running sum does not.
fn det(a: Point, b: Point) -> i128 {
	a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128
}

/// Decodes `geometry` according to its declared type.
pub fn decode_geometry(geometry: &Geometry<'_>, strict: bool, handler: &mut impl GeometryHandler) -> Result<()> {
	match geometry.geom_type() {
		GeomType::Point => decode_point_geometry(geometry.data(), strict, handler),
		GeomType::LineString => decode_linestring_geometry(geometry.data(), strict, handler),
		GeomType::Polygon => decode_polygon_geometry(geometry.data(), strict, handler),
		GeomType::Unknown => format_error!("cannot decode geometry of unknown type"),
	}
}

/// Decoded geometry in owned form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedGeometry {
	Points(Vec<Point>),
	LineStrings(Vec<Vec<Point>>),
	Rings(Vec<(RingType, Vec<Point>)>),
}

/// A [`GeometryHandler`] that collects everything into a [`DecodedGeometry`].
#[derive(Debug, Default)]
pub struct GeometryCollector {
	points: Vec<Point>,
	parts: Vec<Vec<Point>>,
	rings: Vec<(RingType, Vec<Point>)>,
	current: Vec<Point>,
}

impl GeometryCollector {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn finish(self, geom_type: GeomType) -> DecodedGeometry {
		match geom_type {
			GeomType::Polygon => DecodedGeometry::Rings(self.rings),
			GeomType::LineString => DecodedGeometry::LineStrings(self.parts),
			_ => DecodedGeometry::Points(self.points),
		}
	}
}

impl GeometryHandler for GeometryCollector {
	fn points_begin(&mut self, count: u32) {
		self.points.reserve(count as usize);
	}

	fn points_point(&mut self, point: Point) {
		self.points.push(point);
	}

	fn linestring_begin(&mut self, count: u32) {
		self.current = Vec::with_capacity(count as usize);
	}

	fn linestring_point(&mut self, point: Point) {
		self.current.push(point);
	}

	fn linestring_end(&mut self) {
		self.parts.push(std::mem::take(&mut self.current));
	}

	fn ring_begin(&mut self, count: u32) {
		self.current = Vec::with_capacity(count as usize);
	}

	fn ring_point(&mut self, point: Point) {
		self.current.push(point);
	}

	fn ring_end(&mut self, ring_type: RingType) {
		self.rings.push((ring_type, std::mem::take(&mut self.current)));
	}
}
