// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use vectile_type::{
	GeomType, Result, geometry_error,
	pbf::{PbfWriter, encode_zigzag32},
};

use crate::{
	feature_field,
	geometry::{
		COMMAND_CLOSE_PATH, COMMAND_LINE_TO, COMMAND_MOVE_TO, Geometry, MAX_COMMAND_COUNT, Point, command_integer,
	},
};

/// Geometry state owned by a feature builder.
pub trait GeometryEncoder {
	fn geom_type(&self) -> GeomType;

	/// True once at least one complete geometry part was added.
	fn is_complete(&self) -> bool;

	/// Writes the geometry field of the feature message.
	fn write(&self, writer: &mut PbfWriter);
}

#[derive(Debug, Default)]
struct CommandWriter {
	commands: Vec<u32>,
	cursor: Point,
}

impl CommandWriter {
	fn command(&mut self, id: u32, count: usize) -> Result<()> {
		if count > MAX_COMMAND_COUNT as usize {
			return geometry_error!("command count {count} is larger than {MAX_COMMAND_COUNT}");
		}
		self.commands.push(command_integer(id, count as u32));
		Ok(())
	}

	fn point(&mut self, point: Point) {
		self.commands.push(encode_zigzag32(point.x.wrapping_sub(self.cursor.x)));
		self.commands.push(encode_zigzag32(point.y.wrapping_sub(self.cursor.y)));
		self.cursor = point;
	}

	fn write(&self, writer: &mut PbfWriter) {
		writer.add_packed_uint32(feature_field::GEOMETRY, &self.commands);
	}
}

fn check_no_repeats(points: &[Point], what: &str) -> Result<()> {
	if points.windows(2).any(|w| w[0] == w[1]) {
		return geometry_error!("{what} contains consecutive equal points");
	}
	Ok(())
}

/// A point or multipoint: one MoveTo with all points as parameters.
#[derive(Debug, Default)]
pub struct PointEncoder {
	writer: CommandWriter,
}

impl PointEncoder {
	pub fn add_point(&mut self, point: impl Into<Point>) -> Result<()> {
		self.add_points([point.into()])
	}

	pub fn add_points<I>(&mut self, points: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<Point>,
	{
		if self.is_complete() {
			return geometry_error!("point geometry has already been added");
		}
		let points: Vec<Point> = points.into_iter().map(Into::into).collect();
		if points.is_empty() {
			return geometry_error!("point geometry needs at least one point");
		}
		self.writer.command(COMMAND_MOVE_TO, points.len())?;
		for point in points {
			self.writer.point(point);
		}
		Ok(())
	}
}

impl GeometryEncoder for PointEncoder {
	fn geom_type(&self) -> GeomType {
		GeomType::Point
	}

	fn is_complete(&self) -> bool {
		!self.writer.commands.is_empty()
	}

	fn write(&self, writer: &mut PbfWriter) {
		self.writer.write(writer)
	}
}

/// One or more linestrings.
#[derive(Debug, Default)]
pub struct LineStringEncoder {
	writer: CommandWriter,
}

impl LineStringEncoder {
	pub fn add_linestring<I>(&mut self, points: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<Point>,
	{
		let points: Vec<Point> = points.into_iter().map(Into::into).collect();
		if points.len() < 2 {
			return geometry_error!("linestring needs at least two points, got {}", points.len());
		}
		check_no_repeats(&points, "linestring")?;
		if points.len() - 1 > MAX_COMMAND_COUNT as usize {
			return geometry_error!("linestring has too many points");
		}

		self.writer.command(COMMAND_MOVE_TO, 1)?;
		self.writer.point(points[0]);
		self.writer.command(COMMAND_LINE_TO, points.len() - 1)?;
		for &point in &points[1..] {
			self.writer.point(point);
		}
		Ok(())
	}
}

impl GeometryEncoder for LineStringEncoder {
	fn geom_type(&self) -> GeomType {
		GeomType::LineString
	}

	fn is_complete(&self) -> bool {
		!self.writer.commands.is_empty()
	}

	fn write(&self, writer: &mut PbfWriter) {
		self.writer.write(writer)
	}
}

/// One or more rings. Each ring is given closed (last point equal to the
/// first); the closing point is written as a ClosePath command.
#[derive(Debug, Default)]
pub struct PolygonEncoder {
	writer: CommandWriter,
}

impl PolygonEncoder {
	pub fn add_ring<I>(&mut self, points: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<Point>,
	{
		let points: Vec<Point> = points.into_iter().map(Into::into).collect();
		if points.len() < 4 {
			return geometry_error!("ring needs at least four points, got {}", points.len());
		}
		if points.first() != points.last() {
			return geometry_error!("ring is not closed");
		}
		check_no_repeats(&points, "ring")?;

		let inner = &points[1..points.len() - 1];
		self.writer.command(COMMAND_MOVE_TO, 1)?;
		self.writer.point(points[0]);
		self.writer.command(COMMAND_LINE_TO, inner.len())?;
		for &point in inner {
			self.writer.point(point);
		}
		self.writer.command(COMMAND_CLOSE_PATH, 1)?;
		Ok(())
	}
}

impl GeometryEncoder for PolygonEncoder {
	fn geom_type(&self) -> GeomType {
		GeomType::Polygon
	}

	fn is_complete(&self) -> bool {
		!self.writer.commands.is_empty()
	}

	fn write(&self, writer: &mut PbfWriter) {
		self.writer.write(writer)
	}
}

/// Geometry that is already encoded, usually copied from a tile being read.
#[derive(Debug, Default)]
pub struct EncodedGeometry {
	data: Vec<u8>,
	geom_type: GeomType,
}

impl EncodedGeometry {
	pub fn set_geometry(&mut self, geometry: &Geometry<'_>) -> Result<()> {
		if self.is_complete() {
			return geometry_error!("geometry has already been set");
		}
		if geometry.is_empty() {
			return geometry_error!("geometry is empty");
		}
		self.data = geometry.data().to_vec();
		self.geom_type = geometry.geom_type();
		Ok(())
	}
}

impl GeometryEncoder for EncodedGeometry {
	fn geom_type(&self) -> GeomType {
		self.geom_type
	}

	fn is_complete(&self) -> bool {
		!self.data.is_empty()
	}

	fn write(&self, writer: &mut PbfWriter) {
		writer.add_bytes(feature_field::GEOMETRY, &self.data);
	}
}

#[cfg(test)]
mod tests {
	use vectile_type::Error;

	use super::*;

	fn commands(encoder: &impl GeometryEncoder) -> Vec<u32> {
		let mut writer = PbfWriter::new();
		encoder.write(&mut writer);
		let mut reader = vectile_type::pbf::PbfReader::new(writer.as_bytes());
		assert!(reader.next().unwrap());
		reader.get_packed_uint32().unwrap().collect::<Result<Vec<_>>>().unwrap()
	}

	#[test]
	fn test_point() {
		let mut encoder = PointEncoder::default();
		encoder.add_point((25, 17)).unwrap();
		assert_eq!(commands(&encoder), vec![9, 50, 34]);
		assert!(matches!(encoder.add_point((1, 1)), Err(Error::Geometry(_))));
	}

	#[test]
	fn test_multipoint() {
		let mut encoder = PointEncoder::default();
		encoder.add_points([(5, 7), (3, 2)]).unwrap();
		assert_eq!(commands(&encoder), vec![17, 10, 14, 3, 9]);
	}

	#[test]
	fn test_linestring() {
		let mut encoder = LineStringEncoder::default();
		encoder.add_linestring([(2, 2), (2, 10), (10, 10)]).unwrap();
		assert_eq!(commands(&encoder), vec![9, 4, 4, 18, 0, 16, 16, 0]);
	}

	#[test]
	fn test_linestring_errors() {
		let mut encoder = LineStringEncoder::default();
		assert!(encoder.add_linestring([(1, 1)]).is_err());
		assert!(encoder.add_linestring([(1, 1), (1, 1), (2, 2)]).is_err());
		assert!(!encoder.is_complete());
	}

	#[test]
	fn test_polygon() {
		let mut encoder = PolygonEncoder::default();
		encoder.add_ring([(3, 6), (8, 12), (20, 34), (3, 6)]).unwrap();
		assert_eq!(commands(&encoder), vec![9, 6, 12, 18, 10, 12, 24, 44, 15]);
	}

	#[test]
	fn test_unclosed_ring() {
		let mut encoder = PolygonEncoder::default();
		assert!(matches!(encoder.add_ring([(0, 0), (1, 0), (1, 1), (0, 1)]), Err(Error::Geometry(_))));
	}
}
