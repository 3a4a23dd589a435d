// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use vectile_type::{
	GeomType, Index, PropertyValue, Result, format_error,
	pbf::{PackedUint32, PbfReader},
};

use crate::{
	feature_field,
	geometry::{DecodeConfig, Geometry, GeometryHandler, decode_geometry},
	reader::{Layer, Property, PropertyValueView},
};

/// A feature of a [`Layer`]. Property indexes are resolved through the
/// layer's tables on access.
#[derive(Debug, Clone)]
pub struct Feature<'a> {
	layer: &'a Layer<'a>,
	id: Option<u64>,
	geom_type: GeomType,
	geometry: &'a [u8],
	tags: PackedUint32<'a>,
}

impl<'a> Feature<'a> {
	pub(crate) fn new(layer: &'a Layer<'a>, data: &'a [u8]) -> Result<Self> {
		let mut id = None;
		let mut geom_type = GeomType::Unknown;
		let mut geometry = None;
		let mut tags = None;

		let mut reader = PbfReader::new(data);
		while reader.next()? {
			match reader.field() {
				feature_field::ID => id = Some(reader.get_uint64()?),
				feature_field::TAGS => {
					if tags.is_some() {
						return format_error!("feature has more than one tags field");
					}
					tags = Some(reader.get_packed_uint32()?);
				}
				feature_field::TYPE => geom_type = GeomType::try_from(reader.get_enum()?)?,
				feature_field::GEOMETRY => {
					if geometry.is_some() {
						return format_error!("feature has more than one geometry field");
					}
					geometry = Some(reader.get_view()?);
				}
				_ => reader.skip()?,
			}
		}

		let Some(geometry) = geometry else {
			return format_error!("missing geometry field in feature (required)");
		};
		let tags = tags.unwrap_or_default();
		if tags.count_remaining() % 2 != 0 {
			return format_error!("unpaired property key/value indexes in feature");
		}

		Ok(Self {
			layer,
			id,
			geom_type,
			geometry,
			tags,
		})
	}

	pub fn layer(&self) -> &'a Layer<'a> {
		self.layer
	}

	pub fn id(&self) -> Option<u64> {
		self.id
	}

	pub fn has_id(&self) -> bool {
		self.id.is_some()
	}

	pub fn geometry_type(&self) -> GeomType {
		self.geom_type
	}

	pub fn geometry(&self) -> Geometry<'a> {
		Geometry::new(self.geometry, self.geom_type)
	}

	pub fn decode_geometry(&self, config: &DecodeConfig, handler: &mut impl GeometryHandler) -> Result<()> {
		decode_geometry(&self.geometry(), config.strict, handler)
	}

	pub fn property_count(&self) -> usize {
		self.tags.count_remaining() / 2
	}

	/// The raw `(key, value)` index pairs.
	pub fn property_indexes(&self) -> PropertyIndexes<'a> {
		PropertyIndexes {
			tags: self.tags,
		}
	}

	/// Properties with keys and values looked up in the layer tables.
	pub fn properties(&self) -> Properties<'a> {
		Properties {
			layer: self.layer,
			indexes: self.property_indexes(),
		}
	}

	/// Collects all properties into a map of owned values, e.g. a
	/// `HashMap<&str, PropertyValue>`. A key that occurs more than once
	/// keeps whatever the target collection keeps.
	pub fn properties_map<M>(&self) -> Result<M>
	where
		M: FromIterator<(&'a str, PropertyValue)>,
	{
		self.properties()
			.map(|property| {
				let property = property?;
				Ok((property.key, property.value.to_owned_value()?))
			})
			.collect()
	}
}

pub struct PropertyIndexes<'a> {
	tags: PackedUint32<'a>,
}

impl Iterator for PropertyIndexes<'_> {
	type Item = Result<(Index, Index)>;

	fn next(&mut self) -> Option<Self::Item> {
		let key = match self.tags.next()? {
			Ok(key) => key,
			Err(err) => return Some(Err(err)),
		};
		let pair = match self.tags.next() {
			Some(Ok(value)) => Ok((Index(key), Index(value))),
			Some(Err(err)) => Err(err),
			None => format_error!("unpaired property key/value indexes in feature"),
		};
		Some(pair)
	}
}

pub struct Properties<'a> {
	layer: &'a Layer<'a>,
	indexes: PropertyIndexes<'a>,
}

impl<'a> Properties<'a> {
	fn resolve(&self, key: Index, value: Index) -> Result<Property<'a>> {
		let key = self.layer.key(key)?;
		let value: PropertyValueView<'a> = self.layer.value(value)?;
		Ok(Property {
			key,
			value,
		})
	}
}

impl<'a> Iterator for Properties<'a> {
	type Item = Result<Property<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		Some(self.indexes.next()?.and_then(|(key, value)| self.resolve(key, value)))
	}
}
