// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use vectile_type::{EncodedPropertyValue, Error, Index, PropertyValue, Result, geometry_error};

use crate::{
	builder::LayerBuilder,
	feature_field,
	geometry::{
		EncodedGeometry, Geometry, GeometryEncoder, LineStringEncoder, Point, PointEncoder, PolygonEncoder,
	},
};

/// Anything that can name an entry of the key table.
///
/// An [`Index`] is taken as is after checking that the table issued it.
/// Strings are added to the key table.
pub trait IntoKeyIndex {
	/// Fails if this could never resolve, without touching the table.
	fn verify(&self, _layer: &LayerBuilder) -> Result<()> {
		Ok(())
	}

	fn into_key_index(self, layer: &LayerBuilder) -> Result<Index>;
}

impl IntoKeyIndex for Index {
	fn verify(&self, layer: &LayerBuilder) -> Result<()> {
		layer.check_key(*self).map(|_| ())
	}

	fn into_key_index(self, layer: &LayerBuilder) -> Result<Index> {
		layer.check_key(self)
	}
}

impl IntoKeyIndex for &str {
	fn into_key_index(self, layer: &LayerBuilder) -> Result<Index> {
		layer.add_key(self)
	}
}

impl IntoKeyIndex for &String {
	fn into_key_index(self, layer: &LayerBuilder) -> Result<Index> {
		layer.add_key(self)
	}
}

impl IntoKeyIndex for String {
	fn into_key_index(self, layer: &LayerBuilder) -> Result<Index> {
		layer.add_key(&self)
	}
}

/// Anything that can name an entry of the value table.
///
/// An [`Index`] is checked against the table. Everything else is encoded
/// and added to the value table. Plain Rust numbers use the same tags as
/// [`PropertyValue`]'s `From` impls.
pub trait IntoValueIndex {
	/// Fails if this could never resolve, without touching the table.
	fn verify(&self, _layer: &LayerBuilder) -> Result<()> {
		Ok(())
	}

	fn into_value_index(self, layer: &LayerBuilder) -> Result<Index>;
}

impl IntoValueIndex for Index {
	fn verify(&self, layer: &LayerBuilder) -> Result<()> {
		layer.check_value(*self).map(|_| ())
	}

	fn into_value_index(self, layer: &LayerBuilder) -> Result<Index> {
		layer.check_value(self)
	}
}

impl IntoValueIndex for EncodedPropertyValue {
	fn into_value_index(self, layer: &LayerBuilder) -> Result<Index> {
		layer.add_value(self)
	}
}

impl IntoValueIndex for &EncodedPropertyValue {
	fn into_value_index(self, layer: &LayerBuilder) -> Result<Index> {
		layer.add_value(self.clone())
	}
}

impl IntoValueIndex for &PropertyValue {
	fn into_value_index(self, layer: &LayerBuilder) -> Result<Index> {
		layer.add_value(EncodedPropertyValue::encode(self))
	}
}

macro_rules! into_value_index {
	($($native:ty),*) => {
		$(
			impl IntoValueIndex for $native {
				fn into_value_index(self, layer: &LayerBuilder) -> Result<Index> {
					layer.add_value(PropertyValue::from(self))
				}
			}
		)*
	};
}

into_value_index!(PropertyValue, &str, String, f32, f64, i32, i64, u32, u64, bool);

/// Builds one feature of a layer.
///
/// Geometry comes first, then properties. Nothing is written to the layer
/// until [`FeatureBuilder::commit`]; dropping the builder (or calling
/// [`FeatureBuilder::rollback`]) discards the feature. Keys and values
/// added for a discarded feature stay in the layer tables.
pub struct FeatureBuilder<'a, G> {
	layer: &'a LayerBuilder,
	id: Option<u64>,
	geometry: G,
	tags: Vec<u32>,
}

pub type PointFeatureBuilder<'a> = FeatureBuilder<'a, PointEncoder>;
pub type LineStringFeatureBuilder<'a> = FeatureBuilder<'a, LineStringEncoder>;
pub type PolygonFeatureBuilder<'a> = FeatureBuilder<'a, PolygonEncoder>;
pub type GeometryFeatureBuilder<'a> = FeatureBuilder<'a, EncodedGeometry>;

impl<'a, G: GeometryEncoder + Default> FeatureBuilder<'a, G> {
	pub fn new(layer: &'a LayerBuilder) -> Result<Self> {
		if !layer.is_open() {
			return Err(Error::invalid_state(format!(
				"cannot add a feature to layer '{}' after it was serialized",
				layer.name()
			)));
		}
		Ok(Self {
			layer,
			id: None,
			geometry: G::default(),
			tags: Vec::new(),
		})
	}
}

impl<'a, G: GeometryEncoder> FeatureBuilder<'a, G> {
	pub fn layer(&self) -> &'a LayerBuilder {
		self.layer
	}

	pub fn set_id(&mut self, id: u64) -> Result<()> {
		self.id = Some(id);
		Ok(())
	}

	pub fn has_id(&self) -> bool {
		self.id.is_some()
	}

	fn geometry_mut(&mut self) -> Result<&mut G> {
		if !self.tags.is_empty() {
			return Err(Error::invalid_state("geometry must be added before properties"));
		}
		Ok(&mut self.geometry)
	}

	/// Adds a property. Index arguments are checked before anything is
	/// added to the tables.
	pub fn add_property(&mut self, key: impl IntoKeyIndex, value: impl IntoValueIndex) -> Result<()> {
		if !self.geometry.is_complete() {
			return Err(Error::invalid_state("geometry must be added before properties"));
		}
		key.verify(self.layer)?;
		value.verify(self.layer)?;
		let value = value.into_value_index(self.layer)?;
		let key = key.into_key_index(self.layer)?;
		self.tags.push(key.value());
		self.tags.push(value.value());
		Ok(())
	}

	pub fn property_count(&self) -> usize {
		self.tags.len() / 2
	}

	/// Writes the feature to the layer.
	pub fn commit(self) -> Result<()> {
		if !self.geometry.is_complete() {
			return geometry_error!("cannot commit a feature without geometry");
		}
		let Self {
			layer,
			id,
			geometry,
			tags,
		} = self;
		layer.push_feature(|writer| {
			if let Some(id) = id {
				writer.add_uint64(feature_field::ID, id);
			}
			writer.add_packed_uint32(feature_field::TAGS, &tags);
			writer.add_enum(feature_field::TYPE, geometry.geom_type() as i32);
			geometry.write(writer);
		})
	}

	/// Discards the feature.
	pub fn rollback(self) {}
}

impl FeatureBuilder<'_, PointEncoder> {
	pub fn add_point(&mut self, point: impl Into<Point>) -> Result<()> {
		self.geometry_mut()?.add_point(point)
	}

	pub fn add_points<I>(&mut self, points: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<Point>,
	{
		self.geometry_mut()?.add_points(points)
	}
}

impl FeatureBuilder<'_, LineStringEncoder> {
	/// May be called more than once for a multilinestring.
	pub fn add_linestring<I>(&mut self, points: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<Point>,
	{
		self.geometry_mut()?.add_linestring(points)
	}
}

impl FeatureBuilder<'_, PolygonEncoder> {
	/// Outer rings must be clockwise and inner rings counterclockwise in
	/// tile coordinates; this is not checked.
	pub fn add_ring<I>(&mut self, points: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<Point>,
	{
		self.geometry_mut()?.add_ring(points)
	}
}

impl FeatureBuilder<'_, EncodedGeometry> {
	pub fn set_geometry(&mut self, geometry: &Geometry<'_>) -> Result<()> {
		self.geometry_mut()?.set_geometry(geometry)
	}
}
