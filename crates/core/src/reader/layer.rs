// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use vectile_type::{Error, Index, Result, format_error, pbf::PbfReader};

use crate::{
	layer_field,
	reader::{Feature, PropertyValueView},
};

/// A layer of an encoded tile.
///
/// Construction reads the layer header and records where the features and
/// table entries are. Nothing is copied; features and values are decoded on
/// access.
#[derive(Debug, Clone)]
pub struct Layer<'a> {
	data: &'a [u8],
	name: &'a str,
	version: u32,
	extent: u32,
	keys: Vec<&'a str>,
	values: Vec<&'a [u8]>,
	features: Vec<&'a [u8]>,
}

impl<'a> Layer<'a> {
	pub fn new(data: &'a [u8]) -> Result<Self> {
		let mut name = None;
		let mut version = 1;
		let mut extent = 4096;
		let mut keys = Vec::new();
		let mut values = Vec::new();
		let mut features = Vec::new();

		let mut reader = PbfReader::new(data);
		while reader.next()? {
			match reader.field() {
				layer_field::VERSION => version = reader.get_uint32()?,
				layer_field::NAME => name = Some(reader.get_string()?),
				layer_field::EXTENT => extent = reader.get_uint32()?,
				layer_field::FEATURES => features.push(reader.get_view()?),
				layer_field::KEYS => keys.push(reader.get_string()?),
				layer_field::VALUES => values.push(reader.get_view()?),
				other => return format_error!("unknown field in layer (tag={other})"),
			}
		}

		if !(1..=2).contains(&version) {
			return Err(Error::Version(version));
		}
		let Some(name) = name else {
			return format_error!("missing name field in layer (required)");
		};

		Ok(Self {
			data,
			name,
			version,
			extent,
			keys,
			values,
			features,
		})
	}

	/// The encoded `Layer` message.
	pub fn data(&self) -> &'a [u8] {
		self.data
	}

	pub fn name(&self) -> &'a str {
		self.name
	}

	pub fn version(&self) -> u32 {
		self.version
	}

	pub fn extent(&self) -> u32 {
		self.extent
	}

	pub fn key_table(&self) -> &[&'a str] {
		&self.keys
	}

	pub fn value_table(&self) -> Result<Vec<PropertyValueView<'a>>> {
		self.values.iter().map(|data| PropertyValueView::new(data)).collect()
	}

	pub fn key(&self, index: Index) -> Result<&'a str> {
		match self.keys.get(index.as_usize()) {
			Some(key) => Ok(*key),
			None => format_error!("key index {index} out of range (table has {} entries)", self.keys.len()),
		}
	}

	pub fn value(&self, index: Index) -> Result<PropertyValueView<'a>> {
		match self.values.get(index.as_usize()) {
			Some(data) => PropertyValueView::new(data),
			None => format_error!("value index {index} out of range (table has {} entries)", self.values.len()),
		}
	}

	pub fn feature_count(&self) -> usize {
		self.features.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	pub fn features(&self) -> impl Iterator<Item = Result<Feature<'_>>> {
		self.features.iter().map(|data| Feature::new(self, data))
	}

	pub fn feature(&self, n: usize) -> Result<Option<Feature<'_>>> {
		self.features.get(n).map(|data| Feature::new(self, data)).transpose()
	}

	/// The first feature with the given id.
	pub fn feature_by_id(&self, id: u64) -> Result<Option<Feature<'_>>> {
		for feature in self.features() {
			let feature = feature?;
			if feature.id() == Some(id) {
				return Ok(Some(feature));
			}
		}
		Ok(None)
	}
}

#[cfg(test)]
mod tests {
	use vectile_type::pbf::PbfWriter;

	use super::*;

	#[test]
	fn test_defaults() {
		let mut writer = PbfWriter::new();
		writer.add_string(layer_field::NAME, "water");
		let layer = Layer::new(writer.as_bytes()).unwrap();
		assert_eq!(layer.name(), "water");
		assert_eq!(layer.version(), 1);
		assert_eq!(layer.extent(), 4096);
		assert!(layer.is_empty());
	}

	#[test]
	fn test_missing_name() {
		let mut writer = PbfWriter::new();
		writer.add_uint32(layer_field::VERSION, 2);
		assert!(matches!(Layer::new(writer.as_bytes()), Err(Error::Format(_))));
	}

	#[test]
	fn test_unsupported_version() {
		let mut writer = PbfWriter::new();
		writer.add_uint32(layer_field::VERSION, 3);
		writer.add_string(layer_field::NAME, "water");
		assert_eq!(Layer::new(writer.as_bytes()).unwrap_err(), Error::Version(3));
	}

	#[test]
	fn test_unknown_field() {
		let mut writer = PbfWriter::new();
		writer.add_string(layer_field::NAME, "water");
		writer.add_uint32(6, 1);
		assert!(matches!(Layer::new(writer.as_bytes()), Err(Error::Format(_))));
	}

	#[test]
	fn test_table_lookup() {
		let mut writer = PbfWriter::new();
		writer.add_string(layer_field::NAME, "water");
		writer.add_string(layer_field::KEYS, "depth");
		writer.add_bytes(layer_field::VALUES, vectile_type::EncodedPropertyValue::uint(12).data());
		let layer = Layer::new(writer.as_bytes()).unwrap();

		assert_eq!(layer.key(Index(0)).unwrap(), "depth");
		assert_eq!(layer.value(Index(0)).unwrap().uint_value().unwrap(), 12);
		assert!(matches!(layer.key(Index(1)), Err(Error::Format(_))));
		assert!(matches!(layer.value(Index(1)), Err(Error::Format(_))));
		assert_eq!(layer.key_table(), &["depth"]);
		assert_eq!(layer.value_table().unwrap().len(), 1);
	}
}
