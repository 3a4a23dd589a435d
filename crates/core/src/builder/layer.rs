// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cell::{Cell, RefCell};

use tracing::{instrument, trace};
use vectile_type::{EncodedPropertyValue, Error, Index, Result, pbf::PbfWriter};

use crate::{
	builder::{GeometryFeatureBuilder, LayerConfig},
	layer_field,
	reader::{Feature, Layer},
	table::LayerTable,
};

/// A layer under construction.
///
/// The layer owns its [`LayerTable`]. Index caches and feature builders
/// borrow the layer and reach the table through it, so many of them can be
/// alive at the same time. The layer is single threaded: build independent
/// layers on different threads and combine them in a [`super::TileBuilder`].
///
/// Once serialized the layer is closed and every operation that would add to
/// it fails with [`Error::InvalidState`].
#[derive(Debug)]
pub struct LayerBuilder {
	name: String,
	config: LayerConfig,
	table: RefCell<LayerTable>,
	features: RefCell<PbfWriter>,
	feature_count: Cell<usize>,
	closed: Cell<bool>,
}

impl LayerBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_config(name, LayerConfig::default())
	}

	pub fn with_config(name: impl Into<String>, config: LayerConfig) -> Self {
		Self {
			name: name.into(),
			config,
			table: RefCell::new(LayerTable::new()),
			features: RefCell::new(PbfWriter::new()),
			feature_count: Cell::new(0),
			closed: Cell::new(false),
		}
	}

	/// Creates an empty layer with the name, version and extent of `layer`.
	pub fn from_layer(layer: &Layer<'_>) -> Self {
		Self::with_config(layer.name(), LayerConfig::new().version(layer.version()).extent(layer.extent()))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn config(&self) -> &LayerConfig {
		&self.config
	}

	pub fn version(&self) -> u32 {
		self.config.version
	}

	pub fn extent(&self) -> u32 {
		self.config.extent
	}

	pub fn is_open(&self) -> bool {
		!self.closed.get()
	}

	fn check_open(&self) -> Result<()> {
		if self.closed.get() {
			return Err(Error::invalid_state(format!("layer '{}' has already been serialized", self.name)));
		}
		Ok(())
	}

	pub(crate) fn with_table<R>(&self, f: impl FnOnce(&mut LayerTable) -> Result<R>) -> Result<R> {
		self.check_open()?;
		let mut table =
			self.table.try_borrow_mut().map_err(|_| Error::invalid_state("layer table is already in use"))?;
		f(&mut table)
	}

	fn read_table<R>(&self, f: impl FnOnce(&LayerTable) -> R) -> Result<R> {
		let table = self.table.try_borrow().map_err(|_| Error::invalid_state("layer table is already in use"))?;
		Ok(f(&table))
	}

	/// Returns the index of `key` in the key table, adding it if new.
	pub fn add_key(&self, key: &str) -> Result<Index> {
		self.with_table(|table| table.add_key(key))
	}

	/// Returns the index of `value` in the value table, adding it if new.
	pub fn add_value(&self, value: impl Into<EncodedPropertyValue>) -> Result<Index> {
		let value = value.into();
		self.with_table(|table| table.add_value(value))
	}

	pub fn key_count(&self) -> Result<usize> {
		self.read_table(LayerTable::key_count)
	}

	pub fn value_count(&self) -> Result<usize> {
		self.read_table(LayerTable::value_count)
	}

	/// The key stored at `index`, or `None` past the end of the key table.
	pub fn key(&self, index: Index) -> Result<Option<String>> {
		self.read_table(|table| table.key(index).map(str::to_string))
	}

	/// The value stored at `index`, or `None` past the end of the value table.
	pub fn value(&self, index: Index) -> Result<Option<EncodedPropertyValue>> {
		self.read_table(|table| table.value(index).cloned())
	}

	pub(crate) fn check_key(&self, index: Index) -> Result<Index> {
		self.read_table(|table| table.check_key(index))?
	}

	pub(crate) fn check_value(&self, index: Index) -> Result<Index> {
		self.read_table(|table| table.check_value(index))?
	}

	/// Number of committed features.
	pub fn feature_count(&self) -> usize {
		self.feature_count.get()
	}

	pub(crate) fn push_feature(&self, write: impl FnOnce(&mut PbfWriter)) -> Result<()> {
		self.check_open()?;
		let mut features =
			self.features.try_borrow_mut().map_err(|_| Error::invalid_state("layer features are already in use"))?;
		features.add_message(layer_field::FEATURES, write);
		self.feature_count.set(self.feature_count.get() + 1);
		Ok(())
	}

	/// Copies a feature read from another tile into this layer. Its keys and
	/// values are added to this layer's tables.
	pub fn add_feature(&self, feature: &Feature<'_>) -> Result<()> {
		let mut builder = GeometryFeatureBuilder::new(self)?;
		if let Some(id) = feature.id() {
			builder.set_id(id)?;
		}
		builder.set_geometry(&feature.geometry())?;
		for property in feature.properties() {
			let property = property?;
			builder.add_property(property.key, property.value.to_encoded())?;
		}
		builder.commit()
	}

	/// Closes the layer and returns the encoded `Layer` message.
	///
	/// Fields are written as version, name, extent, features, keys and
	/// values.
	#[instrument(name = "builder::layer::serialize", level = "trace", skip(self), fields(layer = %self.name))]
	pub fn serialize(&self) -> Result<Vec<u8>> {
		self.check_open()?;
		let mut table =
			self.table.try_borrow_mut().map_err(|_| Error::invalid_state("layer table is already in use"))?;
		let features = self.features.replace(PbfWriter::new()).into_bytes();

		let mut writer = PbfWriter::with_capacity(features.len() + 64);
		writer.add_uint32(layer_field::VERSION, self.config.version);
		writer.add_string(layer_field::NAME, &self.name);
		writer.add_uint32(layer_field::EXTENT, self.config.extent);
		writer.append(&features);
		table.write(&mut writer);

		table.close();
		self.closed.set(true);

		trace!(
			"serialized layer with {} features, {} keys and {} values into {} bytes",
			self.feature_count.get(),
			table.key_count(),
			table.value_count(),
			writer.len()
		);
		Ok(writer.into_bytes())
	}
}
