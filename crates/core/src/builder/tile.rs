// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::borrow::Cow;

use tracing::{debug, instrument, warn};
use vectile_type::{Result, pbf::PbfWriter};

use crate::{builder::LayerBuilder, reader::Layer, tile_field};

/// Collects encoded layers and writes them out as one tile.
#[derive(Debug, Default)]
pub struct TileBuilder<'a> {
	layers: Vec<Cow<'a, [u8]>>,
}

impl<'a> TileBuilder<'a> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Serializes and closes `layer`. A layer without features is closed but
	/// left out of the tile.
	pub fn add_layer(&mut self, layer: &LayerBuilder) -> Result<()> {
		let data = layer.serialize()?;
		if layer.feature_count() == 0 {
			warn!("skipping layer '{}' without features", layer.name());
			return Ok(());
		}
		self.layers.push(Cow::Owned(data));
		Ok(())
	}

	/// Adds the encoded bytes of a layer, e.g. [`Layer::data`] of a layer
	/// read from another tile. The bytes are borrowed until serialization.
	pub fn add_existing_layer(&mut self, data: &'a [u8]) {
		self.layers.push(Cow::Borrowed(data));
	}

	pub fn add_existing(&mut self, layer: &Layer<'a>) {
		self.add_existing_layer(layer.data());
	}

	pub fn layer_count(&self) -> usize {
		self.layers.len()
	}

	#[instrument(name = "builder::tile::serialize", level = "trace", skip(self))]
	pub fn serialize(&self) -> Vec<u8> {
		let size: usize = self.layers.iter().map(|layer| layer.len() + 8).sum();
		let mut writer = PbfWriter::with_capacity(size);
		for layer in &self.layers {
			writer.add_bytes(tile_field::LAYERS, layer);
		}
		debug!("serialized tile with {} layers into {} bytes", self.layers.len(), writer.len());
		writer.into_bytes()
	}
}
