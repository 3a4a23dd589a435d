// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Zero-copy reading of encoded tiles.
//!
//! Everything here borrows from the tile bytes. Keys and string values are
//! `&str` slices into the tile bytes.

mod feature;
mod layer;
mod value;

pub use feature::{Feature, Properties, PropertyIndexes};
pub use layer::Layer;
pub use value::{Property, PropertyValueView};
use vectile_type::{Result, pbf::PbfReader};

use crate::tile_field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorTile<'a> {
	data: &'a [u8],
}

impl<'a> VectorTile<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self {
			data,
		}
	}

	pub fn data(&self) -> &'a [u8] {
		self.data
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Layers in tile order. Iteration stops after the first error.
	pub fn layers(&self) -> Layers<'a> {
		Layers {
			reader: PbfReader::new(self.data),
			done: false,
		}
	}

	/// Counts the layers without decoding them.
	pub fn count_layers(&self) -> Result<usize> {
		let mut reader = PbfReader::new(self.data);
		let mut count = 0;
		while reader.next_field(tile_field::LAYERS)? {
			reader.skip()?;
			count += 1;
		}
		Ok(count)
	}

	pub fn layer(&self, n: usize) -> Result<Option<Layer<'a>>> {
		self.layers().nth(n).transpose()
	}

	pub fn layer_by_name(&self, name: &str) -> Result<Option<Layer<'a>>> {
		for layer in self.layers() {
			let layer = layer?;
			if layer.name() == name {
				return Ok(Some(layer));
			}
		}
		Ok(None)
	}
}

pub struct Layers<'a> {
	reader: PbfReader<'a>,
	done: bool,
}

impl<'a> Layers<'a> {
	fn next_layer(&mut self) -> Result<Option<Layer<'a>>> {
		if !self.reader.next_field(tile_field::LAYERS)? {
			return Ok(None);
		}
		let data = self.reader.get_view()?;
		Layer::new(data).map(Some)
	}
}

impl<'a> Iterator for Layers<'a> {
	type Item = Result<Layer<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		let next = self.next_layer().transpose();
		if !matches!(next, Some(Ok(_))) {
			self.done = true;
		}
		next
	}
}
