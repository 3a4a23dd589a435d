// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The per-layer key and value tables.
//!
//! [`LayerTable`] is the source of truth for uniqueness. Index caches in
//! [`crate::index`] only remember what they have seen themselves, so every
//! miss ends up here and is deduplicated again against the full table.

use indexmap::IndexSet;
use tracing::trace;
use vectile_type::{EncodedPropertyValue, Error, Index, Result, pbf::PbfWriter};

use crate::layer_field;

#[derive(Debug, Default)]
pub struct LayerTable {
	keys: IndexSet<String>,
	values: IndexSet<EncodedPropertyValue>,
	closed: bool,
}

impl LayerTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_open(&self) -> bool {
		!self.closed
	}

	/// Marks the table as closed. Every later insertion fails.
	pub fn close(&mut self) {
		self.closed = true;
	}

	fn check_open(&self) -> Result<()> {
		if self.closed {
			return Err(Error::invalid_state("layer has already been serialized"));
		}
		Ok(())
	}

	/// Returns the index of `key`, appending it if it is new.
	pub fn add_key(&mut self, key: &str) -> Result<Index> {
		self.check_open()?;
		if let Some(pos) = self.keys.get_index_of(key) {
			return Ok(Index(pos as u32));
		}
		let index = next_index("key index", self.keys.len())?;
		self.keys.insert(key.to_string());
		trace!("key {:?} added at index {}", key, index);
		Ok(index)
	}

	/// Returns the index of `value`, appending it if it is new.
	pub fn add_value(&mut self, value: EncodedPropertyValue) -> Result<Index> {
		self.check_open()?;
		if let Some(pos) = self.values.get_index_of(&value) {
			return Ok(Index(pos as u32));
		}
		let index = next_index("value index", self.values.len())?;
		trace!("{} value added at index {}", value.tag(), index);
		self.values.insert(value);
		Ok(index)
	}

	pub fn key(&self, index: Index) -> Option<&str> {
		self.keys.get_index(index.as_usize()).map(String::as_str)
	}

	pub fn value(&self, index: Index) -> Option<&EncodedPropertyValue> {
		self.values.get_index(index.as_usize())
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.keys.iter().map(String::as_str)
	}

	pub fn values(&self) -> impl Iterator<Item = &EncodedPropertyValue> {
		self.values.iter()
	}

	pub fn key_count(&self) -> usize {
		self.keys.len()
	}

	pub fn value_count(&self) -> usize {
		self.values.len()
	}

	/// Fails with [`Error::UnknownIndex`] unless `index` was issued by
	/// [`LayerTable::add_key`].
	pub fn check_key(&self, index: Index) -> Result<Index> {
		check_index("key", index, self.keys.len())
	}

	/// Fails with [`Error::UnknownIndex`] unless `index` was issued by
	/// [`LayerTable::add_value`].
	pub fn check_value(&self, index: Index) -> Result<Index> {
		check_index("value", index, self.values.len())
	}

	/// Writes the key table followed by the value table, both in insertion
	/// order.
	pub fn write(&self, writer: &mut PbfWriter) {
		for key in &self.keys {
			writer.add_string(layer_field::KEYS, key);
		}
		for value in &self.values {
			writer.add_bytes(layer_field::VALUES, value.data());
		}
	}
}

fn next_index(target: &'static str, len: usize) -> Result<Index> {
	u32::try_from(len).map(Index).map_err(|_| Error::out_of_range(target, len))
}

fn check_index(table: &'static str, index: Index, len: usize) -> Result<Index> {
	if index.as_usize() < len {
		Ok(index)
	} else {
		Err(Error::UnknownIndex {
			table,
			index: index.value(),
			len,
		})
	}
}
