// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::marker::PhantomData;

use tracing::trace;
use vectile_type::{EncodeAs, EncodedPropertyValue, Error, Index, PropertyKind, Result};

use crate::{builder::LayerBuilder, index::CacheMap, table::LayerTable};

/// How a native value is added to the layer table on a cache miss.
pub trait Slot<Q: ?Sized> {
	const NAME: &'static str;

	fn add(table: &mut LayerTable, native: &Q) -> Result<Index>;
}

/// Adds strings to the key table.
#[derive(Debug)]
pub struct KeySlot;

impl Slot<str> for KeySlot {
	const NAME: &'static str = "key";

	fn add(table: &mut LayerTable, native: &str) -> Result<Index> {
		table.add_key(native)
	}
}

/// Adds already encoded values to the value table.
#[derive(Debug)]
pub struct EncodedSlot;

impl Slot<EncodedPropertyValue> for EncodedSlot {
	const NAME: &'static str = "value";

	fn add(table: &mut LayerTable, native: &EncodedPropertyValue) -> Result<Index> {
		table.add_value(native.clone())
	}
}

/// Encodes a native value under the tag of `K`, then adds it to the value
/// table.
#[derive(Debug)]
pub struct ValueSlot<K>(PhantomData<K>);

impl<K, Q> Slot<Q> for ValueSlot<K>
where
	K: PropertyKind,
	Q: EncodeAs<K> + ?Sized,
{
	const NAME: &'static str = "value";

	fn add(table: &mut LayerTable, native: &Q) -> Result<Index> {
		let encoded = native.encode_as()?;
		table.add_value(encoded)
	}
}

/// Remembers the index returned for each native value it has seen, in front
/// of the table of one layer.
///
/// A hit returns the remembered index without touching the table. A miss
/// goes through the table's own add-or-find, so several caches over the same
/// layer always agree even if each has seen a different subset of values.
///
/// `M` picks the backing map. Hashed and ordered maps give the same indexes
/// for the same calls.
pub struct IndexCache<'a, Q: ?Sized, S, M> {
	layer: &'a LayerBuilder,
	map: M,
	_marker: PhantomData<(fn(&Q), S)>,
}

impl<'a, Q, S, M> IndexCache<'a, Q, S, M>
where
	Q: ?Sized,
	S: Slot<Q>,
	M: CacheMap<Q>,
{
	/// Fails with [`Error::InvalidState`] if `layer` was already serialized.
	pub fn new(layer: &'a LayerBuilder) -> Result<Self>
	where
		M: Default,
	{
		Self::with_map(layer, M::default())
	}

	pub fn with_map(layer: &'a LayerBuilder, map: M) -> Result<Self> {
		if !layer.is_open() {
			return Err(Error::invalid_state("cannot create an index cache for a serialized layer"));
		}
		Ok(Self {
			layer,
			map,
			_marker: PhantomData,
		})
	}

	/// Returns the index of `native`, adding it to the layer table if this
	/// cache has not seen it yet.
	pub fn index(&mut self, native: &Q) -> Result<Index> {
		if !self.layer.is_open() {
			return Err(Error::invalid_state("layer has already been serialized"));
		}
		if let Some(index) = self.map.lookup(native) {
			return Ok(index);
		}
		let index = self.layer.with_table(|table| S::add(table, native))?;
		self.map.store(native, index);
		trace!("{} cache miss on layer '{}' resolved to index {}", S::NAME, self.layer.name(), index);
		Ok(index)
	}

	pub fn layer(&self) -> &'a LayerBuilder {
		self.layer
	}

	/// Number of distinct values this cache has seen.
	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}
