// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Index caches in front of a layer's key and value tables.
//!
//! Every cache type here is an [`IndexCache`] with a fixed native value
//! type, a [`Slot`] deciding how a miss reaches the table, and a backing
//! [`CacheMap`]. The aliases default to hashed storage; the `Ordered*`
//! variants use a `BTreeMap` and hand out the same indexes.

mod cache;
mod map;

use std::collections::{BTreeMap, HashMap};

pub use cache::{EncodedSlot, IndexCache, KeySlot, Slot, ValueSlot};
pub use map::{BoolSlots, CacheMap, SmallUintSlots};
use vectile_type::{
	EncodedPropertyValue, Index,
	value::{BoolValue, StringValue, UIntValue},
};

/// Key strings.
pub type KeyIndex<'a, M = HashMap<String, Index>> = IndexCache<'a, str, KeySlot, M>;
pub type OrderedKeyIndex<'a> = KeyIndex<'a, BTreeMap<String, Index>>;

/// Values the caller already encoded, of any tag.
pub type ValueIndexInternal<'a, M = HashMap<EncodedPropertyValue, Index>> =
	IndexCache<'a, EncodedPropertyValue, EncodedSlot, M>;
pub type OrderedValueIndexInternal<'a> = ValueIndexInternal<'a, BTreeMap<EncodedPropertyValue, Index>>;

/// Native values of type `T`, encoded under the tag of `K`.
///
/// ```ignore
/// let mut population: ValueIndex<UIntValue, u64> = ValueIndex::new(&layer)?;
/// let mut elevation: ValueIndex<DoubleValue, OrderedF64> = ValueIndex::new(&layer)?;
/// ```
pub type ValueIndex<'a, K, T, M = HashMap<T, Index>> = IndexCache<'a, T, ValueSlot<K>, M>;
pub type OrderedValueIndex<'a, K, T> = ValueIndex<'a, K, T, BTreeMap<T, Index>>;

/// String values. Looked up by `&str`.
pub type StringValueIndex<'a, M = HashMap<String, Index>> = IndexCache<'a, str, ValueSlot<StringValue>, M>;
pub type OrderedStringValueIndex<'a> = StringValueIndex<'a, BTreeMap<String, Index>>;

/// Booleans. The value table grows by at most two entries through it.
pub type BoolValueIndex<'a> = IndexCache<'a, bool, ValueSlot<BoolValue>, BoolSlots>;

/// Small unsigned integers encoded as `uint`, kept in a dense table.
pub type SmallUintValueIndex<'a> = IndexCache<'a, u16, ValueSlot<UIntValue>, SmallUintSlots>;

#[cfg(test)]
mod tests {
	use vectile_type::{
		Error, OrderedF64, PropertyValue,
		value::{DoubleValue, IntValue, SIntValue},
	};

	use super::*;
	use crate::builder::LayerBuilder;

	#[test]
	fn test_key_index_sequential() {
		let layer = LayerBuilder::new("test");
		let mut keys: KeyIndex = KeyIndex::new(&layer).unwrap();
		for i in 0..100u32 {
			assert_eq!(keys.index(&i.to_string()).unwrap(), Index(i));
		}
		for i in (0..100u32).step_by(2) {
			assert_eq!(keys.index(&i.to_string()).unwrap(), Index(i));
		}
		assert_eq!(layer.key_count().unwrap(), 100);
		assert_eq!(keys.len(), 100);
	}

	#[test]
	fn test_hit_does_not_touch_table() {
		let layer = LayerBuilder::new("test");
		let mut keys: KeyIndex = KeyIndex::new(&layer).unwrap();
		assert_eq!(keys.index("foo").unwrap(), Index(0));
		assert_eq!(layer.key_count().unwrap(), 1);
		assert_eq!(keys.index("foo").unwrap(), Index(0));
		assert_eq!(layer.key_count().unwrap(), 1);
	}

	#[test]
	fn test_cross_cache_consistency() {
		let layer = LayerBuilder::new("test");
		let mut a: KeyIndex = KeyIndex::new(&layer).unwrap();
		let mut b = OrderedKeyIndex::new(&layer).unwrap();

		assert_eq!(layer.add_key("direct").unwrap(), Index(0));
		assert_eq!(a.index("foo").unwrap(), Index(1));
		assert_eq!(b.index("foo").unwrap(), Index(1));
		assert_eq!(b.index("direct").unwrap(), Index(0));
		assert_eq!(a.index("bar").unwrap(), Index(2));
		assert_eq!(layer.key_count().unwrap(), 3);
	}

	#[test]
	fn test_tags_are_distinct() {
		let layer = LayerBuilder::new("test");
		let mut ints: ValueIndex<IntValue, i64> = ValueIndex::new(&layer).unwrap();
		let mut sints: ValueIndex<SIntValue, i64> = ValueIndex::new(&layer).unwrap();
		let mut strings: StringValueIndex = StringValueIndex::new(&layer).unwrap();
		let mut doubles: ValueIndex<DoubleValue, OrderedF64> = ValueIndex::new(&layer).unwrap();

		let indexes = [
			ints.index(&6).unwrap(),
			sints.index(&6).unwrap(),
			strings.index("6").unwrap(),
			doubles.index(&OrderedF64(6.0)).unwrap(),
		];
		assert_eq!(indexes, [Index(0), Index(1), Index(2), Index(3)]);
		assert_eq!(sints.index(&6).unwrap(), Index(1));
		assert_eq!(layer.value_count().unwrap(), 4);
	}

	#[test]
	fn test_internal_index_mixed_tags() {
		let layer = LayerBuilder::new("test");
		let mut values: ValueIndexInternal = ValueIndexInternal::new(&layer).unwrap();
		let a = values.index(&EncodedPropertyValue::int(6)).unwrap();
		let b = values.index(&EncodedPropertyValue::uint(6)).unwrap();
		let c = values.index(&EncodedPropertyValue::int(6)).unwrap();
		assert_ne!(a, b);
		assert_eq!(a, c);
	}

	#[test]
	fn test_typed_and_internal_share_table() {
		let layer = LayerBuilder::new("test");
		let mut typed: ValueIndex<SIntValue, i64> = ValueIndex::new(&layer).unwrap();
		let mut internal = OrderedValueIndexInternal::new(&layer).unwrap();
		assert_eq!(typed.index(&-12).unwrap(), Index(0));
		assert_eq!(internal.index(&EncodedPropertyValue::sint(-12)).unwrap(), Index(0));
		assert_eq!(layer.value_count().unwrap(), 1);
	}

	#[test]
	fn test_bool_index_bounded() {
		let layer = LayerBuilder::new("test");
		let mut bools = BoolValueIndex::new(&layer).unwrap();
		let first = bools.index(&true).unwrap();
		let second = bools.index(&false).unwrap();
		let third = bools.index(&true).unwrap();
		assert_ne!(first, second);
		assert_eq!(first, third);
		assert_eq!(layer.value_count().unwrap(), 2);
	}

	#[test]
	fn test_small_uint_index() {
		let layer = LayerBuilder::new("test");
		let mut small = SmallUintValueIndex::new(&layer).unwrap();
		let mut wide: ValueIndex<UIntValue, u64> = ValueIndex::new(&layer).unwrap();
		assert_eq!(small.index(&17).unwrap(), Index(0));
		assert_eq!(small.index(&3).unwrap(), Index(1));
		assert_eq!(small.index(&17).unwrap(), Index(0));
		assert_eq!(wide.index(&3).unwrap(), Index(1));
	}

	#[test]
	fn test_range_error_leaves_table_unchanged() {
		let layer = LayerBuilder::new("test");
		let mut uints: ValueIndex<UIntValue, i64> = ValueIndex::new(&layer).unwrap();
		assert!(matches!(uints.index(&-1), Err(Error::EncodingRange { .. })));
		assert_eq!(layer.value_count().unwrap(), 0);
		assert!(uints.is_empty());
		assert_eq!(uints.index(&1).unwrap(), Index(0));
	}

	#[test]
	fn test_property_value_type_mismatch() {
		let layer = LayerBuilder::new("test");
		let mut sints: ValueIndex<SIntValue, PropertyValue> = ValueIndex::new(&layer).unwrap();
		assert!(matches!(sints.index(&PropertyValue::from("x")), Err(Error::TypeMismatch { .. })));
		assert_eq!(sints.index(&PropertyValue::SInt(4)).unwrap(), Index(0));
		assert_eq!(layer.value_count().unwrap(), 1);
	}

	#[test]
	fn test_closed_layer() {
		let layer = LayerBuilder::new("test");
		let mut keys: KeyIndex = KeyIndex::new(&layer).unwrap();
		keys.index("foo").unwrap();
		layer.serialize().unwrap();

		assert!(matches!(keys.index("foo"), Err(Error::InvalidState { .. })));
		assert!(matches!(keys.index("bar"), Err(Error::InvalidState { .. })));
		assert!(matches!(OrderedKeyIndex::new(&layer), Err(Error::InvalidState { .. })));
	}
}
