// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	borrow::Borrow,
	collections::{BTreeMap, HashMap},
	hash::{BuildHasher, Hash},
};

use vectile_type::Index;

/// Backing storage of an index cache.
///
/// Implemented for [`HashMap`] and [`BTreeMap`] keyed by the owned form of
/// the native value, and for two fixed-size slot tables used by the bool and
/// small unsigned integer caches. All implementations must behave the same
/// way: a stored index is returned by every later lookup of an equal key.
pub trait CacheMap<Q: ?Sized> {
	fn lookup(&self, key: &Q) -> Option<Index>;

	fn store(&mut self, key: &Q, index: Index);

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<K, Q, S> CacheMap<Q> for HashMap<K, Index, S>
where
	K: Borrow<Q> + Hash + Eq,
	Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
	S: BuildHasher,
{
	fn lookup(&self, key: &Q) -> Option<Index> {
		self.get(key).copied()
	}

	fn store(&mut self, key: &Q, index: Index) {
		self.insert(key.to_owned(), index);
	}

	fn len(&self) -> usize {
		HashMap::len(self)
	}
}

impl<K, Q> CacheMap<Q> for BTreeMap<K, Index>
where
	K: Borrow<Q> + Ord,
	Q: Ord + ToOwned<Owned = K> + ?Sized,
{
	fn lookup(&self, key: &Q) -> Option<Index> {
		self.get(key).copied()
	}

	fn store(&mut self, key: &Q, index: Index) {
		self.insert(key.to_owned(), index);
	}

	fn len(&self) -> usize {
		BTreeMap::len(self)
	}
}

/// One slot for `false` and one for `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolSlots([Option<Index>; 2]);

impl CacheMap<bool> for BoolSlots {
	fn lookup(&self, key: &bool) -> Option<Index> {
		self.0[*key as usize]
	}

	fn store(&mut self, key: &bool, index: Index) {
		self.0[*key as usize] = Some(index);
	}

	fn len(&self) -> usize {
		self.0.iter().filter(|slot| slot.is_some()).count()
	}
}

/// A dense table indexed directly by the value. Grows to the largest value
/// seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmallUintSlots(Vec<Option<Index>>);

impl CacheMap<u16> for SmallUintSlots {
	fn lookup(&self, key: &u16) -> Option<Index> {
		self.0.get(*key as usize).copied().flatten()
	}

	fn store(&mut self, key: &u16, index: Index) {
		let pos = *key as usize;
		if pos >= self.0.len() {
			self.0.resize(pos + 1, None);
		}
		self.0[pos] = Some(index);
	}

	fn len(&self) -> usize {
		self.0.iter().filter(|slot| slot.is_some()).count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn exercise<M: CacheMap<str> + Default>() {
		let mut map = M::default();
		assert!(map.is_empty());
		assert_eq!(map.lookup("foo"), None);
		map.store("foo", Index(3));
		map.store("bar", Index(1));
		assert_eq!(map.lookup("foo"), Some(Index(3)));
		assert_eq!(map.lookup("bar"), Some(Index(1)));
		assert_eq!(map.len(), 2);
	}

	#[test]
	fn test_hash_map() {
		exercise::<HashMap<String, Index>>();
	}

	#[test]
	fn test_btree_map() {
		exercise::<BTreeMap<String, Index>>();
	}

	#[test]
	fn test_bool_slots() {
		let mut slots = BoolSlots::default();
		slots.store(&true, Index(7));
		assert_eq!(slots.lookup(&true), Some(Index(7)));
		assert_eq!(slots.lookup(&false), None);
		assert_eq!(slots.len(), 1);
	}

	#[test]
	fn test_small_uint_slots() {
		let mut slots = SmallUintSlots::default();
		slots.store(&300, Index(0));
		slots.store(&2, Index(1));
		assert_eq!(slots.lookup(&300), Some(Index(0)));
		assert_eq!(slots.lookup(&2), Some(Index(1)));
		assert_eq!(slots.lookup(&3), None);
		assert_eq!(slots.lookup(&u16::MAX), None);
		assert_eq!(slots.len(), 2);
	}
}
