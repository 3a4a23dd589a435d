// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// An `f32` usable as a map key.
///
/// Equality and hashing are defined over the bit pattern, so `0.0` and
/// `-0.0` are different keys (they encode to different bytes) and a NaN is
/// equal to a NaN with the same payload.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Serialize, Deserialize)]
pub struct OrderedF32(pub f32);

impl OrderedF32 {
	pub fn value(&self) -> f32 {
		self.0
	}

	fn key(&self) -> u32 {
		let bits = self.0.to_bits();
		bits ^ (((bits as i32 >> 31) as u32) | 0x8000_0000)
	}
}

impl PartialEq for OrderedF32 {
	fn eq(&self, other: &Self) -> bool {
		self.0.to_bits() == other.0.to_bits()
	}
}

impl Eq for OrderedF32 {}

impl PartialOrd for OrderedF32 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OrderedF32 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.key().cmp(&other.key())
	}
}

impl Hash for OrderedF32 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

impl fmt::Debug for OrderedF32 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl fmt::Display for OrderedF32 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl From<f32> for OrderedF32 {
	fn from(v: f32) -> Self {
		OrderedF32(v)
	}
}

impl From<OrderedF32> for f32 {
	fn from(v: OrderedF32) -> Self {
		v.0
	}
}
