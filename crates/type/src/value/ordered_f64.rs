// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// An `f64` usable as a map key. See [`super::OrderedF32`] for the
/// equality rules.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Serialize, Deserialize)]
pub struct OrderedF64(pub f64);

impl OrderedF64 {
	pub fn value(&self) -> f64 {
		self.0
	}

	fn key(&self) -> u64 {
		let bits = self.0.to_bits();
		bits ^ (((bits as i64 >> 63) as u64) | 0x8000_0000_0000_0000)
	}
}

impl PartialEq for OrderedF64 {
	fn eq(&self, other: &Self) -> bool {
		self.0.to_bits() == other.0.to_bits()
	}
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OrderedF64 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.key().cmp(&other.key())
	}
}

impl Hash for OrderedF64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

impl fmt::Debug for OrderedF64 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl fmt::Display for OrderedF64 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl From<f64> for OrderedF64 {
	fn from(v: f64) -> Self {
		OrderedF64(v)
	}
}

impl From<OrderedF64> for f64 {
	fn from(v: OrderedF64) -> Self {
		v.0
	}
}
