// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Position of an entry in a layer's key or value table.
///
/// Indexes are handed out in insertion order starting at 0 and stay valid
/// until the layer is serialized.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Index(pub u32);

impl Index {
	pub fn value(&self) -> u32 {
		self.0
	}

	pub fn as_usize(&self) -> usize {
		self.0 as usize
	}
}

impl Display for Index {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl From<u32> for Index {
	fn from(value: u32) -> Self {
		Index(value)
	}
}

impl From<Index> for u32 {
	fn from(index: Index) -> Self {
		index.0
	}
}
