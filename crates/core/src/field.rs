// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Protobuf field numbers of the vector tile messages.

pub mod tile_field {
	pub const LAYERS: u32 = 3;
}

pub mod layer_field {
	pub const NAME: u32 = 1;
	pub const FEATURES: u32 = 2;
	pub const KEYS: u32 = 3;
	pub const VALUES: u32 = 4;
	pub const EXTENT: u32 = 5;
	pub const VERSION: u32 = 15;
}

pub mod feature_field {
	pub const ID: u32 = 1;
	pub const TAGS: u32 = 2;
	pub const TYPE: u32 = 3;
	pub const GEOMETRY: u32 = 4;
}
