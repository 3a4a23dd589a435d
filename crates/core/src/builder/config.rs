// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// Header fields written for a layer.
///
/// Both values are written as given. Readers only understand versions 1
/// and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
	/// Default: 2
	pub version: u32,

	/// Size of the tile in screen coordinates.
	///
	/// Default: 4096
	pub extent: u32,
}

impl Default for LayerConfig {
	fn default() -> Self {
		Self {
			version: 2,
			extent: 4096,
		}
	}
}

impl LayerConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn version(mut self, version: u32) -> Self {
		self.version = version;
		self
	}

	pub fn extent(mut self, extent: u32) -> Self {
		self.extent = extent;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = LayerConfig::new();
		assert_eq!(config.version, 2);
		assert_eq!(config.extent, 4096);
	}

	#[test]
	fn test_setters() {
		let config = LayerConfig::new().version(1).extent(512);
		assert_eq!(
			config,
			LayerConfig {
				version: 1,
				extent: 512,
			}
		);
	}

	#[test]
	fn test_deserialize_partial() {
		let config: LayerConfig = serde_json::from_str(r#"{"extent": 512}"#).unwrap();
		assert_eq!(config, LayerConfig::new().extent(512));
	}
}
