// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod config;
mod feature;
mod layer;
mod tile;

pub use config::LayerConfig;
pub use feature::{
	FeatureBuilder, GeometryFeatureBuilder, IntoKeyIndex, IntoValueIndex, LineStringFeatureBuilder,
	PointFeatureBuilder, PolygonFeatureBuilder,
};
pub use layer::LayerBuilder;
pub use tile::TileBuilder;
