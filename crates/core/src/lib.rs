// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Mapbox Vector Tile encoding and decoding.
//!
//! A [`LayerBuilder`] owns the deduplicated key and value tables of one
//! layer. Features reference table entries by [`Index`]; the index caches in
//! [`index`] sit in front of the tables for values that repeat across many
//! features. [`TileBuilder`] combines layers into a tile and
//! [`VectorTile`] reads one back without copying.

pub mod builder;
mod field;
pub mod geometry;
pub mod index;
pub mod reader;
pub mod table;

pub use builder::{
	FeatureBuilder, GeometryFeatureBuilder, LayerBuilder, LayerConfig, LineStringFeatureBuilder, PointFeatureBuilder,
	PolygonFeatureBuilder, TileBuilder,
};
pub(crate) use field::{feature_field, layer_field, tile_field};
pub use geometry::{DecodeConfig, Geometry, Point, RingType};
pub use index::{
	BoolValueIndex, IndexCache, KeyIndex, OrderedKeyIndex, OrderedStringValueIndex, OrderedValueIndex,
	OrderedValueIndexInternal, SmallUintValueIndex, StringValueIndex, ValueIndex, ValueIndexInternal,
};
pub use reader::{Feature, Layer, Property, PropertyValueView, VectorTile};
pub use table::LayerTable;
pub use vectile_type::{
	EncodedPropertyValue, Error, GeomType, Index, OrderedF32, OrderedF64, PropertyValue, PropertyValueType,
	Result,
	value::{BoolValue, DoubleValue, FloatValue, IntValue, SIntValue, StringValue, UIntValue},
};
