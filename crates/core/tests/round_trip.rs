// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use vectile_core::{
	DecodeConfig, Error, GeomType, Index, KeyIndex, LayerBuilder, LayerConfig, Point, PointFeatureBuilder,
	PolygonFeatureBuilder, PropertyValue, PropertyValueType, RingType, SIntValue, TileBuilder, ValueIndex,
	VectorTile,
	geometry::{DecodedGeometry, GeometryCollector},
};

fn build_tile() -> Vec<u8> {
	let points = LayerBuilder::new("points");
	let mut keys: KeyIndex = KeyIndex::new(&points).unwrap();
	let mut values: ValueIndex<SIntValue, i64> = ValueIndex::new(&points).unwrap();

	// table entries added directly
	let mut feature = PointFeatureBuilder::new(&points).unwrap();
	feature.set_id(7).unwrap();
	feature.add_point((10, 20)).unwrap();
	feature.add_property("some_key", PropertyValue::SInt(12)).unwrap();
	feature.commit().unwrap();

	// the same entries through the caches
	let mut feature = PointFeatureBuilder::new(&points).unwrap();
	feature.set_id(17).unwrap();
	feature.add_point((11, 21)).unwrap();
	feature.add_property(keys.index("some_key").unwrap(), values.index(&12).unwrap()).unwrap();
	feature.add_property(keys.index("other").unwrap(), values.index(&-1).unwrap()).unwrap();
	feature.commit().unwrap();

	let areas = LayerBuilder::with_config("areas", LayerConfig::new().extent(512));
	let mut feature = PolygonFeatureBuilder::new(&areas).unwrap();
	feature.add_ring([(1, 1), (10, 1), (10, 10), (1, 10), (1, 1)]).unwrap();
	feature.add_property("kind", "park").unwrap();
	feature.commit().unwrap();

	let empty = LayerBuilder::new("empty");

	let mut tile = TileBuilder::new();
	tile.add_layer(&points).unwrap();
	tile.add_layer(&areas).unwrap();
	tile.add_layer(&empty).unwrap();
	tile.serialize()
}

#[test]
fn test_round_trip() {
	let data = build_tile();
	let tile = VectorTile::new(&data);
	assert_eq!(tile.count_layers().unwrap(), 2);

	let points = tile.layer_by_name("points").unwrap().unwrap();
	assert_eq!(points.version(), 2);
	assert_eq!(points.extent(), 4096);
	assert_eq!(points.feature_count(), 2);
	assert_eq!(points.key_table(), &["some_key", "other"]);
	assert_eq!(points.value_table().unwrap().len(), 2);

	let first = points.feature(0).unwrap().unwrap();
	let second = points.feature(1).unwrap().unwrap();
	assert_eq!(first.id(), Some(7));
	assert_eq!(second.id(), Some(17));
	assert_eq!(first.geometry_type(), GeomType::Point);

	let property = first.properties().next().unwrap().unwrap();
	assert_eq!(property.key, "some_key");
	assert_eq!(property.value.value_type(), PropertyValueType::SInt);
	assert_eq!(property.value.sint_value().unwrap(), 12);

	// both features point at the same table entries
	let first_indexes: Vec<(Index, Index)> = first.property_indexes().map(Result::unwrap).collect();
	let second_indexes: Vec<(Index, Index)> = second.property_indexes().map(Result::unwrap).collect();
	assert_eq!(first_indexes, vec![(Index(0), Index(0))]);
	assert_eq!(second_indexes, vec![(Index(0), Index(0)), (Index(1), Index(1))]);

	let mut collector = GeometryCollector::new();
	first.decode_geometry(&DecodeConfig::new(), &mut collector).unwrap();
	assert_eq!(collector.finish(GeomType::Point), DecodedGeometry::Points(vec![Point::new(10, 20)]));

	let areas = tile.layer(1).unwrap().unwrap();
	assert_eq!(areas.name(), "areas");
	assert_eq!(areas.extent(), 512);
	let park = areas.feature(0).unwrap().unwrap();
	assert!(!park.has_id());
	assert_eq!(park.properties().next().unwrap().unwrap().value.string_value().unwrap(), "park");

	let mut collector = GeometryCollector::new();
	park.decode_geometry(&DecodeConfig::new(), &mut collector).unwrap();
	let DecodedGeometry::Rings(rings) = collector.finish(GeomType::Polygon) else {
		panic!("expected rings");
	};
	assert_eq!(rings.len(), 1);
	assert_eq!(rings[0].0, RingType::Outer);
	assert_eq!(rings[0].1[0], Point::new(1, 1));
}

#[test]
fn test_copy_features_between_tiles() {
	let data = build_tile();
	let tile = VectorTile::new(&data);
	let points = tile.layer_by_name("points").unwrap().unwrap();
	let areas = tile.layer_by_name("areas").unwrap().unwrap();

	let copy = LayerBuilder::from_layer(&points);
	copy.add_key("first").unwrap();
	for feature in points.features() {
		copy.add_feature(&feature.unwrap()).unwrap();
	}
	assert_eq!(copy.feature_count(), 2);
	assert_eq!(copy.key(Index(1)).unwrap(), Some("some_key".to_string()));

	let mut builder = TileBuilder::new();
	builder.add_layer(&copy).unwrap();
	builder.add_existing(&areas);
	let data = builder.serialize();

	let tile = VectorTile::new(&data);
	let copied = tile.layer(0).unwrap().unwrap();
	assert_eq!(copied.key_table(), &["first", "some_key", "other"]);
	let second = copied.feature(1).unwrap().unwrap();
	assert_eq!(second.id(), Some(17));
	let indexes: Vec<(Index, Index)> = second.property_indexes().map(Result::unwrap).collect();
	assert_eq!(indexes, vec![(Index(1), Index(0)), (Index(2), Index(1))]);
	assert_eq!(tile.layer(1).unwrap().unwrap().data(), areas.data());
}

#[test]
fn test_layer_closed_after_serialize() {
	let layer = LayerBuilder::new("points");
	let mut keys: KeyIndex = KeyIndex::new(&layer).unwrap();
	keys.index("a").unwrap();
	layer.serialize().unwrap();

	assert!(matches!(keys.index("a"), Err(Error::InvalidState { .. })));
	let cache: vectile_core::Result<KeyIndex> = KeyIndex::new(&layer);
	assert!(matches!(cache, Err(Error::InvalidState { .. })));
	assert!(matches!(PointFeatureBuilder::new(&layer), Err(Error::InvalidState { .. })));
}

#[test]
fn test_polygon_at_coordinate_limits() {
	let x = i32::MAX;
	let layer = LayerBuilder::new("limits");
	let mut feature = PolygonFeatureBuilder::new(&layer).unwrap();
	feature.add_ring([(x, -x), (x, x), (-x, x), (-x, -x), (x, -x)]).unwrap();
	feature.commit().unwrap();

	let mut tile = TileBuilder::new();
	tile.add_layer(&layer).unwrap();
	let data = tile.serialize();

	let tile = VectorTile::new(&data);
	let layer = tile.layer(0).unwrap().unwrap();
	let feature = layer.feature(0).unwrap().unwrap();
	let mut collector = GeometryCollector::new();
	feature.decode_geometry(&DecodeConfig::new(), &mut collector).unwrap();
	let DecodedGeometry::Rings(rings) = collector.finish(GeomType::Polygon) else {
		panic!("expected rings");
	};
	assert_eq!(rings, vec![(RingType::Outer, vec![
		Point::new(x, -x),
		Point::new(x, x),
		Point::new(-x, x),
		Point::new(-x, -x),
		Point::new(x, -x),
	])]);
}
