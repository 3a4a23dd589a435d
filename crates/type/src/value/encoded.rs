// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Debug, Formatter};

use crate::{
	pbf::PbfWriter,
	value::{PropertyValue, PropertyValueType},
};

/// A property value serialized as a protobuf `Value` message, together with
/// its tag.
///
/// Equality, ordering and hashing look at `(tag, bytes)` only. Two values
/// with the same number but different tags never compare equal, because the
/// wire bytes differ.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedPropertyValue {
	tag: PropertyValueType,
	data: Vec<u8>,
}

impl EncodedPropertyValue {
	fn with(tag: PropertyValueType, write: impl FnOnce(&mut PbfWriter, u32)) -> Self {
		let mut writer = PbfWriter::with_capacity(16);
		write(&mut writer, tag.field());
		Self {
			tag,
			data: writer.into_bytes(),
		}
	}

	pub fn string(value: &str) -> Self {
		Self::with(PropertyValueType::String, |w, field| w.add_string(field, value))
	}

	pub fn float(value: f32) -> Self {
		Self::with(PropertyValueType::Float, |w, field| w.add_float(field, value))
	}

	pub fn double(value: f64) -> Self {
		Self::with(PropertyValueType::Double, |w, field| w.add_double(field, value))
	}

	pub fn int(value: i64) -> Self {
		Self::with(PropertyValueType::Int, |w, field| w.add_int64(field, value))
	}

	pub fn uint(value: u64) -> Self {
		Self::with(PropertyValueType::UInt, |w, field| w.add_uint64(field, value))
	}

	pub fn sint(value: i64) -> Self {
		Self::with(PropertyValueType::SInt, |w, field| w.add_sint64(field, value))
	}

	pub fn bool(value: bool) -> Self {
		Self::with(PropertyValueType::Bool, |w, field| w.add_bool(field, value))
	}

	pub fn encode(value: &PropertyValue) -> Self {
		match value {
			PropertyValue::String(v) => Self::string(v),
			PropertyValue::Float(v) => Self::float(v.value()),
			PropertyValue::Double(v) => Self::double(v.value()),
			PropertyValue::Int(v) => Self::int(*v),
			PropertyValue::UInt(v) => Self::uint(*v),
			PropertyValue::SInt(v) => Self::sint(*v),
			PropertyValue::Bool(v) => Self::bool(*v),
		}
	}

	/// Wraps bytes that already hold a serialized `Value` message, e.g. a
	/// value table entry read from another tile.
	pub fn from_encoded(tag: PropertyValueType, data: &[u8]) -> Self {
		Self {
			tag,
			data: data.to_vec(),
		}
	}

	pub fn tag(&self) -> PropertyValueType {
		self.tag
	}

	pub fn data(&self) -> &[u8] {
		&self.data
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
}

impl Debug for EncodedPropertyValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EncodedPropertyValue").field("tag", &self.tag).field("data", &self.data).finish()
	}
}

impl From<&PropertyValue> for EncodedPropertyValue {
	fn from(value: &PropertyValue) -> Self {
		Self::encode(value)
	}
}

impl From<PropertyValue> for EncodedPropertyValue {
	fn from(value: PropertyValue) -> Self {
		Self::encode(&value)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::{BTreeSet, HashSet};

	use super::*;

	#[test]
	fn test_wire_bytes() {
		assert_eq!(EncodedPropertyValue::string("6").data(), &[0x0a, 0x01, b'6']);
		assert_eq!(EncodedPropertyValue::int(6).data(), &[0x20, 0x06]);
		assert_eq!(EncodedPropertyValue::uint(6).data(), &[0x28, 0x06]);
		assert_eq!(EncodedPropertyValue::sint(6).data(), &[0x30, 0x0c]);
		assert_eq!(EncodedPropertyValue::bool(true).data(), &[0x38, 0x01]);
		assert_eq!(EncodedPropertyValue::float(1.0).data(), &[0x15, 0x00, 0x00, 0x80, 0x3f]);
	}

	#[test]
	fn test_same_number_different_tag() {
		let values = [
			EncodedPropertyValue::string("6"),
			EncodedPropertyValue::double(6.0),
			EncodedPropertyValue::float(6.0),
			EncodedPropertyValue::int(6),
			EncodedPropertyValue::uint(6),
			EncodedPropertyValue::sint(6),
		];
		let hashed: HashSet<_> = values.iter().cloned().collect();
		let ordered: BTreeSet<_> = values.iter().cloned().collect();
		assert_eq!(hashed.len(), values.len());
		assert_eq!(ordered.len(), values.len());
	}

	#[test]
	fn test_deterministic() {
		assert_eq!(EncodedPropertyValue::sint(-42), EncodedPropertyValue::sint(-42));
		assert_eq!(EncodedPropertyValue::string("foo"), EncodedPropertyValue::encode(&PropertyValue::from("foo")));
		assert_ne!(EncodedPropertyValue::double(0.0), EncodedPropertyValue::double(-0.0));
	}

	#[test]
	fn test_negative_int_uses_ten_bytes() {
		assert_eq!(EncodedPropertyValue::int(-1).len(), 11);
		assert_eq!(EncodedPropertyValue::sint(-1).data(), &[0x30, 0x01]);
	}
}
