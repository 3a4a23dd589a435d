// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{
	WireType,
	varint::{encode_varint, encode_zigzag64, varint_len},
};

/// Append-only protobuf message writer.
///
/// Fields are written in call order. Nested messages are built into a
/// scratch buffer and then copied behind their length prefix.
#[derive(Debug, Default, Clone)]
pub struct PbfWriter {
	buf: Vec<u8>,
}

impl PbfWriter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buf: Vec::with_capacity(capacity),
		}
	}

	pub fn len(&self) -> usize {
		self.buf.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.buf
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.buf
	}

	/// Appends bytes that already hold complete fields.
	pub fn append(&mut self, fields: &[u8]) {
		self.buf.extend_from_slice(fields);
	}

	fn add_key(&mut self, field: u32, wire_type: WireType) {
		encode_varint(((field as u64) << 3) | wire_type as u64, &mut self.buf);
	}

	pub fn add_varint(&mut self, field: u32, value: u64) {
		self.add_key(field, WireType::Varint);
		encode_varint(value, &mut self.buf);
	}

	pub fn add_uint32(&mut self, field: u32, value: u32) {
		self.add_varint(field, value as u64);
	}

	pub fn add_uint64(&mut self, field: u32, value: u64) {
		self.add_varint(field, value);
	}

	/// Negative values take the full ten bytes, as with protobuf `int64`.
	pub fn add_int64(&mut self, field: u32, value: i64) {
		self.add_varint(field, value as u64);
	}

	pub fn add_sint64(&mut self, field: u32, value: i64) {
		self.add_varint(field, encode_zigzag64(value));
	}

	pub fn add_bool(&mut self, field: u32, value: bool) {
		self.add_varint(field, value as u64);
	}

	pub fn add_enum(&mut self, field: u32, value: i32) {
		self.add_int64(field, value as i64);
	}

	pub fn add_float(&mut self, field: u32, value: f32) {
		self.add_key(field, WireType::Fixed32);
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	pub fn add_double(&mut self, field: u32, value: f64) {
		self.add_key(field, WireType::Fixed64);
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	pub fn add_bytes(&mut self, field: u32, value: &[u8]) {
		self.add_key(field, WireType::LengthDelimited);
		encode_varint(value.len() as u64, &mut self.buf);
		self.buf.extend_from_slice(value);
	}

	pub fn add_string(&mut self, field: u32, value: &str) {
		self.add_bytes(field, value.as_bytes());
	}

	/// Writes a packed repeated `uint32` field. Nothing is written for an
	/// empty slice.
	pub fn add_packed_uint32(&mut self, field: u32, values: &[u32]) {
		if values.is_empty() {
			return;
		}
		let len: usize = values.iter().map(|&v| varint_len(v as u64)).sum();
		self.add_key(field, WireType::LengthDelimited);
		encode_varint(len as u64, &mut self.buf);
		for &value in values {
			encode_varint(value as u64, &mut self.buf);
		}
	}

	pub fn add_message<F>(&mut self, field: u32, build: F)
	where
		F: FnOnce(&mut PbfWriter),
	{
		let mut nested = PbfWriter::new();
		build(&mut nested);
		self.add_bytes(field, nested.as_bytes());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_varint_fields() {
		let mut writer = PbfWriter::new();
		writer.add_uint32(4, 6);
		writer.add_sint64(6, 6);
		assert_eq!(writer.as_bytes(), &[0x20, 0x06, 0x30, 0x0C]);
	}

	#[test]
	fn test_negative_int64_uses_ten_bytes() {
		let mut writer = PbfWriter::new();
		writer.add_int64(4, -1);
		assert_eq!(writer.len(), 11);
	}

	#[test]
	fn test_string_field() {
		let mut writer = PbfWriter::new();
		writer.add_string(1, "foo");
		assert_eq!(writer.as_bytes(), &[0x0A, 0x03, b'f', b'o', b'o']);
	}

	#[test]
	fn test_fixed_fields() {
		let mut writer = PbfWriter::new();
		writer.add_float(2, 1.5);
		writer.add_double(3, 1.5);
		let bytes = writer.into_bytes();
		assert_eq!(bytes[0], 0x15);
		assert_eq!(&bytes[1..5], &1.5f32.to_le_bytes());
		assert_eq!(bytes[5], 0x19);
		assert_eq!(&bytes[6..14], &1.5f64.to_le_bytes());
	}

	#[test]
	fn test_packed_uint32() {
		let mut writer = PbfWriter::new();
		writer.add_packed_uint32(2, &[0, 300, 1]);
		assert_eq!(writer.as_bytes(), &[0x12, 0x04, 0x00, 0xAC, 0x02, 0x01]);

		let mut writer = PbfWriter::new();
		writer.add_packed_uint32(2, &[]);
		assert!(writer.is_empty());
	}

	#[test]
	fn test_nested_message() {
		let mut writer = PbfWriter::new();
		writer.add_message(3, |layer| {
			layer.add_string(1, "a");
		});
		assert_eq!(writer.as_bytes(), &[0x1A, 0x03, 0x0A, 0x01, b'a']);
	}
}
