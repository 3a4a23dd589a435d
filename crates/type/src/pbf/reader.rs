// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::str;

use super::{
	WireType,
	varint::{decode_varint, decode_zigzag64},
};
use crate::{Result, protobuf_error};

/// Zero-copy cursor over an encoded protobuf message.
///
/// Call [`PbfReader::next`] to advance to the next field, then exactly one
/// getter (or [`PbfReader::skip`]) to consume its payload.
#[derive(Debug, Clone)]
pub struct PbfReader<'a> {
	data: &'a [u8],
	pos: usize,
	field: u32,
	wire_type: WireType,
}

impl<'a> PbfReader<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self {
			data,
			pos: 0,
			field: 0,
			wire_type: WireType::Varint,
		}
	}

	pub fn data(&self) -> &'a [u8] {
		self.data
	}

	pub fn field(&self) -> u32 {
		self.field
	}

	pub fn wire_type(&self) -> WireType {
		self.wire_type
	}

	/// Advances to the next field. Returns `Ok(false)` at the end of the
	/// message.
	pub fn next(&mut self) -> Result<bool> {
		if self.pos >= self.data.len() {
			return Ok(false);
		}
		let key = decode_varint(self.data, &mut self.pos)?;
		let field = key >> 3;
		if field == 0 || field > u32::MAX as u64 >> 3 {
			return protobuf_error!("invalid field number {field}");
		}
		self.field = field as u32;
		self.wire_type = WireType::try_from((key & 0x07) as u8)?;
		Ok(true)
	}

	/// Advances to the next occurrence of `field`, skipping everything else.
	pub fn next_field(&mut self, field: u32) -> Result<bool> {
		while self.next()? {
			if self.field == field {
				return Ok(true);
			}
			self.skip()?;
		}
		Ok(false)
	}

	fn expect(&self, wire_type: WireType) -> Result<()> {
		if self.wire_type != wire_type {
			return protobuf_error!(
				"field {} has wire type {:?}, expected {:?}",
				self.field,
				self.wire_type,
				wire_type
			);
		}
		Ok(())
	}

	fn take(&mut self, len: usize) -> Result<&'a [u8]> {
		let end = match self.pos.checked_add(len) {
			Some(end) if end <= self.data.len() => end,
			_ => return protobuf_error!("field {} exceeds message end", self.field),
		};
		let bytes = &self.data[self.pos..end];
		self.pos = end;
		Ok(bytes)
	}

	pub fn get_varint(&mut self) -> Result<u64> {
		self.expect(WireType::Varint)?;
		decode_varint(self.data, &mut self.pos)
	}

	/// Values above `u32::MAX` are truncated, as protobuf `uint32` does.
	pub fn get_uint32(&mut self) -> Result<u32> {
		Ok(self.get_varint()? as u32)
	}

	pub fn get_uint64(&mut self) -> Result<u64> {
		self.get_varint()
	}

	pub fn get_int64(&mut self) -> Result<i64> {
		Ok(self.get_varint()? as i64)
	}

	pub fn get_sint64(&mut self) -> Result<i64> {
		Ok(decode_zigzag64(self.get_varint()?))
	}

	pub fn get_bool(&mut self) -> Result<bool> {
		Ok(self.get_varint()? != 0)
	}

	pub fn get_enum(&mut self) -> Result<i32> {
		Ok(self.get_varint()? as i32)
	}

	pub fn get_float(&mut self) -> Result<f32> {
		self.expect(WireType::Fixed32)?;
		let bytes = self.take(4)?;
		Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
	}

	pub fn get_double(&mut self) -> Result<f64> {
		self.expect(WireType::Fixed64)?;
		let bytes = self.take(8)?;
		let mut raw = [0u8; 8];
		raw.copy_from_slice(bytes);
		Ok(f64::from_le_bytes(raw))
	}

	/// Borrowed payload of a length-delimited field.
	pub fn get_view(&mut self) -> Result<&'a [u8]> {
		self.expect(WireType::LengthDelimited)?;
		let len = decode_varint(self.data, &mut self.pos)?;
		let len = usize::try_from(len).or_else(|_| protobuf_error!("length {len} too large"))?;
		self.take(len)
	}

	pub fn get_string(&mut self) -> Result<&'a str> {
		let bytes = self.get_view()?;
		match str::from_utf8(bytes) {
			Ok(text) => Ok(text),
			Err(err) => protobuf_error!("field {} is not valid UTF-8: {err}", self.field),
		}
	}

	pub fn get_packed_uint32(&mut self) -> Result<PackedUint32<'a>> {
		Ok(PackedUint32::new(self.get_view()?))
	}

	pub fn skip(&mut self) -> Result<()> {
		match self.wire_type {
			WireType::Varint => {
				decode_varint(self.data, &mut self.pos)?;
			}
			WireType::Fixed64 => {
				self.take(8)?;
			}
			WireType::Fixed32 => {
				self.take(4)?;
			}
			WireType::LengthDelimited => {
				self.get_view()?;
			}
		}
		Ok(())
	}
}

/// Borrowed iterator over a packed repeated `uint32` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedUint32<'a> {
	data: &'a [u8],
	pos: usize,
}

impl<'a> PackedUint32<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self {
			data,
			pos: 0,
		}
	}

	pub fn data(&self) -> &'a [u8] {
		self.data
	}

	pub fn is_empty(&self) -> bool {
		self.pos >= self.data.len()
	}

	/// Counts the remaining values without consuming them. Every value ends
	/// with a byte that has the continuation bit cleared.
	pub fn count_remaining(&self) -> usize {
		self.data[self.pos..].iter().filter(|&&b| b & 0x80 == 0).count()
	}
}

impl Iterator for PackedUint32<'_> {
	type Item = Result<u32>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.pos >= self.data.len() {
			return None;
		}
		match decode_varint(self.data, &mut self.pos) {
			Ok(value) => Some(Ok(value as u32)),
			Err(err) => {
				self.pos = self.data.len();
				Some(Err(err))
			}
		}
	}
}
