// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! LEB128 variable-length integers and zigzag signed encoding, as used by
//! the protocol buffers wire format.

use crate::{Result, protobuf_error};

/// A varint never takes more than 10 bytes for a 64 bit value.
pub const MAX_VARINT_LEN: usize = 10;

/// Encode an unsigned 64-bit integer as LEB128 into `buf`.
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
	loop {
		let mut byte = (value & 0x7F) as u8;
		value >>= 7;
		if value != 0 {
			byte |= 0x80;
		}
		buf.push(byte);
		if value == 0 {
			break;
		}
	}
}

/// Number of bytes `encode_varint` writes for `value`.
pub fn varint_len(mut value: u64) -> usize {
	let mut len = 1;
	while value >= 0x80 {
		value >>= 7;
		len += 1;
	}
	len
}

/// Decode a LEB128 unsigned 64-bit integer from `buf` starting at `*pos`.
/// Advances `*pos` past the consumed bytes.
pub fn decode_varint(buf: &[u8], pos: &mut usize) -> Result<u64> {
	let mut result: u64 = 0;
	let mut shift: u32 = 0;
	loop {
		if *pos >= buf.len() {
			return protobuf_error!("unterminated varint");
		}
		let byte = buf[*pos];
		*pos += 1;

		let payload = (byte & 0x7F) as u64;
		if shift == 63 && payload > 1 {
			return protobuf_error!("varint overflow");
		}
		result |= payload << shift;
		if byte & 0x80 == 0 {
			return Ok(result);
		}
		shift += 7;
		if shift > 63 {
			return protobuf_error!("varint too long");
		}
	}
}

/// Maps: 0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, ...
#[inline]
pub fn encode_zigzag32(value: i32) -> u32 {
	((value << 1) ^ (value >> 31)) as u32
}

#[inline]
pub fn decode_zigzag32(value: u32) -> i32 {
	((value >> 1) as i32) ^ (-((value & 1) as i32))
}

#[inline]
pub fn encode_zigzag64(value: i64) -> u64 {
	((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub fn decode_zigzag64(value: u64) -> i64 {
	((value >> 1) as i64) ^ (-((value & 1) as i64))
}
