// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Protocol buffers wire primitives.
//!
//! Only what the vector tile format needs: varint, fixed32/fixed64 and
//! length-delimited fields, plus packed `uint32` runs.

mod reader;
pub mod varint;
mod writer;

pub use reader::{PackedUint32, PbfReader};
pub use varint::{decode_zigzag32, decode_zigzag64, encode_zigzag32, encode_zigzag64};
pub use writer::PbfWriter;

use crate::{Error, Result};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
	Varint = 0,
	Fixed64 = 1,
	LengthDelimited = 2,
	Fixed32 = 5,
}

impl TryFrom<u8> for WireType {
	type Error = Error;

	fn try_from(value: u8) -> Result<Self> {
		match value {
			0 => Ok(WireType::Varint),
			1 => Ok(WireType::Fixed64),
			2 => Ok(WireType::LengthDelimited),
			5 => Ok(WireType::Fixed32),
			other => Err(Error::Protobuf(format!("unsupported wire type {other}"))),
		}
	}
}
