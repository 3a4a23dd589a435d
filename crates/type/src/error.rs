// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::value::PropertyValueType;

/// Errors raised while building or reading vector tiles.
///
/// Construction errors (`InvalidState`, `EncodingRange`, `TypeMismatch`,
/// `UnknownIndex`) are raised before any table is modified. Reader errors
/// (`Format`, `Geometry`, `Version`, `Protobuf`) describe ill-formed input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("invalid state: {message}")]
	InvalidState {
		message: String,
	},

	#[error("value out of range for {target}: {value}")]
	EncodingRange {
		target: &'static str,
		value: String,
	},

	#[error("type mismatch: expected {expected}, got {actual}")]
	TypeMismatch {
		expected: PropertyValueType,
		actual: PropertyValueType,
	},

	#[error("unknown {table} index {index} (table has {len} entries)")]
	UnknownIndex {
		table: &'static str,
		index: u32,
		len: usize,
	},

	#[error("format error: {0}")]
	Format(String),

	#[error("geometry error: {0}")]
	Geometry(String),

	#[error("unsupported layer version {0} (only 1 and 2 are supported)")]
	Version(u32),

	#[error("protocol buffers error: {0}")]
	Protobuf(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	pub fn invalid_state(message: impl Into<String>) -> Self {
		Error::InvalidState {
			message: message.into(),
		}
	}

	pub fn out_of_range(target: &'static str, value: impl ToString) -> Self {
		Error::EncodingRange {
			target,
			value: value.to_string(),
		}
	}
}

#[macro_export]
macro_rules! format_error {
    ($($args:tt)*) => { Err($crate::Error::Format(format!($($args)*))) };
}

#[macro_export]
macro_rules! geometry_error {
    ($($args:tt)*) => { Err($crate::Error::Geometry(format!($($args)*))) };
}

#[macro_export]
macro_rules! protobuf_error {
    ($($args:tt)*) => { Err($crate::Error::Protobuf(format!($($args)*))) };
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		let err = Error::TypeMismatch {
			expected: PropertyValueType::SInt,
			actual: PropertyValueType::String,
		};
		assert_eq!(err.to_string(), "type mismatch: expected sint, got string");

		let err = Error::out_of_range("uint", -3);
		assert_eq!(err.to_string(), "value out of range for uint: -3");
	}

	#[test]
	fn test_macros() {
		let result: Result<()> = format_error!("missing name field in layer");
		assert_eq!(result, Err(Error::Format("missing name field in layer".to_string())));
	}
}
