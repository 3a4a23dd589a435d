// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Compile-time property tags.
//!
//! A typed value index is parameterized by one of the marker types below and
//! accepts any native type implementing [`EncodeAs`] for that marker. The
//! tag is fixed by the marker, so `6i64` becomes an `int` under [`IntValue`]
//! and an `sint` under [`SIntValue`].

use crate::{
	Error, Result,
	value::{EncodedPropertyValue, OrderedF32, OrderedF64, PropertyValue, PropertyValueType},
};

pub trait PropertyKind {
	const TAG: PropertyValueType;
}

macro_rules! property_kind {
	($($name:ident => $tag:ident),* $(,)?) => {
		$(
			#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
			pub struct $name;

			impl PropertyKind for $name {
				const TAG: PropertyValueType = PropertyValueType::$tag;
			}
		)*
	};
}

property_kind! {
	StringValue => String,
	FloatValue => Float,
	DoubleValue => Double,
	IntValue => Int,
	UIntValue => UInt,
	SIntValue => SInt,
	BoolValue => Bool,
}

/// Encodes a native value under the tag of `K`.
///
/// Fails with [`Error::EncodingRange`] when the value cannot be represented
/// under that tag. Nothing is written anywhere on failure.
pub trait EncodeAs<K: PropertyKind> {
	fn encode_as(&self) -> Result<EncodedPropertyValue>;
}

// Lossless conversions.
macro_rules! encode_as {
	($kind:ty, $ctor:ident, $target:ty: $($native:ty),+) => {
		$(
			impl EncodeAs<$kind> for $native {
				fn encode_as(&self) -> Result<EncodedPropertyValue> {
					Ok(EncodedPropertyValue::$ctor(<$target>::from(*self)))
				}
			}
		)+
	};
}

// Conversions that may not fit.
macro_rules! encode_as_checked {
	($kind:ty, $ctor:ident, $target:ty: $($native:ty),+) => {
		$(
			impl EncodeAs<$kind> for $native {
				fn encode_as(&self) -> Result<EncodedPropertyValue> {
					let value = <$target>::try_from(*self)
						.map_err(|_| Error::out_of_range(<$kind as PropertyKind>::TAG.name(), self))?;
					Ok(EncodedPropertyValue::$ctor(value))
				}
			}
		)+
	};
}

encode_as!(IntValue, int, i64: i64, i32, i16, i8, u32, u16, u8);
encode_as_checked!(IntValue, int, i64: u64, usize);

encode_as!(SIntValue, sint, i64: i64, i32, i16, i8, u32, u16, u8);
encode_as_checked!(SIntValue, sint, i64: u64, usize);

encode_as!(UIntValue, uint, u64: u64, u32, u16, u8);
encode_as_checked!(UIntValue, uint, u64: i64, i32, i16, i8, usize);

encode_as!(BoolValue, bool, bool: bool);

encode_as!(DoubleValue, double, f64: f64, f32);

encode_as!(FloatValue, float, f32: f32);

impl EncodeAs<FloatValue> for f64 {
	fn encode_as(&self) -> Result<EncodedPropertyValue> {
		if self.is_finite() && (*self < f32::MIN as f64 || *self > f32::MAX as f64) {
			return Err(Error::out_of_range(PropertyValueType::Float.name(), self));
		}
		Ok(EncodedPropertyValue::float(*self as f32))
	}
}

impl EncodeAs<FloatValue> for OrderedF32 {
	fn encode_as(&self) -> Result<EncodedPropertyValue> {
		Ok(EncodedPropertyValue::float(self.value()))
	}
}

impl EncodeAs<DoubleValue> for OrderedF64 {
	fn encode_as(&self) -> Result<EncodedPropertyValue> {
		Ok(EncodedPropertyValue::double(self.value()))
	}
}

impl EncodeAs<DoubleValue> for OrderedF32 {
	fn encode_as(&self) -> Result<EncodedPropertyValue> {
		Ok(EncodedPropertyValue::double(self.value() as f64))
	}
}

impl EncodeAs<StringValue> for str {
	fn encode_as(&self) -> Result<EncodedPropertyValue> {
		Ok(EncodedPropertyValue::string(self))
	}
}

impl EncodeAs<StringValue> for String {
	fn encode_as(&self) -> Result<EncodedPropertyValue> {
		Ok(EncodedPropertyValue::string(self))
	}
}

impl<K: PropertyKind> EncodeAs<K> for PropertyValue {
	fn encode_as(&self) -> Result<EncodedPropertyValue> {
		let actual = self.value_type();
		if actual != K::TAG {
			return Err(Error::TypeMismatch {
				expected: K::TAG,
				actual,
			});
		}
		Ok(EncodedPropertyValue::encode(self))
	}
}

impl<K: PropertyKind, T: EncodeAs<K> + ?Sized> EncodeAs<K> for &T {
	fn encode_as(&self) -> Result<EncodedPropertyValue> {
		(**self).encode_as()
	}
}
