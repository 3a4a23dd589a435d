// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Debug, Formatter};

use vectile_type::{
	EncodedPropertyValue, Error, PropertyValue, PropertyValueType, Result, format_error, pbf::PbfReader,
};

/// A borrowed entry of a layer's value table.
///
/// The tag is determined when the view is created; the payload is decoded
/// on each access.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PropertyValueView<'a> {
	data: &'a [u8],
	tag: PropertyValueType,
}

impl<'a> PropertyValueView<'a> {
	/// Fails with a format error unless `data` holds exactly one known value
	/// field with the right wire type.
	pub fn new(data: &'a [u8]) -> Result<Self> {
		let mut reader = PbfReader::new(data);
		let mut tag = None;
		while reader.next()? {
			let Ok(field_tag) = PropertyValueType::try_from(reader.field()) else {
				reader.skip()?;
				continue;
			};
			if reader.wire_type() != field_tag.wire_type() {
				return format_error!("illegal wire type for {} property value", field_tag);
			}
			if tag.is_some() {
				return format_error!("property value has more than one value field");
			}
			tag = Some(field_tag);
			reader.skip()?;
		}
		match tag {
			Some(tag) => Ok(Self {
				data,
				tag,
			}),
			None => format_error!("missing tag value in property value"),
		}
	}

	pub fn value_type(&self) -> PropertyValueType {
		self.tag
	}

	/// The encoded `Value` message.
	pub fn data(&self) -> &'a [u8] {
		self.data
	}

	fn payload(&self, expected: PropertyValueType) -> Result<PbfReader<'a>> {
		if self.tag != expected {
			return Err(Error::TypeMismatch {
				expected,
				actual: self.tag,
			});
		}
		let mut reader = PbfReader::new(self.data);
		if !reader.next_field(expected.field())? {
			return format_error!("missing {} field in property value", expected);
		}
		Ok(reader)
	}

	pub fn string_value(&self) -> Result<&'a str> {
		self.payload(PropertyValueType::String)?.get_string()
	}

	pub fn float_value(&self) -> Result<f32> {
		self.payload(PropertyValueType::Float)?.get_float()
	}

	pub fn double_value(&self) -> Result<f64> {
		self.payload(PropertyValueType::Double)?.get_double()
	}

	pub fn int_value(&self) -> Result<i64> {
		self.payload(PropertyValueType::Int)?.get_int64()
	}

	pub fn uint_value(&self) -> Result<u64> {
		self.payload(PropertyValueType::UInt)?.get_uint64()
	}

	pub fn sint_value(&self) -> Result<i64> {
		self.payload(PropertyValueType::SInt)?.get_sint64()
	}

	pub fn bool_value(&self) -> Result<bool> {
		self.payload(PropertyValueType::Bool)?.get_bool()
	}

	pub fn to_owned_value(&self) -> Result<PropertyValue> {
		Ok(match self.tag {
			PropertyValueType::String => PropertyValue::String(self.string_value()?.to_string()),
			PropertyValueType::Float => PropertyValue::float(self.float_value()?),
			PropertyValueType::Double => PropertyValue::double(self.double_value()?),
			PropertyValueType::Int => PropertyValue::Int(self.int_value()?),
			PropertyValueType::UInt => PropertyValue::UInt(self.uint_value()?),
			PropertyValueType::SInt => PropertyValue::SInt(self.sint_value()?),
			PropertyValueType::Bool => PropertyValue::Bool(self.bool_value()?),
		})
	}

	/// The same value as an [`EncodedPropertyValue`], bytes copied as is.
	pub fn to_encoded(&self) -> EncodedPropertyValue {
		EncodedPropertyValue::from_encoded(self.tag, self.data)
	}
}

impl Debug for PropertyValueView<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.to_owned_value() {
			Ok(value) => write!(f, "{:?}", value),
			Err(_) => write!(f, "{}({:?})", self.tag, self.data),
		}
	}
}

/// One key/value pair of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property<'a> {
	pub key: &'a str,
	pub value: PropertyValueView<'a>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_typed_getters() {
		let encoded = EncodedPropertyValue::sint(-12);
		let view = PropertyValueView::new(encoded.data()).unwrap();
		assert_eq!(view.value_type(), PropertyValueType::SInt);
		assert_eq!(view.sint_value().unwrap(), -12);
		assert_eq!(
			view.int_value().unwrap_err(),
			Error::TypeMismatch {
				expected: PropertyValueType::Int,
				actual: PropertyValueType::SInt,
			}
		);
		assert_eq!(view.to_owned_value().unwrap(), PropertyValue::SInt(-12));
		assert_eq!(view.to_encoded(), encoded);
	}

	#[test]
	fn test_all_tags() {
		let values = [
			PropertyValue::from("text"),
			PropertyValue::float(1.5),
			PropertyValue::double(-2.25),
			PropertyValue::Int(-7),
			PropertyValue::UInt(7),
			PropertyValue::SInt(7),
			PropertyValue::Bool(true),
		];
		for value in values {
			let encoded = EncodedPropertyValue::encode(&value);
			let view = PropertyValueView::new(encoded.data()).unwrap();
			assert_eq!(view.value_type(), value.value_type());
			assert_eq!(view.to_owned_value().unwrap(), value);
		}
	}

	#[test]
	fn test_missing_value() {
		assert!(matches!(PropertyValueView::new(&[]), Err(Error::Format(_))));
	}

	#[test]
	fn test_wrong_wire_type() {
		// field 4 (int) written as length-delimited
		assert!(matches!(PropertyValueView::new(&[0x22, 0x00]), Err(Error::Format(_))));
	}

	#[test]
	fn test_two_values() {
		let mut data = EncodedPropertyValue::int(1).data().to_vec();
		data.extend_from_slice(EncodedPropertyValue::bool(true).data());
		assert!(matches!(PropertyValueView::new(&data), Err(Error::Format(_))));
	}
}
