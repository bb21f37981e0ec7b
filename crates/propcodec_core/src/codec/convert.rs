use std::collections::BTreeMap;

use crate::codec::{AssetOrArchive, CodecError, Record, Result, Typed, Value};

/// Host types that can be read out of a typed value.
pub trait FromTyped: Sized {
	/// Convert, failing when the typed kind does not fit.
	fn from_typed(value: Typed) -> Result<Self>;
}

/// Host types that can be stored into a typed value.
pub trait IntoTyped {
	/// Convert into a typed value.
	fn into_typed(self) -> Typed;
}

fn mismatch(expected: &'static str, got: &Typed) -> CodecError {
	CodecError::ConvertMismatch {
		expected,
		got: got.kind_name(),
	}
}

impl FromTyped for Typed {
	fn from_typed(value: Typed) -> Result<Self> {
		Ok(value)
	}
}

impl IntoTyped for Typed {
	fn into_typed(self) -> Typed {
		self
	}
}

impl FromTyped for bool {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Bool(flag) => Ok(flag),
			other => Err(mismatch("bool", &other)),
		}
	}
}

impl IntoTyped for bool {
	fn into_typed(self) -> Typed {
		Typed::Bool(self)
	}
}

impl FromTyped for i64 {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Int(number) => Ok(number),
			other => Err(mismatch("int", &other)),
		}
	}
}

impl IntoTyped for i64 {
	fn into_typed(self) -> Typed {
		Typed::Int(self)
	}
}

impl FromTyped for i32 {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Int(number) => i32::try_from(number).map_err(|_| CodecError::ConvertMismatch {
				expected: "i32",
				got: "int",
			}),
			other => Err(mismatch("int", &other)),
		}
	}
}

impl IntoTyped for i32 {
	fn into_typed(self) -> Typed {
		Typed::Int(i64::from(self))
	}
}

impl FromTyped for f64 {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Float(number) => Ok(number),
			Typed::Int(number) => Ok(number as f64),
			other => Err(mismatch("float", &other)),
		}
	}
}

impl IntoTyped for f64 {
	fn into_typed(self) -> Typed {
		Typed::Float(self)
	}
}

impl FromTyped for String {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::String(text) => Ok(text),
			other => Err(mismatch("string", &other)),
		}
	}
}

impl IntoTyped for String {
	fn into_typed(self) -> Typed {
		Typed::String(self)
	}
}

impl IntoTyped for &str {
	fn into_typed(self) -> Typed {
		Typed::String(self.to_owned())
	}
}

impl<T: FromTyped> FromTyped for Vec<T> {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Null => Ok(Vec::new()),
			Typed::List(items) => items.into_iter().map(T::from_typed).collect(),
			other => Err(mismatch("list", &other)),
		}
	}
}

impl<T: IntoTyped> IntoTyped for Vec<T> {
	fn into_typed(self) -> Typed {
		Typed::List(self.into_iter().map(IntoTyped::into_typed).collect())
	}
}

impl<T: FromTyped> FromTyped for BTreeMap<String, T> {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Null => Ok(BTreeMap::new()),
			Typed::Map(entries) => entries.into_iter().map(|(key, item)| Ok((key, T::from_typed(item)?))).collect(),
			other => Err(mismatch("map", &other)),
		}
	}
}

impl<T: IntoTyped> IntoTyped for BTreeMap<String, T> {
	fn into_typed(self) -> Typed {
		Typed::Map(self.into_iter().map(|(key, item)| (key, item.into_typed())).collect())
	}
}

impl<T: FromTyped> FromTyped for Option<T> {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Null => Ok(None),
			other => T::from_typed(other).map(Some),
		}
	}
}

impl<T: IntoTyped> IntoTyped for Option<T> {
	fn into_typed(self) -> Typed {
		match self {
			Some(value) => value.into_typed(),
			None => Typed::Null,
		}
	}
}

impl FromTyped for Value {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Any(raw) => Ok(raw),
			Typed::Null => Ok(Value::Null),
			other => Err(mismatch("any", &other)),
		}
	}
}

impl IntoTyped for Value {
	fn into_typed(self) -> Typed {
		Typed::Any(self)
	}
}

impl FromTyped for Record {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Record(record) => Ok(record),
			other => Err(mismatch("record", &other)),
		}
	}
}

impl IntoTyped for Record {
	fn into_typed(self) -> Typed {
		Typed::Record(self)
	}
}

impl FromTyped for AssetOrArchive {
	fn from_typed(value: Typed) -> Result<Self> {
		match value {
			Typed::Asset(asset) => Ok(asset),
			Typed::Null => Ok(AssetOrArchive::default()),
			other => Err(mismatch("asset", &other)),
		}
	}
}

impl IntoTyped for AssetOrArchive {
	fn into_typed(self) -> Typed {
		Typed::Asset(self)
	}
}
