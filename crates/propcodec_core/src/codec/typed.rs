use std::collections::BTreeMap;

use crate::codec::{AssetOrArchive, CodecError, FieldShape, FromTyped, IntoTyped, RecordId, Result, Schema, Shape, Value};

/// Plain, shape-conformant value handed to host code.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Typed {
	/// Unset optional field or absent collection.
	#[default]
	Null,
	/// Boolean.
	Bool(bool),
	/// Integer.
	Int(i64),
	/// Float.
	Float(f64),
	/// String.
	String(String),
	/// Sequence.
	List(Vec<Typed>),
	/// String-keyed map.
	Map(BTreeMap<String, Typed>),
	/// Declared record.
	Record(Record),
	/// Asset-or-archive union.
	Asset(AssetOrArchive),
	/// Untyped subtree.
	Any(Value),
}

/// Decoded record with one slot per declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	id: RecordId,
	type_name: Box<str>,
	/// Field slots in declaration order, internal fields included.
	pub fields: Vec<FieldValue>,
}

/// One record field slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Wire key (host name for internal fields).
	pub name: Box<str>,
	/// Current value.
	pub value: Typed,
}

impl Typed {
	/// Zero value for a shape. Collections start unset.
	pub fn zero(shape: &Shape, schema: &Schema) -> Typed {
		match shape {
			Shape::Any => Self::Any(Value::Null),
			Shape::Bool => Self::Bool(false),
			Shape::Int => Self::Int(0),
			Shape::Float => Self::Float(0.0),
			Shape::String => Self::String(String::new()),
			Shape::Array(_) | Shape::Map(_) => Self::Null,
			Shape::Record(id) => Self::Record(Record::zero(schema, *id)),
			Shape::AssetOrArchive => Self::Asset(AssetOrArchive::default()),
		}
	}

	/// Short kind label used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::List(_) => "list",
			Self::Map(_) => "map",
			Self::Record(_) => "record",
			Self::Asset(_) => "asset",
			Self::Any(_) => "any",
		}
	}

	/// Whether this is [`Typed::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow a record.
	pub fn as_record(&self) -> Option<&Record> {
		match self {
			Self::Record(record) => Some(record),
			_ => None,
		}
	}

	/// Mutably borrow a record.
	pub fn as_record_mut(&mut self) -> Option<&mut Record> {
		match self {
			Self::Record(record) => Some(record),
			_ => None,
		}
	}
}

impl Record {
	/// Record with every slot at its zero value. Optional fields start unset.
	pub fn zero(schema: &Schema, id: RecordId) -> Record {
		let shape = schema.record(id);
		Record {
			id,
			type_name: shape.type_name.clone(),
			fields: shape
				.fields
				.iter()
				.map(|field| FieldValue {
					name: field.tag.name.clone(),
					value: slot_zero(field, schema),
				})
				.collect(),
		}
	}

	/// Schema id of this record.
	pub fn id(&self) -> RecordId {
		self.id
	}

	/// Record type name.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Borrow a field slot by name.
	pub fn get(&self, name: &str) -> Option<&Typed> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}

	/// Mutably borrow a field slot by name.
	pub fn get_mut(&mut self, name: &str) -> Option<&mut Typed> {
		self.fields.iter_mut().find(|field| &*field.name == name).map(|field| &mut field.value)
	}

	/// Replace a field slot, returning the previous value.
	pub fn set(&mut self, name: &str, value: impl IntoTyped) -> Result<Typed> {
		let type_name = self.type_name.to_string();
		let slot = self.get_mut(name).ok_or_else(|| CodecError::ConvertMissingField {
			record: type_name,
			field: name.to_owned(),
		})?;
		Ok(std::mem::replace(slot, value.into_typed()))
	}

	/// Convert a copy of a field slot into a host type.
	pub fn get_as<T: FromTyped>(&self, name: &str) -> Result<T> {
		let value = self.get(name).ok_or_else(|| self.missing(name))?;
		T::from_typed(value.clone())
	}

	/// Move a field slot out as a host type, leaving it unset.
	pub fn take_as<T: FromTyped>(&mut self, name: &str) -> Result<T> {
		let missing = self.missing(name);
		let slot = self.get_mut(name).ok_or(missing)?;
		T::from_typed(std::mem::take(slot))
	}

	fn missing(&self, name: &str) -> CodecError {
		CodecError::ConvertMissingField {
			record: self.type_name.to_string(),
			field: name.to_owned(),
		}
	}
}

fn slot_zero(field: &FieldShape, schema: &Schema) -> Typed {
	if field.tag.optional || (field.tag.internal && matches!(field.shape, Shape::Record(_))) {
		return Typed::Null;
	}
	Typed::zero(&field.shape, schema)
}

impl From<Record> for Typed {
	fn from(value: Record) -> Self {
		Self::Record(value)
	}
}

#[cfg(test)]
mod tests {
	use crate::codec::{FieldShape, FieldTag, Record, Schema, Shape, Typed};

	#[test]
	fn zero_record_leaves_optional_fields_unset() {
		let mut builder = Schema::builder();
		let node = builder.declare("Node").expect("declare");
		builder
			.define(
				node,
				vec![
					FieldShape::new(FieldTag::required("name"), Shape::String),
					FieldShape::new(FieldTag::required("items"), Shape::array(Shape::Int)),
					FieldShape::new(FieldTag::optional("next"), Shape::Record(node)),
					FieldShape::new(FieldTag::internal("scratch"), Shape::Float),
				],
			)
			.expect("define");
		let schema = builder.build().expect("schema builds");

		let record = Record::zero(&schema, node);
		assert_eq!(record.type_name(), "Node");
		assert_eq!(record.get("name"), Some(&Typed::String(String::new())));
		assert_eq!(record.get("items"), Some(&Typed::Null));
		assert_eq!(record.get("next"), Some(&Typed::Null));
		assert_eq!(record.get("scratch"), Some(&Typed::Float(0.0)));
		assert_eq!(record.get("missing"), None);
	}

	#[test]
	fn set_and_take_convert_host_values() {
		let mut builder = Schema::builder();
		let id = builder
			.record(
				"Args",
				vec![
					FieldShape::new(FieldTag::required("n"), Shape::Int),
					FieldShape::new(FieldTag::optional("tags"), Shape::array(Shape::String)),
				],
			)
			.expect("record");
		let schema = builder.build().expect("schema builds");

		let mut record = Record::zero(&schema, id);
		assert_eq!(record.set("n", 5_i64).expect("field exists"), Typed::Int(0));
		record.set("tags", vec!["a".to_owned()]).expect("field exists");
		assert!(record.set("nope", true).is_err());

		assert_eq!(record.get_as::<i64>("n").expect("int"), 5);
		let tags: Vec<String> = record.take_as("tags").expect("list");
		assert_eq!(tags, vec!["a".to_owned()]);
		assert_eq!(record.get("tags"), Some(&Typed::Null));
	}
}
