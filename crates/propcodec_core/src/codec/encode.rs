use crate::codec::{FieldError, Object, Record, Schema, Shape, Typed, Value};

/// Encode a record into a plain object, collecting kind mismatches.
///
/// Unset optional fields and unset map entries are omitted. Internal fields are skipped.
pub(crate) fn encode_record(schema: &Schema, record: &Record) -> (Object, Vec<FieldError>) {
	let mut ctx = EncodeCtx { schema, errors: Vec::new() };
	let object = ctx.encode_record(record);
	(object, ctx.errors)
}

struct EncodeCtx<'s> {
	schema: &'s Schema,
	errors: Vec<FieldError>,
}

impl EncodeCtx<'_> {
	fn encode_record(&mut self, record: &Record) -> Object {
		let schema = self.schema;
		let shape = schema.record(record.id());
		let mut out = Object::new();
		for field in shape.wire_fields() {
			let value = record.get(field.name()).unwrap_or(&Typed::Null);
			let encoded = self.encode_value(record.type_name(), field.name(), value, &field.shape);
			if encoded.is_null() && field.tag.optional {
				continue;
			}
			out.insert(field.name().to_owned(), encoded);
		}
		out
	}

	fn encode_value(&mut self, type_name: &str, field: &str, value: &Typed, shape: &Shape) -> Value {
		match (shape, value) {
			(_, Typed::Null) => Value::Null,
			(Shape::Any, other) => self.encode_untyped(type_name, field, other),
			(Shape::Bool, Typed::Bool(flag)) => Value::Bool(*flag),
			(Shape::Int | Shape::Float, Typed::Int(number)) => Value::Number(*number as f64),
			(Shape::Float, Typed::Float(number)) => Value::Number(*number),
			(Shape::String, Typed::String(text)) => Value::String(text.clone()),
			(Shape::Array(element), Typed::List(items)) => Value::Array(
				items
					.iter()
					.enumerate()
					.map(|(index, item)| self.encode_value(type_name, &format!("{field}[{index}]"), item, element))
					.collect(),
			),
			(Shape::Map(element), Typed::Map(entries)) => {
				let mut out = Object::new();
				for (key, item) in entries {
					let encoded = self.encode_value(type_name, &format!("{field}[{key}]"), item, element);
					if !encoded.is_null() {
						out.insert(key.clone(), encoded);
					}
				}
				Value::Object(out)
			}
			(Shape::Record(id), Typed::Record(record)) if record.id() == *id => Value::Object(self.encode_record(record)),
			(Shape::AssetOrArchive, Typed::Asset(asset)) => Value::Object(asset.to_union_object()),
			(shape, other) => {
				self.errors.push(FieldError::WrongType {
					type_name: type_name.to_owned(),
					field: field.to_owned(),
					expected: self.schema.describe(shape),
					actual: other.kind_name().to_owned(),
				});
				Value::Null
			}
		}
	}

	/// Encode host data stored in an untyped slot by its own kind.
	fn encode_untyped(&mut self, type_name: &str, field: &str, value: &Typed) -> Value {
		match value {
			Typed::Null => Value::Null,
			Typed::Bool(flag) => Value::Bool(*flag),
			Typed::Int(number) => Value::Number(*number as f64),
			Typed::Float(number) => Value::Number(*number),
			Typed::String(text) => Value::String(text.clone()),
			Typed::List(items) => Value::Array(
				items
					.iter()
					.enumerate()
					.map(|(index, item)| self.encode_untyped(type_name, &format!("{field}[{index}]"), item))
					.collect(),
			),
			Typed::Map(entries) => Value::Object(
				entries
					.iter()
					.map(|(key, item)| (key.clone(), self.encode_untyped(type_name, &format!("{field}[{key}]"), item)))
					.filter(|(_, item)| !item.is_null())
					.collect(),
			),
			Typed::Record(record) => Value::Object(self.encode_record(record)),
			Typed::Asset(asset) => Value::Object(asset.to_union_object()),
			Typed::Any(raw) => raw.clone(),
		}
	}
}
