use crate::codec::{
	ARCHIVE_SIGNATURE, ASSET_SIGNATURE, AssetKind, AssetOrArchive, FieldError, Object, Record, RecordId, Schema, Shape, Typed, Value,
};

/// Behavior switches for structural decoding.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
	/// Accept object keys that no declared field matches.
	pub ignore_unrecognized: bool,
	/// Accept absent required fields, leaving them at their zero value.
	pub ignore_missing: bool,
}

impl DecodeOptions {
	/// Preset for configuration objects, which may carry keys meant for other consumers.
	pub fn for_config() -> Self {
		Self {
			ignore_unrecognized: true,
			ignore_missing: false,
		}
	}

	/// Preset for partially populated inputs.
	pub fn tolerate_missing() -> Self {
		Self {
			ignore_unrecognized: false,
			ignore_missing: true,
		}
	}
}

/// Decode a stripped object into a record, collecting every field problem.
pub(crate) fn decode_record(schema: &Schema, root: RecordId, object: &Object, options: &DecodeOptions) -> (Record, Vec<FieldError>) {
	let mut ctx = MapCtx {
		schema,
		options,
		errors: Vec::new(),
	};
	let record = ctx.decode_record(root, object);
	(record, ctx.errors)
}

struct MapCtx<'s> {
	schema: &'s Schema,
	options: &'s DecodeOptions,
	errors: Vec<FieldError>,
}

impl MapCtx<'_> {
	fn decode_record(&mut self, id: RecordId, object: &Object) -> Record {
		let schema = self.schema;
		let shape = schema.record(id);
		let type_name = &*shape.type_name;
		let mut record = Record::zero(schema, id);

		for (slot, field) in record.fields.iter_mut().zip(&shape.fields) {
			if field.tag.internal {
				continue;
			}
			match object.get(field.name()) {
				Some(Value::Null) if field.tag.optional => {}
				Some(value) => slot.value = self.decode_value(type_name, field.name(), value, &field.shape),
				None if field.tag.optional || self.options.ignore_missing => {}
				None => self.errors.push(FieldError::MissingField {
					type_name: type_name.to_owned(),
					field: field.name().to_owned(),
				}),
			}
		}

		if !self.options.ignore_unrecognized {
			for key in object.keys() {
				if shape.field(key).is_none() {
					self.errors.push(FieldError::UnrecognizedField {
						type_name: type_name.to_owned(),
						field: key.clone(),
					});
				}
			}
		}

		record
	}

	fn decode_value(&mut self, type_name: &str, field: &str, value: &Value, shape: &Shape) -> Typed {
		if shape.is_any() {
			return Typed::Any(value.clone());
		}

		match (shape, value) {
			(_, Value::Secret(inner) | Value::Computed(inner)) => self.decode_value(type_name, field, inner, shape),
			(_, Value::Output(output)) => self.decode_value(type_name, field, &output.element, shape),
			(_, Value::Null) => Typed::zero(shape, self.schema),
			(Shape::Bool, Value::Bool(flag)) => Typed::Bool(*flag),
			(Shape::Int, Value::Number(number)) => Typed::Int(*number as i64),
			(Shape::Float, Value::Number(number)) => Typed::Float(*number),
			(Shape::String, Value::String(text)) => Typed::String(text.clone()),
			(Shape::Array(element), Value::Array(items)) => Typed::List(
				items
					.iter()
					.enumerate()
					.map(|(index, item)| self.decode_value(type_name, &format!("{field}[{index}]"), item, element))
					.collect(),
			),
			(Shape::Map(element), Value::Object(entries)) => Typed::Map(
				entries
					.iter()
					.map(|(key, item)| (key.clone(), self.decode_value(type_name, &format!("{field}[{key}]"), item, element)))
					.collect(),
			),
			(Shape::Record(id), Value::Object(entries)) => Typed::Record(self.decode_record(*id, entries)),
			(Shape::AssetOrArchive, Value::Object(entries)) => Typed::Asset(self.decode_asset(type_name, field, entries)),
			_ => {
				self.wrong_type(type_name, field, shape, value.kind().as_str());
				Typed::zero(shape, self.schema)
			}
		}
	}

	fn decode_asset(&mut self, type_name: &str, field: &str, entries: &Object) -> AssetOrArchive {
		if let Some(kind) = AssetKind::of(entries) {
			return match kind {
				AssetKind::Asset => AssetOrArchive::asset(entries.clone()),
				AssetKind::Archive => AssetOrArchive::archive(entries.clone()),
			};
		}

		let mut union = AssetOrArchive::default();
		for (key, slot) in [(ASSET_SIGNATURE, &mut union.asset), (ARCHIVE_SIGNATURE, &mut union.archive)] {
			match entries.get(key) {
				Some(Value::Object(inner)) => *slot = Some(inner.clone()),
				Some(other) => self.wrong_type(type_name, field, &Shape::AssetOrArchive, other.kind().as_str()),
				None => {}
			}
		}

		if !self.options.ignore_unrecognized {
			for key in entries.keys().filter(|key| !matches!(key.as_str(), ASSET_SIGNATURE | ARCHIVE_SIGNATURE)) {
				self.errors.push(FieldError::UnrecognizedField {
					type_name: type_name.to_owned(),
					field: format!("{field}.{key}"),
				});
			}
		}

		if union.is_dual() {
			self.wrong_type(type_name, field, &Shape::AssetOrArchive, "asset and archive");
			union.archive = None;
		}
		union
	}

	fn wrong_type(&mut self, type_name: &str, field: &str, shape: &Shape, actual: &str) {
		self.errors.push(FieldError::WrongType {
			type_name: type_name.to_owned(),
			field: field.to_owned(),
			expected: self.schema.describe(shape),
			actual: actual.to_owned(),
		});
	}
}
