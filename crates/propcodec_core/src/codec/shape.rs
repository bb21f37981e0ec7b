use std::collections::HashMap;

use crate::codec::{CodecError, FieldTag, Result};

/// Index of a record inside its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u32);

impl RecordId {
	/// Position of the record in schema order.
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// Shape of one value position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
	/// Untyped subtree kept as a raw value.
	Any,
	/// Boolean scalar.
	Bool,
	/// Integral number.
	Int,
	/// Floating-point number.
	Float,
	/// String scalar.
	String,
	/// Sequence of one element shape.
	Array(Box<Shape>),
	/// String-keyed map of one element shape.
	Map(Box<Shape>),
	/// Declared record.
	Record(RecordId),
	/// Asset-or-archive union.
	AssetOrArchive,
}

impl Shape {
	/// Array of `element`.
	pub fn array(element: Shape) -> Self {
		Self::Array(Box::new(element))
	}

	/// Map of `element`.
	pub fn map(element: Shape) -> Self {
		Self::Map(Box::new(element))
	}

	/// Element shape for collections.
	pub fn element(&self) -> Option<&Shape> {
		match self {
			Self::Array(element) | Self::Map(element) => Some(element),
			_ => None,
		}
	}

	/// Whether this is the untyped shape.
	pub fn is_any(&self) -> bool {
		matches!(self, Self::Any)
	}
}

/// One declared record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
	/// Parsed field annotation.
	pub tag: FieldTag,
	/// Value shape. Optional indirection is expressed by `tag.optional`, never here.
	pub shape: Shape,
}

impl FieldShape {
	/// Pair a tag with a shape.
	pub fn new(tag: FieldTag, shape: Shape) -> Self {
		Self { tag, shape }
	}

	/// Wire key (host name for internal fields).
	pub fn name(&self) -> &str {
		&self.tag.name
	}
}

/// Declared record layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordShape {
	/// Record type name used in diagnostics.
	pub type_name: Box<str>,
	/// Fields in declaration order.
	pub fields: Vec<FieldShape>,
}

impl RecordShape {
	/// Look up a non-internal field by wire key.
	pub fn field(&self, name: &str) -> Option<&FieldShape> {
		self.wire_fields().find(|field| field.name() == name)
	}

	/// Fields that take part in decode and encode.
	pub fn wire_fields(&self) -> impl Iterator<Item = &FieldShape> {
		self.fields.iter().filter(|field| !field.tag.internal)
	}
}

/// Immutable set of record layouts.
#[derive(Debug, Clone)]
pub struct Schema {
	records: Vec<RecordShape>,
	by_name: HashMap<Box<str>, RecordId>,
}

impl Schema {
	/// Start declaring records.
	pub fn builder() -> SchemaBuilder {
		SchemaBuilder::default()
	}

	/// Record layout for an id issued by this schema's builder.
	///
	/// # Panics
	///
	/// Panics when `id` was issued by another schema's builder and is out of range here.
	pub fn record(&self, id: RecordId) -> &RecordShape {
		match self.records.get(id.index()) {
			Some(record) => record,
			None => panic!("record id {} does not belong to this schema ({} records)", id.index(), self.records.len()),
		}
	}

	/// Record layout, or `None` for an id from another schema.
	pub fn get(&self, id: RecordId) -> Option<&RecordShape> {
		self.records.get(id.index())
	}

	/// Look up a record id by type name.
	pub fn record_by_name(&self, name: &str) -> Option<RecordId> {
		self.by_name.get(name).copied()
	}

	/// Iterate records in declaration order.
	pub fn records(&self) -> impl Iterator<Item = (RecordId, &RecordShape)> {
		self.records.iter().enumerate().map(|(idx, record)| (RecordId(idx as u32), record))
	}

	/// Number of records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether the schema has no records.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Parse shape notation (`string`, `[int]`, `{Record}`, ...) against this schema.
	pub fn parse_shape(&self, text: &str) -> Result<Shape> {
		parse_shape_with(text, &|name| self.record_by_name(name))
	}

	/// Render a shape in the notation accepted by [`Schema::parse_shape`].
	pub fn describe(&self, shape: &Shape) -> String {
		match shape {
			Shape::Any => "any".to_owned(),
			Shape::Bool => "bool".to_owned(),
			Shape::Int => "int".to_owned(),
			Shape::Float => "float".to_owned(),
			Shape::String => "string".to_owned(),
			Shape::AssetOrArchive => "asset".to_owned(),
			Shape::Array(element) => format!("[{}]", self.describe(element)),
			Shape::Map(element) => format!("{{{}}}", self.describe(element)),
			Shape::Record(id) => match self.get(*id) {
				Some(record) => record.type_name.to_string(),
				None => format!("#{}", id.index()),
			},
		}
	}
}

/// Two-phase schema construction: declare names first, then define bodies.
///
/// Declaring before defining lets a record mention itself or a later record.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
	names: Vec<Box<str>>,
	bodies: Vec<Option<Vec<FieldShape>>>,
	by_name: HashMap<Box<str>, RecordId>,
}

impl SchemaBuilder {
	/// Reserve an id for a record name.
	pub fn declare(&mut self, name: &str) -> Result<RecordId> {
		if self.by_name.contains_key(name) {
			return Err(CodecError::DuplicateRecord { name: name.to_owned() });
		}
		let id = RecordId(self.names.len() as u32);
		self.names.push(name.into());
		self.bodies.push(None);
		self.by_name.insert(name.into(), id);
		Ok(id)
	}

	/// Supply the fields of a declared record.
	pub fn define(&mut self, id: RecordId, fields: Vec<FieldShape>) -> Result<()> {
		let len = self.names.len() as u32;
		let Some(slot) = self.bodies.get(id.index()) else {
			return Err(CodecError::RecordIndexOutOfRange { idx: id.0, len });
		};
		let record = self.names[id.index()].to_string();
		if slot.is_some() {
			return Err(CodecError::RecordRedefined { name: record });
		}

		for (pos, field) in fields.iter().enumerate() {
			if fields[..pos].iter().any(|prior| prior.name() == field.name()) {
				return Err(CodecError::DuplicateField {
					record,
					field: field.name().to_owned(),
				});
			}
			check_shape_ids(&field.shape, len)?;
		}

		self.bodies[id.index()] = Some(fields);
		Ok(())
	}

	/// Declare and define in one step.
	pub fn record(&mut self, name: &str, fields: Vec<FieldShape>) -> Result<RecordId> {
		let id = self.declare(name)?;
		self.define(id, fields)?;
		Ok(id)
	}

	/// Id of an already declared record.
	pub fn lookup(&self, name: &str) -> Option<RecordId> {
		self.by_name.get(name).copied()
	}

	/// Parse shape notation against the records declared so far.
	pub fn parse_shape(&self, text: &str) -> Result<Shape> {
		parse_shape_with(text, &|name| self.lookup(name))
	}

	/// Validate and freeze.
	pub fn build(self) -> Result<Schema> {
		let mut records = Vec::with_capacity(self.names.len());
		for (name, body) in self.names.into_iter().zip(self.bodies) {
			let Some(fields) = body else {
				return Err(CodecError::RecordUndefined { name: name.into() });
			};
			records.push(RecordShape { type_name: name, fields });
		}

		check_finite(&records)?;

		Ok(Schema {
			records,
			by_name: self.by_name,
		})
	}
}

fn check_shape_ids(shape: &Shape, len: u32) -> Result<()> {
	match shape {
		Shape::Record(id) if id.0 >= len => Err(CodecError::RecordIndexOutOfRange { idx: id.0, len }),
		Shape::Array(element) | Shape::Map(element) => check_shape_ids(element, len),
		_ => Ok(()),
	}
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
	Fresh,
	Active,
	Done,
}

/// Reject records whose zero value would need an infinite chain of required records.
fn check_finite(records: &[RecordShape]) -> Result<()> {
	let mut state = vec![Visit::Fresh; records.len()];
	for start in 0..records.len() {
		visit_required(records, start, &mut state)?;
	}
	Ok(())
}

fn visit_required(records: &[RecordShape], idx: usize, state: &mut [Visit]) -> Result<()> {
	match state[idx] {
		Visit::Done => return Ok(()),
		Visit::Active => {
			return Err(CodecError::InfiniteRecord {
				name: records[idx].type_name.to_string(),
			});
		}
		Visit::Fresh => {}
	}

	state[idx] = Visit::Active;
	for field in records[idx].wire_fields().filter(|field| !field.tag.optional) {
		if let Shape::Record(next) = field.shape {
			visit_required(records, next.index(), state)?;
		}
	}
	state[idx] = Visit::Done;
	Ok(())
}

fn parse_shape_with(text: &str, lookup: &dyn Fn(&str) -> Option<RecordId>) -> Result<Shape> {
	let trimmed = text.trim();
	let invalid = || CodecError::InvalidShape { text: text.to_owned() };

	if let Some(inner) = trimmed.strip_prefix('[') {
		let inner = inner.strip_suffix(']').ok_or_else(invalid)?;
		return Ok(Shape::array(parse_shape_with(inner, lookup)?));
	}
	if let Some(inner) = trimmed.strip_prefix('{') {
		let inner = inner.strip_suffix('}').ok_or_else(invalid)?;
		return Ok(Shape::map(parse_shape_with(inner, lookup)?));
	}

	let shape = match trimmed {
		"any" => Shape::Any,
		"bool" => Shape::Bool,
		"int" => Shape::Int,
		"float" => Shape::Float,
		"string" => Shape::String,
		"asset" => Shape::AssetOrArchive,
		"" => return Err(invalid()),
		name if name.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_') => {
			let id = lookup(name).ok_or_else(|| CodecError::RecordNotFound { name: name.to_owned() })?;
			Shape::Record(id)
		}
		_ => return Err(invalid()),
	};
	Ok(shape)
}
