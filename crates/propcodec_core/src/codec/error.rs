use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced while building schemas, parsing tags and paths, and converting values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
	/// Property path expression syntax is invalid.
	#[error("invalid property path: {path}")]
	InvalidPropertyPath {
		/// Original path text.
		path: String,
	},
	/// A provider tag was supplied for a field without a wire tag.
	#[error("field {field}: a provider tag requires a wire tag")]
	ProviderTagWithoutWireTag {
		/// Host-side field name.
		field: String,
	},
	/// Wire tag text could not be parsed.
	#[error("field {field}: invalid tag {tag:?}: {reason}")]
	InvalidFieldTag {
		/// Host-side field name.
		field: String,
		/// Offending tag text.
		tag: String,
		/// Short description of the problem.
		reason: &'static str,
	},
	/// A record name was declared twice.
	#[error("record declared twice: {name}")]
	DuplicateRecord {
		/// Record type name.
		name: String,
	},
	/// A record body was supplied twice.
	#[error("record defined twice: {name}")]
	RecordRedefined {
		/// Record type name.
		name: String,
	},
	/// A record id does not belong to this schema.
	#[error("record index out of range: idx={idx}, len={len}")]
	RecordIndexOutOfRange {
		/// Offending record index.
		idx: u32,
		/// Number of declared records.
		len: u32,
	},
	/// A record was declared but its fields were never defined.
	#[error("record declared but never defined: {name}")]
	RecordUndefined {
		/// Record type name.
		name: String,
	},
	/// Two fields of one record share a storage name.
	#[error("record {record} has duplicate field {field}")]
	DuplicateField {
		/// Record type name.
		record: String,
		/// Duplicated field name.
		field: String,
	},
	/// A record reaches itself through required record fields only.
	#[error("record {name} requires itself through required fields")]
	InfiniteRecord {
		/// Record type name.
		name: String,
	},
	/// A shape notation named a record that does not exist.
	#[error("record not found: {name}")]
	RecordNotFound {
		/// Requested record name.
		name: String,
	},
	/// Shape notation text is invalid.
	#[error("invalid shape notation: {text:?}")]
	InvalidShape {
		/// Original notation text.
		text: String,
	},
	/// A JSON document does not describe a valid wire value.
	#[error("invalid wire value: {reason}")]
	InvalidWireValue {
		/// Short description of the problem.
		reason: String,
	},
	/// A typed value did not have the kind a host conversion expected.
	#[error("conversion expected {expected}, got {got}")]
	ConvertMismatch {
		/// Expected typed kind.
		expected: &'static str,
		/// Actual typed kind.
		got: &'static str,
	},
	/// A host conversion asked for a field the record does not have.
	#[error("record {record} has no field {field}")]
	ConvertMissingField {
		/// Record type name.
		record: String,
		/// Requested field name.
		field: String,
	},
}

/// One field-level problem found while decoding or encoding a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
	/// A required field had no value.
	#[error("{type_name}.{field} is missing a required value")]
	MissingField {
		/// Record type name.
		type_name: String,
		/// Wire name of the field.
		field: String,
	},
	/// The input carried a key no declared field matches.
	#[error("{type_name} has no field named {field:?}")]
	UnrecognizedField {
		/// Record type name.
		type_name: String,
		/// Unmatched wire key.
		field: String,
	},
	/// A value kind did not match the declared shape.
	#[error("{type_name}.{field}: expected {expected}, found {actual}")]
	WrongType {
		/// Record type name.
		type_name: String,
		/// Wire name of the field, with `[index]` suffixes for nested elements.
		field: String,
		/// Declared shape.
		expected: String,
		/// Kind that was found instead.
		actual: String,
	},
}

impl FieldError {
	/// Record type name the problem is attributed to.
	pub fn type_name(&self) -> &str {
		match self {
			Self::MissingField { type_name, .. } | Self::UnrecognizedField { type_name, .. } | Self::WrongType { type_name, .. } => type_name,
		}
	}

	/// Field (or key) the problem is attributed to.
	pub fn field(&self) -> &str {
		match self {
			Self::MissingField { field, .. } | Self::UnrecognizedField { field, .. } | Self::WrongType { field, .. } => field,
		}
	}
}

/// Every field-level problem found by one decode or encode call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_field_errors(.errors))]
pub struct MappingError {
	/// Problems in discovery order.
	pub errors: Vec<FieldError>,
}

impl MappingError {
	/// Wrap collected problems, returning `None` when there are none.
	pub fn from_errors(errors: Vec<FieldError>) -> Option<Self> {
		if errors.is_empty() { None } else { Some(Self { errors }) }
	}

	/// Number of collected problems.
	pub fn len(&self) -> usize {
		self.errors.len()
	}

	/// Whether no problem was collected.
	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}
}

fn render_field_errors(errors: &[FieldError]) -> String {
	match errors {
		[] => "no mapping errors".to_owned(),
		[only] => only.to_string(),
		many => {
			let mut out = format!("{} mapping errors:", many.len());
			for item in many {
				out.push_str("\n  - ");
				out.push_str(&item.to_string());
			}
			out
		}
	}
}
