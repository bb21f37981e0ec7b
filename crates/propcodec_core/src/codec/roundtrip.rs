use std::sync::Arc;

use tracing::debug;

use crate::codec::asset::flatten_assets;
use crate::codec::decode::decode_record;
use crate::codec::encode::encode_record;
use crate::codec::{ChangeList, DecodeOptions, MappingError, Object, Record, RecordId, Schema, Value, simplify};

/// Output of one decode call.
#[derive(Debug)]
pub struct Decoded {
	/// Encoder holding the stripped markers; pass the mutated value back to it.
	pub encoder: Encoder,
	/// Decoded record. Fields with problems are left at their zero value.
	pub value: Record,
	/// Every field problem found, if any.
	pub errors: Option<MappingError>,
}

impl Decoded {
	/// Split into encoder and value, failing when any field problem was found.
	pub fn into_result(self) -> Result<(Encoder, Record), MappingError> {
		match self.errors {
			Some(errors) => Err(errors),
			None => Ok((self.encoder, self.value)),
		}
	}
}

/// Re-encodes records and restores the markers stripped by the paired decode.
#[derive(Debug, Clone)]
pub struct Encoder {
	schema: Arc<Schema>,
	changes: ChangeList,
}

impl Encoder {
	/// Pair a schema with a change list. An empty list encodes without replay.
	pub fn new(schema: Arc<Schema>, changes: ChangeList) -> Self {
		Self { schema, changes }
	}

	/// Schema records are encoded against.
	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	/// Changes replayed after encoding.
	pub fn changes(&self) -> &ChangeList {
		&self.changes
	}

	/// Encoder whose replay keeps (`true`) or clears (`false`) computed markers.
	pub fn allow_unknown(&self, allow: bool) -> Encoder {
		Self {
			schema: Arc::clone(&self.schema),
			changes: self.changes.allow_unknown(allow),
		}
	}

	/// Encode `record` and replay the stripped markers onto the result.
	///
	/// # Panics
	///
	/// Panics when `record` is not of the type this encoder's changes were recorded for, or
	/// when an asset-or-archive holds both arms.
	pub fn encode(&self, record: &Record) -> Result<Object, MappingError> {
		if let Some(root) = self.changes.root_type() {
			assert_eq!(root, record.type_name(), "encoder used with a record of another type");
		}

		let (object, errors) = encode_record(&self.schema, record);
		if let Some(errors) = MappingError::from_errors(errors) {
			debug!(record = record.type_name(), errors = errors.len(), "encode failed");
			return Err(errors);
		}

		let flattened = match flatten_assets(Value::Object(object)) {
			Value::Object(object) => object,
			_ => Object::new(),
		};
		let replayed = self.changes.replay_object(flattened);
		debug!(record = record.type_name(), changes = self.changes.len(), "encoded record");
		Ok(replayed)
	}
}

/// Decode strictly: missing required fields and unknown keys are errors.
///
/// # Panics
///
/// Panics when `root` was issued by another schema.
pub fn decode(schema: &Arc<Schema>, root: RecordId, object: Object) -> Decoded {
	decode_with(schema, root, object, &DecodeOptions::default())
}

/// Decode a configuration object, tolerating unknown keys.
///
/// # Panics
///
/// Panics when `root` was issued by another schema.
pub fn decode_config(schema: &Arc<Schema>, root: RecordId, object: Object) -> Decoded {
	decode_with(schema, root, object, &DecodeOptions::for_config())
}

/// Decode a partial object, tolerating missing required fields.
///
/// # Panics
///
/// Panics when `root` was issued by another schema.
pub fn decode_tolerate_missing(schema: &Arc<Schema>, root: RecordId, object: Object) -> Decoded {
	decode_with(schema, root, object, &DecodeOptions::tolerate_missing())
}

/// Strip markers from `object` and decode it into a record of type `root`.
///
/// # Panics
///
/// Panics when `root` was issued by another schema.
pub fn decode_with(schema: &Arc<Schema>, root: RecordId, object: Object, options: &DecodeOptions) -> Decoded {
	let (stripped, changes) = simplify(schema, root, object);
	let (value, errors) = decode_record(schema, root, &stripped, options);
	debug!(
		record = value.type_name(),
		changes = changes.len(),
		errors = errors.len(),
		"decoded record"
	);
	Decoded {
		encoder: Encoder::new(Arc::clone(schema), changes),
		value,
		errors: MappingError::from_errors(errors),
	}
}
