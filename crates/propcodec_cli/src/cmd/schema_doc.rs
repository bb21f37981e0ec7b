use std::path::Path;
use std::sync::Arc;

use propcodec::codec::{CodecError, FieldShape, FieldTag, RecordId, Schema};
use serde::Deserialize;

use crate::cmd::error::{CliError, Result};
use crate::cmd::input::read_json;

/// Schema document: record declarations in JSON.
///
/// ```json
/// { "root": "Service", "records": [{ "name": "Service", "fields": [
///   { "name": "ports", "tag": "ports,optional", "shape": "[Port]" }
/// ] }] }
/// ```
#[derive(Debug, Deserialize)]
pub struct SchemaDoc {
	/// Default root record.
	#[serde(default)]
	pub root: Option<String>,
	/// Declared records, in any order.
	pub records: Vec<RecordDoc>,
}

/// One record declaration.
#[derive(Debug, Deserialize)]
pub struct RecordDoc {
	/// Record type name.
	pub name: String,
	/// Field declarations in order.
	#[serde(default)]
	pub fields: Vec<FieldDoc>,
}

/// One field declaration.
#[derive(Debug, Deserialize)]
pub struct FieldDoc {
	/// Host-side field name.
	pub name: String,
	/// Wire tag; absent means internal.
	#[serde(default)]
	pub tag: Option<String>,
	/// Provider tag.
	#[serde(default)]
	pub provider: Option<String>,
	/// Shape notation.
	pub shape: String,
}

/// Loaded schema and selected root record.
pub struct LoadedSchema {
	/// Built schema.
	pub schema: Arc<Schema>,
	/// Root record to decode against.
	pub root: RecordId,
}

impl SchemaDoc {
	/// Build the schema. Records are declared before any body so they may reference each other.
	pub fn build(&self) -> Result<Schema> {
		let mut builder = Schema::builder();
		let mut ids = Vec::with_capacity(self.records.len());
		for record in &self.records {
			ids.push(builder.declare(&record.name)?);
		}

		for (record, id) in self.records.iter().zip(ids) {
			let mut fields = Vec::with_capacity(record.fields.len());
			for field in &record.fields {
				let tag = FieldTag::parse(&field.name, field.tag.as_deref(), field.provider.as_deref())?;
				let shape = builder.parse_shape(&field.shape)?;
				fields.push(FieldShape::new(tag, shape));
			}
			builder.define(id, fields)?;
		}

		Ok(builder.build()?)
	}
}

/// Load a schema document and resolve the root record (`root` overrides the document's).
pub fn load(path: &Path, root: Option<&str>) -> Result<LoadedSchema> {
	let doc: SchemaDoc = serde_json::from_value(read_json(path)?)?;
	let schema = doc.build()?;

	let root_name = root.or(doc.root.as_deref()).ok_or(CliError::MissingRoot)?;
	let root = schema
		.record_by_name(root_name)
		.ok_or_else(|| CodecError::RecordNotFound { name: root_name.to_owned() })?;

	Ok(LoadedSchema {
		schema: Arc::new(schema),
		root,
	})
}

#[cfg(test)]
mod tests {
	use propcodec::codec::Shape;

	use super::SchemaDoc;

	#[test]
	fn builds_self_referential_records_declared_out_of_order() {
		let doc: SchemaDoc = serde_json::from_str(
			r#"{
				"records": [
					{ "name": "Node", "fields": [
						{ "name": "value", "tag": "value", "shape": "int" },
						{ "name": "next", "tag": "next,optional", "shape": "Node" },
						{ "name": "meta", "tag": "meta,optional", "shape": "Meta" },
						{ "name": "cache", "shape": "any" }
					] },
					{ "name": "Meta", "fields": [
						{ "name": "token", "tag": "token", "provider": "secret", "shape": "string" }
					] }
				]
			}"#,
		)
		.expect("document parses");
		let schema = doc.build().expect("schema builds");

		let node = schema.record_by_name("Node").expect("node record");
		let meta = schema.record_by_name("Meta").expect("meta record");
		let record = schema.record(node);
		assert_eq!(record.field("next").map(|field| &field.shape), Some(&Shape::Record(node)));
		assert_eq!(record.field("meta").map(|field| &field.shape), Some(&Shape::Record(meta)));
		assert!(record.field("cache").is_none(), "internal fields are not wire fields");
		assert!(schema.record(meta).field("token").is_some_and(|field| field.tag.secret));
	}

	#[test]
	fn rejects_provider_tag_without_wire_tag() {
		let doc: SchemaDoc = serde_json::from_str(
			r#"{ "records": [{ "name": "A", "fields": [{ "name": "x", "provider": "secret", "shape": "string" }] }] }"#,
		)
		.expect("document parses");
		assert!(doc.build().is_err());
	}
}
