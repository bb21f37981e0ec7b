//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use propcodec::codec::{
	ASSET_SIG, FieldShape, FieldTag, OUTPUT_SIG, Object, RecordId, SECRET_SIG, SIG_KEY, Schema, Shape, UNKNOWN_VALUE, Value,
};
use serde_json::{Map, json};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// JSON secret wrapping `value`.
pub fn secret(value: serde_json::Value) -> serde_json::Value {
	json!({ SIG_KEY: SECRET_SIG, "value": value })
}

/// JSON unknown sentinel.
pub fn unknown() -> serde_json::Value {
	serde_json::Value::String(UNKNOWN_VALUE.to_owned())
}

/// JSON output; `value == None` means not known.
pub fn output(value: Option<serde_json::Value>, secret: bool, dependencies: &[&str]) -> serde_json::Value {
	let mut out = Map::new();
	out.insert(SIG_KEY.to_owned(), OUTPUT_SIG.into());
	if let Some(value) = value {
		out.insert("value".to_owned(), value);
	}
	if secret {
		out.insert("secret".to_owned(), true.into());
	}
	if !dependencies.is_empty() {
		out.insert("dependencies".to_owned(), dependencies.iter().map(|dep| serde_json::Value::from(*dep)).collect());
	}
	serde_json::Value::Object(out)
}

/// JSON text asset.
pub fn text_asset(text: &str) -> serde_json::Value {
	json!({ SIG_KEY: ASSET_SIG, "text": text })
}

/// Parse a JSON object into a wire object, panicking on anything else.
pub fn wire_object(json: serde_json::Value) -> Object {
	match Value::from_json(&json).expect("fixture json maps to a wire value") {
		Value::Object(object) => object,
		other => panic!("fixture is not an object: {other:?}"),
	}
}

/// `Args { s: string, n: int }`.
pub fn args_schema() -> (Arc<Schema>, RecordId) {
	let mut builder = Schema::builder();
	let args = builder
		.record(
			"Args",
			vec![
				FieldShape::new(FieldTag::required("s"), Shape::String),
				FieldShape::new(FieldTag::required("n"), Shape::Int),
			],
		)
		.expect("args record");
	(Arc::new(builder.build().expect("args schema builds")), args)
}

/// Service-like record with nested records, collections, an asset, and a self link.
pub fn service_schema() -> (Arc<Schema>, RecordId) {
	let mut builder = Schema::builder();
	let port = builder
		.record(
			"Port",
			vec![
				FieldShape::new(FieldTag::required("number"), Shape::Int),
				FieldShape::new(FieldTag::optional("protocol"), Shape::String),
			],
		)
		.expect("port record");
	let service = builder.declare("Service").expect("declare service");
	builder
		.define(
			service,
			vec![
				FieldShape::new(FieldTag::required("name"), Shape::String),
				FieldShape::new(FieldTag::required("replicas"), Shape::Int),
				FieldShape::new(FieldTag::optional("ports"), Shape::array(Shape::Record(port))),
				FieldShape::new(FieldTag::optional("labels"), Shape::map(Shape::String)),
				FieldShape::new(FieldTag::optional("password").with_secret(), Shape::String),
				FieldShape::new(FieldTag::optional("weight"), Shape::Float),
				FieldShape::new(FieldTag::optional("enabled"), Shape::Bool),
				FieldShape::new(FieldTag::optional("bundle"), Shape::AssetOrArchive),
				FieldShape::new(FieldTag::optional("config"), Shape::Any),
				FieldShape::new(FieldTag::optional("parent"), Shape::Record(service)),
				FieldShape::new(FieldTag::internal("generation"), Shape::Int),
			],
		)
		.expect("define service");
	(Arc::new(builder.build().expect("service schema builds")), service)
}
