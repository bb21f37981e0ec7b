use std::path::PathBuf;

use propcodec::codec::{DecodeOptions, Value, decode_with};
use tracing::info;

use crate::cmd::error::Result;
use crate::cmd::input::read_object;
use crate::cmd::schema_doc;
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	#[arg(long)]
	pub schema: PathBuf,
	#[arg(long)]
	pub root: Option<String>,
	/// Re-emit computed values as known outputs.
	#[arg(long)]
	pub no_unknowns: bool,
	#[arg(long)]
	pub tolerate_unknown: bool,
	#[arg(long)]
	pub json: bool,
}

/// Decode a record object, encode it again, and report whether the wire tree survived.
pub fn run(args: Args) -> Result<()> {
	let Args {
		input,
		schema,
		root,
		no_unknowns,
		tolerate_unknown,
		json,
	} = args;

	let loaded = schema_doc::load(&schema, root.as_deref())?;
	let object = read_object(&input)?;
	let original = Value::Object(object.clone());
	let options = DecodeOptions {
		ignore_unrecognized: tolerate_unknown,
		ignore_missing: false,
	};

	let (encoder, value) = decode_with(&loaded.schema, loaded.root, object, &options).into_result()?;
	let encoder = encoder.allow_unknown(!no_unknowns);
	let encoded = Value::Object(encoder.encode(&value)?);

	let equivalent = encoded.deep_equals(&original);
	let encoded = encoded.to_json();
	let identical = encoded == original.to_json();
	info!(identical, equivalent, changes = encoder.changes().len(), "round trip finished");

	if json {
		let payload = RoundtripJson {
			path: input.display().to_string(),
			root: loaded.schema.record(loaded.root).type_name.to_string(),
			changes: encoder.changes().len(),
			identical,
			equivalent,
			encoded,
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", input.display());
	println!("root: {}", loaded.schema.record(loaded.root).type_name);
	println!("changes: {}", encoder.changes().len());
	println!("identical: {identical}");
	println!("equivalent: {equivalent}");
	println!("encoded:");
	println!("{}", serde_json::to_string_pretty(&encoded)?);

	Ok(())
}

#[derive(serde::Serialize)]
struct RoundtripJson {
	path: String,
	root: String,
	changes: usize,
	identical: bool,
	equivalent: bool,
	encoded: serde_json::Value,
}
