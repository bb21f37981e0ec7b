use std::path::PathBuf;

use propcodec::codec::{DecodeOptions, Typed, decode_with};

use crate::cmd::error::Result;
use crate::cmd::input::read_object;
use crate::cmd::schema_doc;
use crate::cmd::util::{FieldErrorJson, emit_json, field_errors_to_json, typed_to_json};

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	#[arg(long)]
	pub schema: PathBuf,
	#[arg(long)]
	pub root: Option<String>,
	#[arg(long)]
	pub tolerate_unknown: bool,
	#[arg(long)]
	pub tolerate_missing: bool,
	#[arg(long)]
	pub json: bool,
}

/// Decode a record object and print the typed value with every field problem.
pub fn run(args: Args) -> Result<()> {
	let Args {
		input,
		schema,
		root,
		tolerate_unknown,
		tolerate_missing,
		json,
	} = args;

	let loaded = schema_doc::load(&schema, root.as_deref())?;
	let object = read_object(&input)?;
	let options = DecodeOptions {
		ignore_unrecognized: tolerate_unknown,
		ignore_missing: tolerate_missing,
	};

	let decoded = decode_with(&loaded.schema, loaded.root, object, &options);
	let errors = decoded.errors.map(|errors| errors.errors).unwrap_or_default();
	let value = typed_to_json(&Typed::Record(decoded.value));

	if json {
		let payload = DecodeJson {
			path: input.display().to_string(),
			root: loaded.schema.record(loaded.root).type_name.to_string(),
			changes: decoded.encoder.changes().len(),
			value,
			errors: field_errors_to_json(&errors),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", input.display());
	println!("root: {}", loaded.schema.record(loaded.root).type_name);
	println!("changes: {}", decoded.encoder.changes().len());
	println!("errors: {}", errors.len());
	for error in &errors {
		println!("  {error}");
	}
	println!("value:");
	println!("{}", serde_json::to_string_pretty(&value)?);

	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	root: String,
	changes: usize,
	value: serde_json::Value,
	errors: Vec<FieldErrorJson>,
}
