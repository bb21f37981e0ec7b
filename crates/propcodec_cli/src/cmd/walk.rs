use std::path::PathBuf;

use propcodec::codec::{Value, simplify};

use crate::cmd::error::Result;
use crate::cmd::input::read_object;
use crate::cmd::schema_doc;
use crate::cmd::util::{ChangeJson, change_line, changes_to_json, emit_json};

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	#[arg(long)]
	pub schema: PathBuf,
	#[arg(long)]
	pub root: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Strip markers from a record object and print the stripped tree and change list.
pub fn run(args: Args) -> Result<()> {
	let Args { input, schema, root, json } = args;

	let loaded = schema_doc::load(&schema, root.as_deref())?;
	let object = read_object(&input)?;
	let (stripped, changes) = simplify(&loaded.schema, loaded.root, object);
	let stripped = Value::Object(stripped).to_json();

	if json {
		let payload = WalkJson {
			path: input.display().to_string(),
			root: loaded.schema.record(loaded.root).type_name.to_string(),
			stripped,
			changes: changes_to_json(&changes),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", input.display());
	println!("root: {}", loaded.schema.record(loaded.root).type_name);
	println!("changes: {}", changes.len());
	println!("path\tflags\tdependencies");
	for change in &changes {
		println!("{}", change_line(change));
	}
	println!("stripped:");
	println!("{}", serde_json::to_string_pretty(&stripped)?);

	Ok(())
}

#[derive(serde::Serialize)]
struct WalkJson {
	path: String,
	root: String,
	stripped: serde_json::Value,
	changes: Vec<ChangeJson>,
}
