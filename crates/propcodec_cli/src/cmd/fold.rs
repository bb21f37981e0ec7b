use std::path::PathBuf;

use crate::cmd::error::Result;
use crate::cmd::input::read_value;
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print the folded normal form of a wire tree.
pub fn run(args: Args) -> Result<()> {
	let Args { input, json } = args;

	let value = read_value(&input)?;
	let markers = value.contains_markers();
	let folded = value.fold_all().to_json();

	if json {
		let payload = FoldJson {
			path: input.display().to_string(),
			markers,
			folded,
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", input.display());
	println!("markers: {markers}");
	println!("{}", serde_json::to_string_pretty(&folded)?);

	Ok(())
}

#[derive(serde::Serialize)]
struct FoldJson {
	path: String,
	markers: bool,
	folded: serde_json::Value,
}
