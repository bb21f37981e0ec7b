#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "propcodec", about = "Marker-preserving property codec tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Walk(cmd::walk::Args),
	Decode(cmd::decode::Args),
	Roundtrip(cmd::roundtrip::Args),
	Fold(cmd::fold::Args),
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cmd::error::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Walk(args) => cmd::walk::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Roundtrip(args) => cmd::roundtrip::run(args),
		Commands::Fold(args) => cmd::fold::run(args),
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).try_init();
}
