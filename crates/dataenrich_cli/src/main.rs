#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "dataenrich", about = "Resolve node trees built from JSON documents")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Apply the built-in processors (`<copy>`, `<upper>`), resolve every node and print the JSON.
	Resolve {
		path: PathBuf,
		/// Maximum aggregate nesting depth while resolving; unlimited when omitted.
		#[arg(long)]
		max_depth: Option<u32>,
		/// Print single-line JSON.
		#[arg(long)]
		compact: bool,
		/// Skip the built-in processors; only node references and pending values are resolved.
		#[arg(long)]
		raw: bool,
	},
	/// List nodes that carry an instruction property, with its resolved value.
	Instructions {
		path: PathBuf,
		/// Instruction property name, e.g. `<ref>`.
		#[arg(long)]
		property: String,
	},
}

fn main() {
	env_logger::init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cmd::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Resolve { path, max_depth, compact, raw } => cmd::resolve::run(path, max_depth, compact, raw),
		Commands::Instructions { path, property } => cmd::instructions::run(path, property),
	}
}
