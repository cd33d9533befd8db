use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wright_constructor::Value;
use wright_registry::config::value_from_toml;

#[derive(Parser, Debug)]
#[command(name = "wright")]
#[command(about = "Inspect and build registry manifests")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List the constructors and values a manifest declares
	List {
		/// Registry manifest
		manifest: PathBuf,
	},
	/// Build an alias once and print the result
	Build(BuildArgs),
	/// Build an alias through the singleton cache and print the result
	Instance(BuildArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
	/// Registry manifest
	pub manifest: PathBuf,

	/// Constructor or value alias
	pub alias: String,

	/// Call-time arguments (`42`, `true`, `"text"`, `[1, 2]`; bare words are strings)
	#[arg(allow_hyphen_values = true)]
	pub args: Vec<String>,
}

impl BuildArgs {
	/// Parsed call-time arguments, in slot order.
	pub fn values(&self) -> Vec<Value> {
		self.args.iter().map(|raw| parse_argument(raw)).collect()
	}
}

/// Parses one command-line argument as a TOML value, falling back to a string.
pub fn parse_argument(raw: &str) -> Value {
	match toml::from_str::<toml::Table>(&format!("v = {raw}")) {
		Ok(mut table) if table.len() == 1 => table
			.remove("v")
			.map_or_else(|| Value::from(raw), value_from_toml),
		_ => Value::from(raw),
	}
}
