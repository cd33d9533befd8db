//! Wright command line.
//!
//! Loads a registry manifest against the built-in demo namespace and either
//! lists what it declares or builds one alias.

use std::path::Path;

use anyhow::Context as _;
use clap::Parser;
use cli::{BuildArgs, Cli, Command};
use wright_registry::{Registry, RegistryConfig};

mod cli;
mod demo;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	match cli.command {
		Command::List { manifest } => {
			let registry = open(&manifest)?;
			for line in describe(&registry) {
				println!("{line}");
			}
		}
		Command::Build(args) => build(&args, false)?,
		Command::Instance(args) => build(&args, true)?,
	}
	Ok(())
}

fn open(manifest: &Path) -> anyhow::Result<Registry> {
	let config = RegistryConfig::load(manifest)?;
	let registry = Registry::from_config(demo::namespace(), &config)
		.with_context(|| format!("invalid manifest {}", manifest.display()))?;
	tracing::debug!(manifest = %manifest.display(), "registry ready");
	Ok(registry)
}

fn build(args: &BuildArgs, memoize: bool) -> anyhow::Result<()> {
	let registry = open(&args.manifest)?;
	let values = args.values();
	tracing::debug!(alias = %args.alias, args = values.len(), memoize, "building");

	let built = if memoize {
		registry.instance(&args.alias, values)
	} else {
		registry.construct(&args.alias, values)
	}
	.with_context(|| format!("failed to build {:?}", args.alias))?;

	match built {
		Some(value) => println!("{value}"),
		None if memoize => anyhow::bail!("no constructor or value named {:?}", args.alias),
		None => anyhow::bail!("no constructor named {:?}", args.alias),
	}
	Ok(())
}

/// One line per constructor (alias, kind, declared slots), then one per value.
fn describe(registry: &Registry) -> Vec<String> {
	let mut lines = Vec::new();
	for alias in registry.constructor_names() {
		let Some(constructor) = registry.get_constructor(&alias) else {
			continue;
		};
		let slots: Vec<String> = constructor
			.parameters()
			.keys()
			.map(ToString::to_string)
			.collect();
		lines.push(format!("{alias}\t{}\t[{}]", constructor.kind(), slots.join(", ")));
	}
	for name in registry.value_names() {
		if let Some(value) = registry.get(&name) {
			lines.push(format!("{name} = {value}"));
		}
	}
	lines
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("WRIGHT_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("wright_constructor=trace,wright_registry=trace,debug")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
