use std::path::PathBuf;

use wright_constructor::ConstructError;

/// Errors raised while loading or applying a registry manifest.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse registry manifest: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("constructor {alias:?}: unknown function {name:?}")]
	UnknownFunction { alias: String, name: String },

	#[error("constructor {alias:?}: unknown class {name:?}")]
	UnknownClass { alias: String, name: String },

	#[error("constructor {alias:?}: set exactly one of `class`, `function` or `value`")]
	AmbiguousConstructor { alias: String },

	#[error("constructor {alias:?}: no `class`, `function` or `value` given")]
	MissingTarget { alias: String },
}

/// Generic registry error.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error(transparent)]
	Construct(#[from] ConstructError),

	#[error(transparent)]
	Config(#[from] ConfigError),
}
