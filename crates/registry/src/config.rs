//! Declarative registry seeding from TOML.
//!
//! ```toml
//! [values]
//! greeting = "hello"
//!
//! [constructors.point]
//! class = "Point"
//! parameters = [1, { slot = 1, default = 0 }]
//!
//! [constructors.shout]
//! function = "upper"
//! parameters = [{ callback = "greeting" }]
//!
//! [constructors.answer]
//! value = 42
//! ```
//!
//! Each constructor names exactly one target: a namespace `class`, a namespace
//! `function`, or a literal `value`. Parameters are declared in array order;
//! plain entries take the lowest free slot, tables may pin a `slot`, a literal
//! `value`, a `default`, or a `callback` naming a namespace function.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use wright_constructor::{
	Callable, Constructor, Namespace, Parameter, Target, Value, lowest_unused_slot,
};

use crate::error::ConfigError;
use crate::registry::Registry;

/// Registry manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
	/// Values stored as is.
	#[serde(default)]
	pub values: BTreeMap<String, toml::Value>,
	/// Constructors keyed by alias.
	#[serde(default)]
	pub constructors: BTreeMap<String, ConstructorConfig>,
}

/// One constructor entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructorConfig {
	/// Namespace class to instantiate.
	pub class: Option<String>,
	/// Namespace function to invoke.
	pub function: Option<String>,
	/// Literal value handed back unchanged.
	pub value: Option<toml::Value>,
	/// Declared parameters.
	#[serde(default)]
	pub parameters: Vec<ParameterConfig>,
}

/// A declared parameter: a bare value or a detailed table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParameterConfig {
	Detailed(ParameterDetail),
	Plain(toml::Value),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDetail {
	/// Slot to declare at; the lowest free slot when omitted.
	pub slot: Option<usize>,
	pub value: Option<toml::Value>,
	pub default: Option<toml::Value>,
	/// Namespace function resolving the value when none is set.
	pub callback: Option<String>,
}

impl FromStr for RegistryConfig {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(toml::from_str(s)?)
	}
}

impl RegistryConfig {
	/// Reads and parses the manifest at `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let config = text.parse()?;
		tracing::debug!(path = %path.display(), "registry manifest loaded");
		Ok(config)
	}

	/// Resolves every constructor entry against `namespace`.
	fn resolve(&self, namespace: &Namespace) -> Result<Vec<(String, Constructor)>, ConfigError> {
		self.constructors
			.iter()
			.map(|(alias, entry)| Ok((alias.clone(), entry.resolve(alias, namespace)?)))
			.collect()
	}
}

impl ConstructorConfig {
	fn resolve(&self, alias: &str, namespace: &Namespace) -> Result<Constructor, ConfigError> {
		let target = match (&self.class, &self.function, &self.value) {
			(Some(name), None, None) => {
				let class = namespace.class(name).ok_or_else(|| ConfigError::UnknownClass {
					alias: alias.to_string(),
					name: name.clone(),
				})?;
				Target::Class(class.clone())
			}
			(None, Some(name), None) => Target::Callable(lookup_function(alias, name, namespace)?),
			(None, None, Some(value)) => Target::Value(value_from_toml(value.clone())),
			(None, None, None) => {
				return Err(ConfigError::MissingTarget {
					alias: alias.to_string(),
				});
			}
			_ => {
				return Err(ConfigError::AmbiguousConstructor {
					alias: alias.to_string(),
				});
			}
		};

		let constructor = Constructor::new(target);
		for parameter in &self.parameters {
			match parameter {
				ParameterConfig::Plain(value) => {
					constructor.push_value(value_from_toml(value.clone()));
				}
				ParameterConfig::Detailed(detail) => {
					declare_detailed(&constructor, detail, alias, namespace)?;
				}
			}
		}
		Ok(constructor)
	}
}

fn declare_detailed(
	constructor: &Constructor,
	detail: &ParameterDetail,
	alias: &str,
	namespace: &Namespace,
) -> Result<(), ConfigError> {
	let slot = detail
		.slot
		.unwrap_or_else(|| lowest_unused_slot(constructor.parameters().keys().copied()));
	let value = detail.value.clone().map(value_from_toml).unwrap_or_default();
	let default = detail.default.clone().map(value_from_toml).unwrap_or_default();
	let mut parameter = Parameter::with_default(slot, value, default);
	if let Some(name) = &detail.callback {
		parameter.set_callback(lookup_function(alias, name, namespace)?);
	}
	constructor.define_parameter(parameter);
	Ok(())
}

fn lookup_function(
	alias: &str,
	name: &str,
	namespace: &Namespace,
) -> Result<Callable, ConfigError> {
	namespace
		.function(name)
		.cloned()
		.ok_or_else(|| ConfigError::UnknownFunction {
			alias: alias.to_string(),
			name: name.to_string(),
		})
}

/// Converts a TOML value into a [`Value`]. Datetimes become strings.
pub fn value_from_toml(value: toml::Value) -> Value {
	match value {
		toml::Value::String(s) => Value::String(s),
		toml::Value::Integer(i) => Value::Int(i),
		toml::Value::Float(f) => Value::Float(f),
		toml::Value::Boolean(b) => Value::Bool(b),
		toml::Value::Datetime(d) => Value::String(d.to_string()),
		toml::Value::Array(items) => Value::List(items.into_iter().map(value_from_toml).collect()),
		toml::Value::Table(table) => Value::Map(
			table
				.into_iter()
				.map(|(key, value)| (key, value_from_toml(value)))
				.collect(),
		),
	}
}

impl Registry {
	/// Creates a registry over `namespace` seeded from `config`.
	pub fn from_config(namespace: Namespace, config: &RegistryConfig) -> Result<Self, ConfigError> {
		let registry = Self::with_namespace(namespace);
		registry.apply_config(config)?;
		Ok(registry)
	}

	/// Seeds values and constructors from `config`.
	///
	/// Every constructor is resolved before anything is stored, so an unknown
	/// name leaves the registry untouched.
	pub fn apply_config(&self, config: &RegistryConfig) -> Result<(), ConfigError> {
		let constructors = self.resolve_config(config)?;
		for (name, value) in &config.values {
			self.set(name.clone(), value_from_toml(value.clone()));
		}
		for (alias, constructor) in constructors {
			self.set_constructor(alias, Arc::new(constructor));
		}
		tracing::debug!(
			values = config.values.len(),
			constructors = config.constructors.len(),
			"registry manifest applied",
		);
		Ok(())
	}

	fn resolve_config(&self, config: &RegistryConfig) -> Result<Vec<(String, Constructor)>, ConfigError> {
		config.resolve(&self.namespace())
	}
}
