//! Alias registry built on [`wright_constructor`].
//!
//! A [`Registry`] stores named values and named constructors, and memoizes
//! singleton instances on top of both. [`Registry::global`] is the
//! process-wide instance; independent registries can be created freely.
//!
//! Registries can be seeded from a TOML manifest, see [`config`].

pub mod config;
pub mod error;
pub mod registry;

pub use config::{ConstructorConfig, ParameterConfig, ParameterDetail, RegistryConfig};
pub use error::{ConfigError, RegistryError};
pub use registry::Registry;
pub use wright_constructor::{
	Arguments, Callable, Class, ClassDef, ConstructError, Constructor, ConstructorKind,
	InvocationError, Namespace, Object, Parameter, Spec, Value,
};
