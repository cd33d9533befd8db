use std::fmt;
use std::sync::Arc;

use crate::class::{self, Class};
use crate::error::InvocationError;
use crate::value::{Callable, Value};

/// What a constructor instantiates, decided once when it is created.
#[derive(Clone)]
pub enum Target {
	/// Plain value handed back unchanged.
	Value(Value),
	/// Function invoked with the merged parameters.
	Callable(Callable),
	/// Class instantiated with the merged parameters.
	Class(Arc<dyn Class>),
}

/// Kind tag reported by [`Target::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructorKind {
	Identity,
	Callable,
	Class,
}

impl fmt::Display for ConstructorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ConstructorKind::Identity => "identity",
			ConstructorKind::Callable => "callable",
			ConstructorKind::Class => "class",
		})
	}
}

impl Target {
	pub fn kind(&self) -> ConstructorKind {
		match self {
			Target::Value(_) => ConstructorKind::Identity,
			Target::Callable(_) => ConstructorKind::Callable,
			Target::Class(_) => ConstructorKind::Class,
		}
	}

	/// Produces an instance from a merged, contiguous parameter list.
	///
	/// A value target ignores the parameters and returns itself. Failures of
	/// the underlying function or class are returned untouched.
	pub fn build_instance(&self, parameters: &[Value]) -> Result<Value, InvocationError> {
		match self {
			Target::Value(value) => Ok(value.clone()),
			Target::Callable(callable) => callable.call(parameters),
			Target::Class(class) => class::instantiate(class.as_ref(), parameters),
		}
	}
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Target::Value(value) => write!(f, "{value}"),
			Target::Callable(callable) => f.write_str(callable.name()),
			Target::Class(class) => f.write_str(class.name()),
		}
	}
}

impl fmt::Debug for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Target::Value(value) => f.debug_tuple("Value").field(value).finish(),
			Target::Callable(callable) => f.debug_tuple("Callable").field(&callable.name()).finish(),
			Target::Class(class) => f.debug_tuple("Class").field(&class.name()).finish(),
		}
	}
}

impl From<Value> for Target {
	fn from(value: Value) -> Self {
		Target::Value(value)
	}
}

impl From<Callable> for Target {
	fn from(callable: Callable) -> Self {
		Target::Callable(callable)
	}
}

impl From<Arc<dyn Class>> for Target {
	fn from(class: Arc<dyn Class>) -> Self {
		Target::Class(class)
	}
}
