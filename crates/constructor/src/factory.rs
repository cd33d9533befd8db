//! Classifying constructor specs.
//!
//! [`Namespace::from_spec`] turns an arbitrary [`Spec`] into a [`Constructor`]
//! of the matching kind. Names are resolved against the namespace's function
//! and class tables. The first matching rule wins:
//!
//! 1. An existing constructor is returned as is.
//! 2. A callable, or a string naming a function, yields a callable constructor.
//! 3. A string naming a class yields a class constructor.
//! 4. Anything else yields an identity constructor over the value.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::class::Class;
use crate::constructor::{Constructor, Target};
use crate::value::{Callable, Value};

/// Input to constructor classification.
#[derive(Debug, Clone)]
pub enum Spec {
	/// An already built constructor.
	Constructor(Arc<Constructor>),
	/// A callable, a function or class name, or a plain value.
	Value(Value),
}

impl From<Arc<Constructor>> for Spec {
	fn from(constructor: Arc<Constructor>) -> Self {
		Spec::Constructor(constructor)
	}
}

impl From<Constructor> for Spec {
	fn from(constructor: Constructor) -> Self {
		Spec::Constructor(Arc::new(constructor))
	}
}

impl From<Value> for Spec {
	fn from(value: Value) -> Self {
		Spec::Value(value)
	}
}

impl From<Callable> for Spec {
	fn from(callable: Callable) -> Self {
		Spec::Value(Value::Callable(callable))
	}
}

impl From<&str> for Spec {
	fn from(name: &str) -> Self {
		Spec::Value(Value::from(name))
	}
}

impl From<String> for Spec {
	fn from(name: String) -> Self {
		Spec::Value(Value::String(name))
	}
}

/// Named functions and classes that specs may refer to.
#[derive(Clone, Default)]
pub struct Namespace {
	functions: HashMap<String, Callable>,
	classes: HashMap<String, Arc<dyn Class>>,
}

impl Namespace {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `callable` under its own name.
	pub fn define_function(&mut self, callable: Callable) -> &mut Self {
		self.functions.insert(callable.name().to_string(), callable);
		self
	}

	/// Registers `class` under its own name.
	pub fn define_class(&mut self, class: impl Class + 'static) -> &mut Self {
		self.define_shared_class(Arc::new(class))
	}

	pub fn define_shared_class(&mut self, class: Arc<dyn Class>) -> &mut Self {
		self.classes.insert(class.name().to_string(), class);
		self
	}

	pub fn function(&self, name: &str) -> Option<&Callable> {
		self.functions.get(name)
	}

	pub fn class(&self, name: &str) -> Option<&Arc<dyn Class>> {
		self.classes.get(name)
	}

	pub fn has_function(&self, name: &str) -> bool {
		self.functions.contains_key(name)
	}

	pub fn has_class(&self, name: &str) -> bool {
		self.classes.contains_key(name)
	}

	/// Function names, sorted.
	pub fn function_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Class names, sorted.
	pub fn class_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Returns the constructor matching `spec`.
	pub fn from_spec(&self, spec: impl Into<Spec>) -> Arc<Constructor> {
		let value = match spec.into() {
			Spec::Constructor(constructor) => return constructor,
			Spec::Value(value) => value,
		};
		let target = match value {
			Value::Callable(callable) => Target::Callable(callable),
			Value::String(name) => {
				if let Some(callable) = self.functions.get(&name) {
					Target::Callable(callable.clone())
				} else if let Some(class) = self.classes.get(&name) {
					Target::Class(class.clone())
				} else {
					Target::Value(Value::String(name))
				}
			}
			value => Target::Value(value),
		};
		tracing::trace!(kind = %target.kind(), spec = %target, "spec classified");
		Arc::new(Constructor::new(target))
	}
}

impl fmt::Debug for Namespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Namespace")
			.field("functions", &self.function_names())
			.field("classes", &self.class_names())
			.finish()
	}
}

/// Classifies `spec` against an empty namespace.
///
/// Strings are never resolved as names here, so only existing constructors,
/// callables and plain values are distinguished.
pub fn from(spec: impl Into<Spec>) -> Arc<Constructor> {
	Namespace::new().from_spec(spec)
}
