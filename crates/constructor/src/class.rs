//! Instantiable classes.
//!
//! A [`Class`] is the capability a class-backed constructor needs from a
//! type: whether it accepts constructor arguments, and how to build an
//! instance with and without them. [`ClassDef`] implements it from closures.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::InvocationError;
use crate::value::{Object, Value};

/// A type that can be instantiated by name.
pub trait Class: Send + Sync {
	/// Returns the class name used for lookups.
	fn name(&self) -> &str;

	/// Returns true if the class has a constructor taking arguments.
	fn has_parameterized_constructor(&self) -> bool {
		false
	}

	/// Builds an instance without arguments.
	fn construct_no_args(&self) -> Result<Value, InvocationError>;

	/// Builds an instance from positional arguments.
	///
	/// Only called when [`Class::has_parameterized_constructor`] is true.
	fn construct_with_args(&self, args: &[Value]) -> Result<Value, InvocationError> {
		let _ = args;
		self.construct_no_args()
	}
}

/// Builds an instance of `class` from already merged parameters.
///
/// Parameters are dropped when the class has no parameterized constructor.
pub(crate) fn instantiate(class: &dyn Class, parameters: &[Value]) -> Result<Value, InvocationError> {
	if parameters.is_empty() {
		return class.construct_no_args();
	}
	if class.has_parameterized_constructor() {
		return class.construct_with_args(parameters);
	}
	tracing::debug!(
		class = class.name(),
		dropped = parameters.len(),
		"class has no parameterized constructor; dropping parameters",
	);
	class.construct_no_args()
}

type NoArgsFn = dyn Fn() -> Result<Value, InvocationError> + Send + Sync;
type WithArgsFn = dyn Fn(&[Value]) -> Result<Value, InvocationError> + Send + Sync;

/// A [`Class`] assembled from constructor closures.
#[derive(Clone)]
pub struct ClassDef {
	name: Arc<str>,
	no_args: Arc<NoArgsFn>,
	with_args: Option<Arc<WithArgsFn>>,
}

impl ClassDef {
	/// Creates a class with only a no-argument constructor.
	pub fn new<F>(name: impl Into<Arc<str>>, no_args: F) -> Self
	where
		F: Fn() -> Result<Value, InvocationError> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			no_args: Arc::new(no_args),
			with_args: None,
		}
	}

	/// Creates a class whose instances are `T::default()` wrapped in an [`Object`].
	pub fn of<T>(name: impl Into<Arc<str>>) -> Self
	where
		T: Default + Any + Send + Sync,
	{
		let name = name.into();
		let class = name.clone();
		Self::new(name, move || Ok(Value::Object(Object::new(class.clone(), T::default()))))
	}

	/// Adds a constructor taking positional arguments.
	pub fn with_args<F>(mut self, with_args: F) -> Self
	where
		F: Fn(&[Value]) -> Result<Value, InvocationError> + Send + Sync + 'static,
	{
		self.with_args = Some(Arc::new(with_args));
		self
	}
}

impl Class for ClassDef {
	fn name(&self) -> &str {
		&self.name
	}

	fn has_parameterized_constructor(&self) -> bool {
		self.with_args.is_some()
	}

	fn construct_no_args(&self) -> Result<Value, InvocationError> {
		(self.no_args)()
	}

	fn construct_with_args(&self, args: &[Value]) -> Result<Value, InvocationError> {
		match &self.with_args {
			Some(with_args) => with_args(args),
			None => self.construct_no_args(),
		}
	}
}

impl fmt::Debug for ClassDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClassDef")
			.field("name", &self.name)
			.field("parameterized", &self.with_args.is_some())
			.finish()
	}
}
