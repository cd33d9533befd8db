//! Dynamically typed values flowing through constructors.
//!
//! Constructor targets, parameter values and build results are all [`Value`]s.
//! Functions and bound methods travel as [`Value::Callable`], built instances
//! as [`Value::Object`].

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::InvocationError;

type CallFn = dyn Fn(&[Value]) -> Result<Value, InvocationError> + Send + Sync;

/// An invokable function or bound method reference.
///
/// Cloning is cheap; clones share the same underlying function and compare
/// equal to each other.
#[derive(Clone)]
pub struct Callable {
	name: Arc<str>,
	func: Arc<CallFn>,
}

impl Callable {
	/// Wraps `func` under a display name used in logs and namespace lookups.
	pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
	where
		F: Fn(&[Value]) -> Result<Value, InvocationError> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			func: Arc::new(func),
		}
	}

	/// Returns the display name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Invokes the function with `args` as its positional argument list.
	pub fn call(&self, args: &[Value]) -> Result<Value, InvocationError> {
		(self.func)(args)
	}

	/// Returns true if both handles point at the same function.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.func, &other.func)
	}
}

impl fmt::Debug for Callable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Callable").field(&self.name).finish()
	}
}

/// An opaque instance produced by a class constructor.
#[derive(Clone)]
pub struct Object {
	class: Arc<str>,
	inner: Arc<dyn Any + Send + Sync>,
}

impl Object {
	/// Wraps `value` as an instance of `class`.
	pub fn new<T: Any + Send + Sync>(class: impl Into<Arc<str>>, value: T) -> Self {
		Self {
			class: class.into(),
			inner: Arc::new(value),
		}
	}

	/// Returns the class name this instance was built from.
	pub fn class(&self) -> &str {
		&self.class
	}

	/// Returns the wrapped value if it is a `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		(*self.inner).downcast_ref::<T>()
	}

	/// Returns true if the wrapped value is a `T`.
	pub fn is<T: Any>(&self) -> bool {
		(*self.inner).is::<T>()
	}

	/// Returns true if both handles share the same instance.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Object").field(&self.class).finish()
	}
}

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
	/// The empty value. Unset defaults resolve to this.
	#[default]
	Null,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
	/// Ordered list of values.
	List(Vec<Value>),
	/// String-keyed map of values.
	Map(BTreeMap<String, Value>),
	/// Invokable function reference.
	Callable(Callable),
	/// Built instance.
	Object(Object),
}

impl Value {
	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns true if this value can be invoked.
	pub fn is_invokable(&self) -> bool {
		matches!(self, Value::Callable(_))
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value, widening integers.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			Value::Int(v) => Some(*v as f64),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Value::Map(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_callable(&self) -> Option<&Callable> {
		match self {
			Value::Callable(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Value::Object(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::List(_) => "list",
			Value::Map(_) => "map",
			Value::Callable(_) => "callable",
			Value::Object(_) => "object",
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Float(a), Value::Float(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::List(a), Value::List(b)) => a == b,
			(Value::Map(a), Value::Map(b)) => a == b,
			(Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
			(Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
			_ => false,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::String(v) => write!(f, "{v:?}"),
			Value::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Value::Map(entries) => {
				f.write_str("{")?;
				for (i, (key, value)) in entries.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key} = {value}")?;
				}
				f.write_str("}")
			}
			Value::Callable(c) => write!(f, "<callable {}>", c.name()),
			Value::Object(o) => write!(f, "<object {}>", o.class()),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v.into())
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::List(v)
	}
}

impl From<BTreeMap<String, Value>> for Value {
	fn from(v: BTreeMap<String, Value>) -> Self {
		Value::Map(v)
	}
}

impl From<Callable> for Value {
	fn from(v: Callable) -> Self {
		Value::Callable(v)
	}
}

impl From<Object> for Value {
	fn from(v: Object) -> Self {
		Value::Object(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Value::Null, Into::into)
	}
}
