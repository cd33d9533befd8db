//! Positional parameters with lazy value resolution.

use crate::error::InvocationError;
use crate::value::{Callable, Value};

/// Resolution policy for one positional argument.
///
/// A parameter resolves, in order, to its stored value, to the result of its
/// callback, or to its default. The default of a fresh parameter is
/// [`Value::Null`].
///
/// The slot is fixed at creation. Moving a parameter means producing a copy
/// with [`Parameter::clone_to`].
#[derive(Debug, Clone)]
pub struct Parameter {
	slot: usize,
	value: Option<Value>,
	callback: Option<Callable>,
	default: Value,
}

impl Parameter {
	/// Creates a parameter with nothing to resolve but a null default.
	pub fn new(slot: usize) -> Self {
		Self {
			slot,
			value: None,
			callback: None,
			default: Value::Null,
		}
	}

	/// Creates a parameter from a value that may be a callback.
	///
	/// An invokable `value` becomes the callback and leaves the stored value
	/// empty. Any other non-null `value` is stored as is.
	pub fn with_value(slot: usize, value: impl Into<Value>) -> Self {
		Self::with_default(slot, value, Value::Null)
	}

	/// Like [`Parameter::with_value`], also setting the default.
	///
	/// The default is stored verbatim even when it is invokable.
	pub fn with_default(slot: usize, value: impl Into<Value>, default: impl Into<Value>) -> Self {
		let mut parameter = Self::new(slot);
		match value.into() {
			Value::Callable(callback) => parameter.callback = Some(callback),
			value => parameter.set_value(value),
		}
		parameter.default = default.into();
		parameter
	}

	/// Returns the slot.
	pub fn slot(&self) -> usize {
		self.slot
	}

	/// Stores an explicit value. Storing [`Value::Null`] clears it.
	pub fn set_value(&mut self, value: impl Into<Value>) {
		self.value = Some(value.into()).filter(|v| !v.is_null());
	}

	/// Clears the stored value, reactivating callback and default resolution.
	pub fn unset_value(&mut self) {
		self.value = None;
	}

	pub fn has_value(&self) -> bool {
		self.value.is_some()
	}

	pub fn set_default(&mut self, default: impl Into<Value>) {
		self.default = default.into();
	}

	/// Resets the default to [`Value::Null`].
	pub fn unset_default(&mut self) {
		self.default = Value::Null;
	}

	pub fn default_value(&self) -> &Value {
		&self.default
	}

	/// Installs `callback` if it is invokable.
	///
	/// Anything else is ignored: the call is a no-op and the parameter keeps
	/// its previous callback. Returns whether the callback was installed.
	pub fn set_callback(&mut self, callback: impl Into<Value>) -> bool {
		match callback.into() {
			Value::Callable(callback) => {
				self.callback = Some(callback);
				true
			}
			_ => false,
		}
	}

	pub fn unset_callback(&mut self) {
		self.callback = None;
	}

	pub fn has_callback(&self) -> bool {
		self.callback.is_some()
	}

	/// Resolves the parameter.
	///
	/// `extra` is forwarded to the callback and ignored otherwise. Only a
	/// failing callback produces an error.
	pub fn value(&self, extra: &[Value]) -> Result<Value, InvocationError> {
		if let Some(value) = &self.value {
			return Ok(value.clone());
		}
		if let Some(callback) = &self.callback {
			return callback.call(extra);
		}
		Ok(self.default.clone())
	}

	/// Returns a copy of this parameter bound to `slot`.
	pub fn clone_to(&self, slot: usize) -> Self {
		Self {
			slot,
			..self.clone()
		}
	}
}
