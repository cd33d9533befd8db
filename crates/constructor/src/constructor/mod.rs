//! Constructors: a target plus declared positional parameters.
//!
//! Building an instance runs in two steps:
//!
//! 1. [`Constructor::build_parameters`] merges call-time [`Arguments`] with the
//!    declared [`Parameter`]s into one contiguous list.
//! 2. [`Constructor::build_instance`] hands that list to the [`Target`].
//!
//! # Merge rules
//!
//! Declared parameters are visited once in ascending slot order. Each one
//! replaces the call-time argument at its slot with its resolved value; the
//! replaced argument, if any, is passed to the parameter's callback. A value
//! or default therefore overrides what the caller supplied at that slot.
//!
//! After merging, the occupied slots must be exactly `0..n`. The first hole
//! aborts the build with [`ConstructError::ArgumentGap`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{
	MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use crate::arguments::Arguments;
use crate::class::Class;
use crate::error::ConstructError;
use crate::parameter::Parameter;
use crate::slots::lowest_unused_slot;
use crate::value::{Callable, Value};

mod target;

pub use target::{ConstructorKind, Target};

/// Knows how to produce instances of its [`Target`] on demand.
///
/// Parameter declarations go through `&self`; the parameter map sits behind a
/// read/write lock so a shared constructor can be declared on and built from
/// several threads. Builds resolve parameters from a snapshot taken under the
/// read lock, so callbacks may declare parameters on the same constructor.
pub struct Constructor {
	target: Target,
	parameters: RwLock<BTreeMap<usize, Parameter>>,
}

impl Constructor {
	pub fn new(target: impl Into<Target>) -> Self {
		Self {
			target: target.into(),
			parameters: RwLock::new(BTreeMap::new()),
		}
	}

	/// Creates a constructor that hands back `value` unchanged.
	pub fn identity(value: impl Into<Value>) -> Self {
		Self::new(Target::Value(value.into()))
	}

	/// Creates a constructor that invokes `callable`.
	pub fn callable(callable: Callable) -> Self {
		Self::new(Target::Callable(callable))
	}

	/// Creates a constructor that instantiates `class`.
	pub fn class(class: Arc<dyn Class>) -> Self {
		Self::new(Target::Class(class))
	}

	pub fn target(&self) -> &Target {
		&self.target
	}

	pub fn kind(&self) -> ConstructorKind {
		self.target.kind()
	}

	/// Declares `parameter` at its own slot, replacing any parameter there.
	pub fn define_parameter(&self, parameter: Parameter) -> &Self {
		let slot = parameter.slot();
		let replaced = self.parameters.write().insert(slot, parameter).is_some();
		tracing::debug!(constructor = %self.target, slot, replaced, "parameter defined");
		self
	}

	/// Declares a parameter from a value, which may be a callback.
	///
	/// Without an explicit `slot` the parameter takes the lowest free slot,
	/// not the slot after the highest one.
	pub fn define_value(
		&self,
		value: impl Into<Value>,
		slot: Option<usize>,
		default: Option<Value>,
	) -> &Self {
		let value = value.into();
		let mut parameters = self.parameters.write();
		let slot = slot.unwrap_or_else(|| lowest_unused_slot(parameters.keys().copied()));
		let parameter = Parameter::with_default(slot, value, default.unwrap_or_default());
		let replaced = parameters.insert(slot, parameter).is_some();
		drop(parameters);
		tracing::debug!(constructor = %self.target, slot, replaced, "parameter defined");
		self
	}

	/// Declares a parameter at the lowest free slot.
	pub fn push_value(&self, value: impl Into<Value>) -> &Self {
		self.define_value(value, None, None)
	}

	/// Returns the live parameter map.
	///
	/// The guard blocks declarations until dropped.
	pub fn parameters(&self) -> RwLockReadGuard<'_, BTreeMap<usize, Parameter>> {
		self.parameters.read()
	}

	/// Returns the parameter declared at `slot`.
	pub fn parameter(&self, slot: usize) -> Option<MappedRwLockReadGuard<'_, Parameter>> {
		RwLockReadGuard::try_map(self.parameters.read(), |p| p.get(&slot)).ok()
	}

	/// Returns the parameter declared at `slot` for in-place adjustment.
	pub fn parameter_mut(&self, slot: usize) -> Option<MappedRwLockWriteGuard<'_, Parameter>> {
		RwLockWriteGuard::try_map(self.parameters.write(), |p| p.get_mut(&slot)).ok()
	}

	pub fn remove_parameter(&self, slot: usize) -> Option<Parameter> {
		self.parameters.write().remove(&slot)
	}

	pub fn clear_parameters(&self) {
		self.parameters.write().clear();
	}

	/// Merges call-time arguments with declared parameters.
	pub fn build_parameters(&self, args: impl Into<Arguments>) -> Result<Vec<Value>, ConstructError> {
		let mut args = args.into();
		let declared: Vec<Parameter> = self.parameters.read().values().cloned().collect();

		for parameter in &declared {
			let slot = parameter.slot();
			let extra: Vec<Value> = args.take(slot).into_iter().collect();
			let value = parameter.value(&extra)?;
			args.insert(slot, value);
		}

		let missing = lowest_unused_slot(args.slots());
		if missing != args.len() {
			tracing::trace!(constructor = %self.target, slot = missing, "argument gap");
			return Err(ConstructError::ArgumentGap { slot: missing });
		}

		tracing::trace!(
			constructor = %self.target,
			declared = declared.len(),
			merged = args.len(),
			"parameters built",
		);
		Ok(args.into_values())
	}

	/// Produces an instance from an already merged parameter list.
	pub fn build_instance(&self, parameters: &[Value]) -> Result<Value, ConstructError> {
		Ok(self.target.build_instance(parameters)?)
	}

	/// Builds an instance from declared parameters only.
	pub fn instantiate(&self) -> Result<Value, ConstructError> {
		self.instantiate_from(Arguments::new())
	}

	/// Builds an instance from call-time arguments merged with declared parameters.
	pub fn instantiate_from(&self, args: impl Into<Arguments>) -> Result<Value, ConstructError> {
		let parameters = self.build_parameters(args)?;
		self.build_instance(&parameters)
	}
}

impl fmt::Debug for Constructor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let slots: Vec<usize> = self.parameters.read().keys().copied().collect();
		f.debug_struct("Constructor")
			.field("target", &self.target)
			.field("slots", &slots)
			.finish()
	}
}
