//! Named values and constructors.
//!
//! The registry keeps two independent tables: plain values and
//! [`Constructor`]s, both keyed by alias. [`Registry::instance`] ties them
//! together as a singleton cache: the first call builds through the alias's
//! constructor and stores the result as a value under the same alias.

use std::sync::{Arc, LazyLock};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap as HashMap;
use wright_constructor::{Arguments, Constructor, Namespace, Spec, Value};

use crate::error::RegistryError;

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Alias-keyed store of values and constructors.
///
/// Every method takes `&self`. The tables sit behind locks only so a registry
/// can live in a `static`; a sequence of calls is not atomic.
///
/// Values are returned by clone. [`Value::Object`] and [`Value::Callable`]
/// clones share their instance, everything else is a copy; use
/// [`Registry::update`] to change a stored value in place.
#[derive(Default)]
pub struct Registry {
	namespace: RwLock<Namespace>,
	values: RwLock<HashMap<String, Value>>,
	constructors: RwLock<HashMap<String, Arc<Constructor>>>,
}

impl Registry {
	/// Creates an empty registry with an empty namespace.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry resolving names against `namespace`.
	pub fn with_namespace(namespace: Namespace) -> Self {
		Self {
			namespace: RwLock::new(namespace),
			..Self::default()
		}
	}

	/// Returns the process-wide registry.
	pub fn global() -> &'static Registry {
		&GLOBAL
	}

	/// Returns the namespace used to classify constructor specs.
	///
	/// The guard holds the namespace lock. Drop it before calling
	/// [`Registry::set_constructor`] or [`Registry::apply_config`] on the same
	/// thread: both take the lock again, which deadlocks once a writer queues.
	pub fn namespace(&self) -> RwLockReadGuard<'_, Namespace> {
		self.namespace.read()
	}

	/// Returns the namespace for registering functions and classes.
	///
	/// Any registry call that classifies a spec deadlocks while this guard is
	/// alive on the same thread.
	pub fn namespace_mut(&self) -> RwLockWriteGuard<'_, Namespace> {
		self.namespace.write()
	}

	/// Stores `value` under `name`, replacing any previous value.
	pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
		let name = name.into();
		tracing::trace!(name = %name, "value set");
		self.values.write().insert(name, value.into());
	}

	/// Returns the value stored under `name`.
	///
	/// A stored [`Value::Null`] reads as absent.
	pub fn get(&self, name: &str) -> Option<Value> {
		self.values
			.read()
			.get(name)
			.filter(|v| !v.is_null())
			.cloned()
	}

	/// Returns the value stored under `name`, or `default`.
	pub fn get_or(&self, name: &str, default: impl Into<Value>) -> Value {
		self.get(name).unwrap_or_else(|| default.into())
	}

	/// Returns true if a non-null value is stored under `name`.
	pub fn has(&self, name: &str) -> bool {
		self.values.read().get(name).is_some_and(|v| !v.is_null())
	}

	/// Removes the value stored under `name`. Missing names are ignored.
	pub fn del(&self, name: &str) -> Option<Value> {
		self.values.write().remove(name)
	}

	/// Applies `f` to the value stored under `name`.
	///
	/// Returns false, without calling `f`, if nothing is stored.
	///
	/// `f` runs under the value table's write lock, so the update is atomic
	/// with respect to other value calls. `f` must not call back into this
	/// registry's value methods (`get`, `set`, `instance`, ...): the lock is
	/// not reentrant and the call deadlocks. Read what `f` needs beforehand.
	pub fn update(&self, name: &str, f: impl FnOnce(&mut Value)) -> bool {
		match self.values.write().get_mut(name) {
			Some(value) => {
				f(value);
				true
			}
			None => false,
		}
	}

	/// Names of stored values, sorted.
	pub fn value_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.values.read().keys().cloned().collect();
		names.sort_unstable();
		names
	}

	/// Classifies `spec` and registers the constructor under `name`.
	///
	/// Returns the registered constructor so parameters can be declared on it.
	pub fn set_constructor(&self, name: impl Into<String>, spec: impl Into<Spec>) -> Arc<Constructor> {
		let name = name.into();
		let constructor = self.namespace.read().from_spec(spec);
		tracing::debug!(name = %name, kind = %constructor.kind(), "constructor registered");
		self.constructors.write().insert(name, constructor.clone());
		constructor
	}

	/// Returns the constructor registered under `name`.
	pub fn get_constructor(&self, name: &str) -> Option<Arc<Constructor>> {
		self.constructors.read().get(name).cloned()
	}

	pub fn has_constructor(&self, name: &str) -> bool {
		self.constructors.read().contains_key(name)
	}

	/// Unregisters the constructor under `name`. Missing names are ignored.
	pub fn del_constructor(&self, name: &str) -> Option<Arc<Constructor>> {
		self.constructors.write().remove(name)
	}

	/// Aliases with a registered constructor, sorted.
	pub fn constructor_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.constructors.read().keys().cloned().collect();
		names.sort_unstable();
		names
	}

	/// Builds through the constructor registered under `name`.
	///
	/// Returns `Ok(None)` if no constructor is registered.
	pub fn construct(
		&self,
		name: &str,
		args: impl Into<Arguments>,
	) -> Result<Option<Value>, RegistryError> {
		let Some(constructor) = self.get_constructor(name) else {
			tracing::trace!(name, "no constructor registered");
			return Ok(None);
		};
		Ok(Some(constructor.instantiate_from(args)?))
	}

	/// Returns the singleton stored under `name`, building it on first use.
	///
	/// An existing value is returned as is and `args` are ignored. Otherwise
	/// the alias's constructor is built with `args` and the result stored.
	/// Returns `Ok(None)` if there is neither a value nor a constructor.
	///
	/// The constructor runs without holding any registry lock. If another
	/// caller stores a value first, that value wins and is returned.
	pub fn instance(
		&self,
		name: &str,
		args: impl Into<Arguments>,
	) -> Result<Option<Value>, RegistryError> {
		if let Some(value) = self.get(name) {
			return Ok(Some(value));
		}
		let Some(built) = self.construct(name, args)? else {
			return Ok(None);
		};

		let mut values = self.values.write();
		if let Some(existing) = values.get(name).filter(|v| !v.is_null()) {
			return Ok(Some(existing.clone()));
		}
		values.insert(name.to_string(), built.clone());
		tracing::debug!(name, kind = built.type_name(), "instance cached");
		Ok(Some(built))
	}

	/// Drops every value and constructor. The namespace is kept.
	pub fn clear(&self) {
		self.values.write().clear();
		self.constructors.write().clear();
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("values", &self.value_names())
			.field("constructors", &self.constructor_names())
			.finish()
	}
}
