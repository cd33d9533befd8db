use std::collections::BTreeMap;

use crate::value::Value;

/// Call-time arguments indexed by slot.
///
/// Positional lists convert into a packed `0..n` set; [`Arguments::sparse`]
/// allows holes, which [`crate::Constructor::build_parameters`] fills from
/// declared parameters or rejects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
	slots: BTreeMap<usize, Value>,
}

impl Arguments {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds arguments from explicit `(slot, value)` pairs.
	pub fn sparse<I, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (usize, V)>,
		V: Into<Value>,
	{
		Self {
			slots: entries.into_iter().map(|(slot, v)| (slot, v.into())).collect(),
		}
	}

	/// Sets the argument at `slot`, returning the previous one.
	pub fn insert(&mut self, slot: usize, value: impl Into<Value>) -> Option<Value> {
		self.slots.insert(slot, value.into())
	}

	pub fn get(&self, slot: usize) -> Option<&Value> {
		self.slots.get(&slot)
	}

	/// Removes and returns the argument at `slot`.
	pub fn take(&mut self, slot: usize) -> Option<Value> {
		self.slots.remove(&slot)
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Occupied slots in ascending order.
	pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
		self.slots.keys().copied()
	}

	/// Values in ascending slot order.
	pub fn into_values(self) -> Vec<Value> {
		self.slots.into_values().collect()
	}
}

impl From<Vec<Value>> for Arguments {
	fn from(values: Vec<Value>) -> Self {
		Self {
			slots: values.into_iter().enumerate().collect(),
		}
	}
}

impl<const N: usize> From<[Value; N]> for Arguments {
	fn from(values: [Value; N]) -> Self {
		Self {
			slots: values.into_iter().enumerate().collect(),
		}
	}
}

impl FromIterator<Value> for Arguments {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self {
			slots: iter.into_iter().enumerate().collect(),
		}
	}
}
