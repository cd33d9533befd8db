use crate::value::Value;

/// Failures raised by the function or class constructor behind a build.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
	#[error("expected {expected} argument(s), got {got}")]
	Arity { expected: usize, got: usize },

	#[error("argument {index}: expected {expected}, got {got}")]
	ArgumentType {
		index: usize,
		expected: &'static str,
		got: &'static str,
	},

	#[error("{0}")]
	Failed(String),

	#[error(transparent)]
	Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl InvocationError {
	/// Creates a free-form failure.
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}

	/// Fails unless exactly `expected` arguments were supplied.
	pub fn check_arity(args: &[Value], expected: usize) -> Result<(), Self> {
		if args.len() == expected {
			Ok(())
		} else {
			Err(Self::Arity {
				expected,
				got: args.len(),
			})
		}
	}

	/// Builds an [`InvocationError::ArgumentType`] for `args[index]`.
	pub fn argument_type(args: &[Value], index: usize, expected: &'static str) -> Self {
		Self::ArgumentType {
			index,
			expected,
			got: args.get(index).map_or("nothing", Value::type_name),
		}
	}
}

/// Errors raised while building an instance.
#[derive(Debug, thiserror::Error)]
pub enum ConstructError {
	/// The merged argument list has a hole below its highest slot.
	#[error("missing argument at slot {slot}")]
	ArgumentGap { slot: usize },

	/// The underlying function or class constructor failed.
	#[error(transparent)]
	Invocation(#[from] InvocationError),
}
