//! Functions and classes every manifest can refer to.

use std::collections::BTreeMap;

use wright_constructor::{Callable, ClassDef, InvocationError, Namespace, Value};

/// Builds the namespace manifests are resolved against.
pub fn namespace() -> Namespace {
	let mut ns = Namespace::new();
	ns.define_function(Callable::new("upper", upper))
		.define_function(Callable::new("concat", concat))
		.define_function(Callable::new("list", |args| Ok(Value::List(args.to_vec()))))
		.define_function(Callable::new("sum", sum));
	ns.define_class(
		ClassDef::new("Map", || Ok(Value::Map(BTreeMap::new()))).with_args(map_from_pairs),
	)
	.define_class(
		ClassDef::new("List", || Ok(Value::List(Vec::new())))
			.with_args(|args| Ok(Value::List(args.to_vec()))),
	);
	ns
}

fn upper(args: &[Value]) -> Result<Value, InvocationError> {
	InvocationError::check_arity(args, 1)?;
	match &args[0] {
		Value::String(s) => Ok(Value::String(s.to_uppercase())),
		_ => Err(InvocationError::argument_type(args, 0, "string")),
	}
}

/// Joins arguments without separators; strings are taken unquoted.
fn concat(args: &[Value]) -> Result<Value, InvocationError> {
	let mut out = String::new();
	for arg in args {
		match arg {
			Value::String(s) => out.push_str(s),
			other => out.push_str(&other.to_string()),
		}
	}
	Ok(Value::String(out))
}

/// Integer sum, or float sum once any float is involved.
fn sum(args: &[Value]) -> Result<Value, InvocationError> {
	let mut int: i64 = 0;
	let mut float: Option<f64> = None;
	for (index, arg) in args.iter().enumerate() {
		match (arg, float.as_mut()) {
			(Value::Int(i), None) => {
				int = int
					.checked_add(*i)
					.ok_or_else(|| InvocationError::failed("integer overflow"))?;
			}
			(Value::Int(i), Some(acc)) => *acc += *i as f64,
			(Value::Float(f), None) => float = Some(int as f64 + f),
			(Value::Float(f), Some(acc)) => *acc += f,
			_ => return Err(InvocationError::argument_type(args, index, "number")),
		}
	}
	Ok(float.map_or(Value::Int(int), Value::Float))
}

/// `Map(key, value, ...)`: alternating string keys and values.
fn map_from_pairs(args: &[Value]) -> Result<Value, InvocationError> {
	if args.len() % 2 != 0 {
		return Err(InvocationError::failed(format!(
			"Map expects key/value pairs, got {} arguments",
			args.len()
		)));
	}
	let mut map = BTreeMap::new();
	for (index, pair) in args.chunks_exact(2).enumerate() {
		let key = pair[0]
			.as_str()
			.ok_or_else(|| InvocationError::argument_type(args, index * 2, "string"))?;
		map.insert(key.to_string(), pair[1].clone());
	}
	Ok(Value::Map(map))
}
