use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use wright_registry::{
	Arguments, Callable, ClassDef, ConstructError, Constructor, ConstructorKind, Namespace, Object,
	Registry, RegistryError, Value,
};

/// Array-backed object: `ArrayObject(entries)` keeps the given map.
#[derive(Debug, Default, PartialEq)]
struct ArrayObject {
	entries: BTreeMap<String, Value>,
}

#[derive(Debug, Default)]
struct StdClass;

fn namespace() -> Namespace {
	let mut ns = Namespace::new();
	ns.define_class(ClassDef::of::<ArrayObject>("ArrayObject").with_args(|args| {
		let entries = match args.first() {
			Some(Value::Map(entries)) => entries.clone(),
			_ => BTreeMap::new(),
		};
		Ok(Value::Object(Object::new("ArrayObject", ArrayObject { entries })))
	}));
	ns.define_class(ClassDef::of::<StdClass>("StdClass"));
	ns.define_function(Callable::new("upper", |args| {
		Ok(Value::String(
			args.first().and_then(Value::as_str).unwrap_or_default().to_uppercase(),
		))
	}));
	ns
}

fn registry() -> Registry {
	Registry::with_namespace(namespace())
}

fn props(key: &str, value: &str) -> Value {
	Value::Map(BTreeMap::from([(key.to_string(), Value::from(value))]))
}

fn entries(value: &Value) -> &BTreeMap<String, Value> {
	&value
		.as_object()
		.and_then(Object::downcast_ref::<ArrayObject>)
		.expect("ArrayObject instance")
		.entries
}

#[test]
fn set_and_get_values() {
	let registry = registry();
	registry.set("property1", "value");
	assert_eq!(registry.get_or("property1", false), Value::from("value"));
	assert_eq!(registry.get("property1"), Some(Value::from("value")));
}

#[test]
fn get_returns_default_for_missing() {
	let registry = registry();
	assert_eq!(registry.get_or("property2", false), Value::Bool(false));
	assert_eq!(registry.get("property2"), None);
}

#[test]
fn update_changes_the_stored_value() {
	let registry = registry();
	registry.set("property1", "value");
	assert!(registry.update("property1", |v| *v = Value::from("value1")));
	assert_eq!(registry.get("property1"), Some(Value::from("value1")));
	assert!(!registry.update("missing", |_| unreachable!()));
}

#[test]
fn update_uses_values_read_beforehand() {
	let registry = registry();
	registry.set("greeting", "hello");
	registry.set("name", "world");
	let greeting = registry.get_or("greeting", "");
	assert!(registry.update("name", |v| {
		*v = Value::from(format!("{} {}", greeting.as_str().unwrap_or_default(), v.as_str().unwrap_or_default()));
	}));
	assert_eq!(registry.get("name"), Some(Value::from("hello world")));
}

#[test]
fn concurrent_updates_are_not_lost() {
	let registry = Arc::new(registry());
	registry.set("counter", 0);
	let handles: Vec<_> = (0..8)
		.map(|_| {
			let registry = registry.clone();
			std::thread::spawn(move || {
				for _ in 0..100 {
					registry.update("counter", |v| {
						if let Value::Int(n) = v {
							*n += 1;
						}
					});
				}
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}
	assert_eq!(registry.get("counter"), Some(Value::Int(800)));
}

#[test]
fn namespace_additions_classify_after_the_guard_drops() {
	let registry = registry();
	assert!(!registry.namespace().has_function("lower"));
	registry
		.namespace_mut()
		.define_function(Callable::new("lower", |args| {
			Ok(Value::String(
				args.first().and_then(Value::as_str).unwrap_or_default().to_lowercase(),
			))
		}));
	assert!(registry.namespace().has_function("lower"));
	let constructor = registry.set_constructor("quiet", "lower");
	assert_eq!(constructor.kind(), ConstructorKind::Callable);
	assert_eq!(
		registry.construct("quiet", vec![Value::from("HUSH")]).unwrap(),
		Some(Value::from("hush"))
	);
}

#[test]
fn has_reports_presence() {
	let registry = registry();
	registry.set("property1", "value");
	assert!(registry.has("property1"));
	assert!(!registry.has("property2"));
}

#[test]
fn null_values_read_as_absent() {
	let registry = registry();
	registry.set("property1", Value::Null);
	assert!(!registry.has("property1"));
	assert_eq!(registry.get_or("property1", 1), Value::Int(1));
}

#[test]
fn del_is_idempotent() {
	let registry = registry();
	registry.set("property1", "value");
	assert!(registry.has("property1"));
	registry.del("property1");
	assert!(!registry.has("property1"));
	assert_eq!(registry.del("property1"), None);
	assert!(!registry.has("property1"));
}

#[test]
fn construct_without_constructor_is_none() {
	let registry = registry();
	assert!(registry.construct("Registry test", Arguments::new()).unwrap().is_none());
}

#[test]
fn class_constructor_builds_without_arguments() {
	let registry = registry();
	registry.set_constructor("Registry test", "ArrayObject");
	let value = registry.construct("Registry test", Arguments::new()).unwrap().unwrap();
	assert!(entries(&value).is_empty());
}

#[test]
fn constructor_presence_and_removal() {
	let registry = registry();
	registry.set_constructor("Registry test", "ArrayObject");
	assert!(registry.has_constructor("Registry test"));
	assert!(!registry.has_constructor("constructor"));
	registry.del_constructor("Registry test");
	assert!(!registry.has_constructor("Registry test"));
	assert!(registry.del_constructor("Registry test").is_none());
}

#[test]
fn class_constructor_builds_with_arguments() {
	let registry = registry();
	registry.set_constructor("Registry test", "ArrayObject");
	let value = registry
		.construct("Registry test", vec![props("prop", "val"), Value::Int(2)])
		.unwrap()
		.unwrap();
	assert_eq!(entries(&value).get("prop"), Some(&Value::from("val")));
}

#[test]
fn get_constructor_returns_registered_instance() {
	let registry = registry();
	let registered = registry.set_constructor("Registry test", "ArrayObject");
	let constructor = registry.get_constructor("Registry test").unwrap();
	assert!(Arc::ptr_eq(&registered, &constructor));
	assert_eq!(constructor.kind(), ConstructorKind::Class);
	assert!(entries(&constructor.instantiate().unwrap()).is_empty());

	registry.del_constructor("Registry test");
	assert!(registry.get_constructor("Registry test").is_none());
}

#[test]
fn spec_classification_goes_through_the_namespace() {
	let registry = registry();
	assert_eq!(registry.set_constructor("a", "upper").kind(), ConstructorKind::Callable);
	assert_eq!(registry.set_constructor("b", "StdClass").kind(), ConstructorKind::Class);
	assert_eq!(registry.set_constructor("c", "nothing").kind(), ConstructorKind::Identity);
	assert_eq!(registry.set_constructor("d", Value::Int(5)).kind(), ConstructorKind::Identity);

	let existing = Arc::new(Constructor::identity("x"));
	assert!(Arc::ptr_eq(&registry.set_constructor("e", existing.clone()), &existing));
	assert_eq!(registry.constructor_names(), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn declared_parameters_apply_to_registry_builds() {
	let registry = registry();
	registry.set_constructor("shout", "upper").push_value(Value::Null);
	registry
		.get_constructor("shout")
		.unwrap()
		.parameter_mut(0)
		.unwrap()
		.set_default("quiet");
	let value = registry.construct("shout", Arguments::new()).unwrap();
	assert_eq!(value, Some(Value::from("QUIET")));
}

#[test]
fn instance_returns_existing_value() {
	let registry = registry();
	registry.set("property1", "value");
	assert_eq!(
		registry.instance("property1", Arguments::new()).unwrap(),
		Some(Value::from("value"))
	);
}

#[test]
fn instance_without_value_or_constructor_is_none() {
	let registry = registry();
	registry.del("property1");
	assert_eq!(registry.instance("property1", Arguments::new()).unwrap(), None);
	assert!(!registry.has("property1"));
}

#[test]
fn instance_is_built_once_and_cached() {
	let registry = registry();
	let name = "Registry test";
	registry.set_constructor(name, "ArrayObject");

	let first = registry
		.instance(name, vec![props("prop", "val0"), Value::Int(2)])
		.unwrap()
		.unwrap();
	assert_eq!(registry.get(name), Some(first.clone()));
	assert_eq!(entries(&first).get("prop"), Some(&Value::from("val0")));

	let second = registry
		.instance(name, vec![props("prop", "val1"), Value::Int(2)])
		.unwrap()
		.unwrap();
	assert_eq!(second, first);
	assert_eq!(entries(&second).get("prop"), Some(&Value::from("val0")));
}

#[test]
fn instance_runs_the_constructor_once() {
	let registry = registry();
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = calls.clone();
	registry.set_constructor(
		"counted",
		Callable::new("counted", move |_| {
			Ok(Value::Int(counter.fetch_add(1, Ordering::SeqCst) as i64))
		}),
	);
	for _ in 0..3 {
		assert_eq!(registry.instance("counted", Arguments::new()).unwrap(), Some(Value::Int(0)));
	}
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn build_errors_surface_and_cache_nothing() {
	let registry = registry();
	registry.set_constructor("gappy", "upper");
	let err = registry
		.instance("gappy", Arguments::sparse([(1, "x")]))
		.unwrap_err();
	assert!(matches!(
		err,
		RegistryError::Construct(ConstructError::ArgumentGap { slot: 0 })
	));
	assert_eq!(err.to_string(), "missing argument at slot 0");
	assert!(!registry.has("gappy"));
}

#[test]
fn clear_keeps_the_namespace() {
	let registry = registry();
	registry.set("v", 1);
	registry.set_constructor("c", "StdClass");
	registry.clear();
	assert!(registry.value_names().is_empty());
	assert!(registry.constructor_names().is_empty());
	assert!(registry.namespace().has_class("StdClass"));
}

#[test]
fn global_registry_is_shared() {
	Registry::global().set("global test", "shared");
	assert_eq!(Registry::global().get("global test"), Some(Value::from("shared")));
	Registry::global().del("global test");
	assert!(!Registry::global().has("global test"));
}
