//! Constructors that produce instances on demand.
//!
//! A [`Constructor`] pairs a [`Target`] (a plain value, a function, or a
//! class) with positional [`Parameter`]s. Parameters resolve lazily: an
//! explicit value, else a callback, else a default. At build time they are
//! merged with call-time [`Arguments`] into one contiguous argument list.
//!
//! [`Namespace::from_spec`] classifies an arbitrary [`Spec`] into the right
//! kind of constructor.
//!
//! ```ignore
//! let mut ns = Namespace::new();
//! ns.define_function(Callable::new("greet", |args| {
//!     Ok(Value::String(format!("hello {}", args[0].as_str().unwrap_or("?"))))
//! }));
//!
//! let greet = ns.from_spec("greet");
//! greet.define_value(Value::Null, None, Some(Value::from("world")));
//! assert_eq!(greet.instantiate()?, Value::from("hello world"));
//! ```

pub mod arguments;
pub mod class;
pub mod constructor;
pub mod error;
pub mod factory;
pub mod parameter;
pub mod slots;
pub mod value;

pub use arguments::Arguments;
pub use class::{Class, ClassDef};
pub use constructor::{Constructor, ConstructorKind, Target};
pub use error::{ConstructError, InvocationError};
pub use factory::{Namespace, Spec, from};
pub use parameter::Parameter;
pub use slots::lowest_unused_slot;
pub use value::{Callable, Object, Value};
