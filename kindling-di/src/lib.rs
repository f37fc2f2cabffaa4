//! A dependency injection container resolving dependencies by name.
//!
//! Every dependency is identified by a string *tag*. Tags are bound to provisioning strategies in a
//! [Container](container::Container):
//!
//! * values - a single, already created instance, returned as-is on every resolution,
//! * factories - [Injected](injected::Injected) callables invoked on every resolution,
//! * classes - [Component](component::Component) types constructed on every resolution,
//! * singletons - components constructed once, on first resolution, and cached afterwards.
//!
//! Callables and components declare their dependencies as an ordered list of parameter tags. With
//! the `derive` feature, the list is generated from parameter names: the `#[component]` attribute
//! reflects the `new` constructor of an `impl` block, while `injected!` reflects a closure.
//!
//! ```
//! use kindling_di::container::{Container, Locals};
//! use kindling_di::instance::InstancePtr;
//! use kindling_di::{component, injected};
//!
//! struct Greeter {
//!     greeting: InstancePtr<String>,
//! }
//!
//! #[component]
//! impl Greeter {
//!     fn new(greeting: InstancePtr<String>) -> Self {
//!         Self { greeting }
//!     }
//! }
//!
//! let container = Container::new();
//! container.register_value("greeting", "Hello".to_string()).unwrap();
//! container.register_class::<Greeter>("greeter").unwrap();
//!
//! let greeter = container.resolve::<Greeter>("greeter", &Locals::default()).unwrap();
//! assert_eq!(*greeter.greeting, "Hello");
//!
//! let shout = injected!(|greeting: InstancePtr<String>| greeting.to_uppercase());
//! assert_eq!(container.call(&shout, &Locals::default()).unwrap(), "HELLO");
//! ```
//!
//! ### Features
//!
//! * `derive` - `#[component]` and `injected!` macros

pub mod component;
pub mod container;
mod error;
pub mod future;
pub mod injected;
pub mod instance;

pub use error::ContainerError;
pub use kindling_reflect as reflect;

#[cfg(feature = "derive")]
pub use kindling_di_derive::{component, injected};
