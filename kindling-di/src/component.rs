//! Components are types which a [Container](crate::container::Container) knows how to construct.
//!
//! A component declares the ordered list of dependency tags its constructor needs and creates
//! itself from the resolved [Arguments], passed positionally in the declared order. With the
//! `derive` feature, the implementation can be generated by putting `#[component]` on an `impl`
//! block - parameter names of the `new` constructor become the dependency tags:
//!
//! ```
//! use kindling_di::component;
//! use kindling_di::component::Component;
//! use kindling_di::instance::InstancePtr;
//!
//! struct Database;
//!
//! struct UserRepository {
//!     database: InstancePtr<Database>,
//! }
//!
//! #[component]
//! impl UserRepository {
//!     fn table_name(&self) -> &str {
//!         "users"
//!     }
//!
//!     fn new(database: InstancePtr<Database>) -> Self {
//!         Self { database }
//!     }
//! }
//!
//! assert_eq!(UserRepository::parameters(), ["database"]);
//! assert_eq!(UserRepository::name(), "user_repository");
//! ```
//!
//! The constructor can be fallible by returning `Result<Self, E>`, where `E` is an
//! [Error](std::error::Error); such errors are reported as
//! [ContainerError::Construction](crate::ContainerError::Construction). An `impl` block without a
//! `new` function describes a component with no dependencies, created with `Default::default()`.

use crate::error::ContainerError;
use crate::injected::Arguments;
use std::any::type_name;
use std::borrow::Cow;

/// Base trait for constructible components.
pub trait Component: Sized + 'static {
    /// Dependency tags required by [Component::create], in positional order.
    fn parameters() -> &'static [&'static str];

    /// Creates an instance from resolved dependencies, ordered as [Component::parameters].
    fn create(arguments: &Arguments) -> Result<Self, ContainerError>;

    /// Human-readable name used in logs and errors.
    fn name() -> Cow<'static, str> {
        Cow::Borrowed(type_name::<Self>())
    }
}
