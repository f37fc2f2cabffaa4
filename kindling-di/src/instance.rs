//! Pointer types used for injected instances.

use std::any::Any;
use std::error::Error;
use std::rc::Rc;

/// Shared pointer to an injected instance.
pub type InstancePtr<T> = Rc<T>;

/// Type-erased [InstancePtr], as stored in a [Container](crate::container::Container).
pub type InstanceAnyPtr = InstancePtr<dyn Any + 'static>;

/// Shared pointer to an error reported by user code, e.g. a failing constructor or hook.
pub type ErrorPtr = Rc<dyn Error + 'static>;
