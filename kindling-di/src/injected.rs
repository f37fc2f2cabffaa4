//! Callables with injected parameters.
//!
//! An [Injected] callable pairs a body with an explicit, ordered manifest of the dependency tags it
//! needs. The [Container](crate::container::Container) resolves each tag and passes the results to
//! the body as positional [Arguments].

use crate::component::Component;
use crate::error::ContainerError;
use crate::instance::{InstanceAnyPtr, InstancePtr};
use derivative::Derivative;
use std::any::type_name;
use std::rc::Rc;

/// Body of an [Injected] callable.
pub type InjectedFn<R> = dyn Fn(&Arguments) -> Result<R, ContainerError>;

/// Conversion from a resolved, type-erased dependency into a typed argument.
pub trait FromArgument: Sized {
    fn from_argument(tag: &str, value: InstanceAnyPtr) -> Result<Self, ContainerError>;
}

impl<T: 'static> FromArgument for InstancePtr<T> {
    fn from_argument(tag: &str, value: InstanceAnyPtr) -> Result<Self, ContainerError> {
        value
            .downcast::<T>()
            .map_err(|_| ContainerError::IncompatibleValue {
                tag: tag.to_string(),
                expected: type_name::<T>().to_string(),
            })
    }
}

/// Resolved dependencies, in the order declared by a callable.
#[derive(Clone, Debug)]
pub struct Arguments {
    tags: Rc<[String]>,
    values: Vec<InstanceAnyPtr>,
}

impl Arguments {
    /// Creates arguments from parallel lists of tags and their resolved values.
    pub fn new(tags: Rc<[String]>, values: Vec<InstanceAnyPtr>) -> Self {
        debug_assert_eq!(tags.len(), values.len());
        Self { tags, values }
    }

    /// Returns the argument at given position converted to the requested type.
    pub fn get<P: FromArgument>(&self, index: usize) -> Result<P, ContainerError> {
        match (self.tags.get(index), self.values.get(index)) {
            (Some(tag), Some(value)) => P::from_argument(tag, value.clone()),
            _ => Err(ContainerError::ArgumentOutOfRange {
                index,
                available: self.values.len(),
            }),
        }
    }

    #[inline]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A callable with an explicit manifest of the dependency tags it takes.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct Injected<R> {
    name: String,
    parameters: Rc<[String]>,
    #[derivative(Debug = "ignore")]
    body: Rc<InjectedFn<R>>,
}

impl<R: 'static> Injected<R> {
    /// Creates a new callable. Parameter tags are validated when the callable is registered or
    /// called.
    pub fn new<N, P, F>(name: N, parameters: P, body: F) -> Self
    where
        N: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        F: Fn(&Arguments) -> Result<R, ContainerError> + 'static,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            body: Rc::new(body),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Calls the body with already resolved arguments.
    pub fn invoke(&self, arguments: &Arguments) -> Result<R, ContainerError> {
        (self.body)(arguments)
    }

    /// Returns a callable with the same manifest, transforming the result with `f`.
    pub fn map<U, F>(self, f: F) -> Injected<U>
    where
        U: 'static,
        F: Fn(R) -> U + 'static,
    {
        let body = self.body;
        Injected {
            name: self.name,
            parameters: self.parameters,
            body: Rc::new(move |arguments: &Arguments| body(arguments).map(&f)),
        }
    }

    pub(crate) fn erase(self) -> Injected<InstanceAnyPtr> {
        self.map(|value| InstancePtr::new(value) as InstanceAnyPtr)
    }

    pub(crate) fn shared_parameters(&self) -> Rc<[String]> {
        self.parameters.clone()
    }
}

impl<T: 'static> Injected<InstancePtr<T>> {
    pub(crate) fn erase_ptr(self) -> Injected<InstanceAnyPtr> {
        self.map(|value| value as InstanceAnyPtr)
    }
}

impl<T: Component> Injected<T> {
    /// Creates a callable constructing the given [Component].
    pub fn component() -> Self {
        Self::new(T::name(), T::parameters().iter().copied(), T::create)
    }
}
