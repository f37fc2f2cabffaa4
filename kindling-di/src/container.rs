//! Tag-keyed registry of bindings and the resolution engine.
//!
//! Resolution of a tag follows an explicit branch on the kind of its binding:
//!
//! 1. a [Singleton](BindingKind::Singleton) which has already been constructed always yields the
//! cached instance, regardless of local overrides,
//! 2. otherwise, a matching entry in [Locals] takes precedence,
//! 3. otherwise, the registered binding provides the value.
//!
//! Dependencies of factories and classes are resolved recursively with the same locals, while
//! singletons are always constructed from the registry alone. Tags whose provider is currently
//! running are tracked, so dependency cycles are reported as errors rather than overflowing the
//! stack.

use crate::component::Component;
use crate::error::ContainerError;
use crate::injected::{Arguments, FromArgument, Injected};
use crate::instance::{InstanceAnyPtr, InstancePtr};
use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Tag under which every container registers a [ContainerRef] to itself.
pub const CONTAINER_TAG: &str = "container";

/// Provisioning strategy of a binding.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindingKind {
    /// The same instance is returned on every resolution.
    Value,
    /// A callable is invoked on every resolution.
    Factory,
    /// A component is constructed on every resolution.
    Class,
    /// A component is constructed on first resolution and cached.
    Singleton,
}

#[derive(Clone)]
enum Binding {
    Value(InstanceAnyPtr),
    Factory(Injected<InstanceAnyPtr>),
    Class(Injected<InstanceAnyPtr>),
    Singleton(Injected<InstanceAnyPtr>),
}

impl Binding {
    fn kind(&self) -> BindingKind {
        match self {
            Binding::Value(_) => BindingKind::Value,
            Binding::Factory(_) => BindingKind::Factory,
            Binding::Class(_) => BindingKind::Class,
            Binding::Singleton(_) => BindingKind::Singleton,
        }
    }
}

/// Per-call overrides, taking precedence over registered bindings.
#[derive(Clone, Default, Debug)]
pub struct Locals {
    values: FxHashMap<String, InstanceAnyPtr>,
}

impl Locals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override holding `value`.
    pub fn with<T: 'static>(self, tag: impl Into<String>, value: T) -> Self {
        self.with_ptr(tag, InstancePtr::new(value) as InstanceAnyPtr)
    }

    /// Adds an override holding an existing instance.
    pub fn with_ptr(mut self, tag: impl Into<String>, value: InstanceAnyPtr) -> Self {
        self.values.insert(tag.into(), value);
        self
    }

    #[inline]
    pub fn get(&self, tag: &str) -> Option<&InstanceAnyPtr> {
        self.values.get(tag)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Default)]
struct Registry {
    bindings: FxHashMap<String, Binding>,
    // default bindings which can still be replaced by explicit registration
    replaceable_tags: FxHashSet<String>,
    singletons: FxHashMap<String, InstanceAnyPtr>,
    tags_under_construction: Vec<String>,
}

/// Dependency injection container. Cloning the container yields another handle to the same
/// bindings.
#[derive(Clone)]
pub struct Container {
    registry: Rc<RefCell<Registry>>,
}

/// Non-owning reference to a [Container], available for injection under [CONTAINER_TAG].
#[derive(Clone, Debug)]
pub struct ContainerRef {
    registry: Weak<RefCell<Registry>>,
}

impl ContainerRef {
    /// Returns the referenced container, if it's still alive.
    pub fn upgrade(&self) -> Option<Container> {
        self.registry
            .upgrade()
            .map(|registry| Container { registry })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("tags", &self.tags())
            .finish()
    }
}

impl Container {
    /// Creates a container with the default [CONTAINER_TAG] binding, which can be replaced once by
    /// registering another binding under the same tag.
    pub fn new() -> Self {
        let container = Self {
            registry: Default::default(),
        };
        container.register_default_bindings();
        container
    }

    fn register_default_bindings(&self) {
        let reference = ContainerRef {
            registry: Rc::downgrade(&self.registry),
        };

        let mut registry = self.registry.borrow_mut();
        registry.bindings.insert(
            CONTAINER_TAG.to_string(),
            Binding::Value(InstancePtr::new(reference) as InstanceAnyPtr),
        );
        registry.replaceable_tags.insert(CONTAINER_TAG.to_string());
    }

    /// Binds `tag` to an exact value. Every resolution returns the same instance.
    pub fn register_value<T: 'static>(
        &self,
        tag: impl Into<String>,
        value: T,
    ) -> Result<(), ContainerError> {
        self.register_value_ptr(tag, InstancePtr::new(value))
    }

    /// Binds `tag` to an existing instance.
    pub fn register_value_ptr<T: 'static>(
        &self,
        tag: impl Into<String>,
        value: InstancePtr<T>,
    ) -> Result<(), ContainerError> {
        self.insert(tag.into(), Binding::Value(value as InstanceAnyPtr))
    }

    /// Binds `tag` to a callable invoked with injected dependencies on every resolution. The
    /// result is wrapped in a new [InstancePtr], so a callable returning `InstancePtr<T>` resolves
    /// as `InstancePtr<InstancePtr<T>>`. Use [Container::register_factory_ptr] for such callables.
    pub fn register_factory<T: 'static>(
        &self,
        tag: impl Into<String>,
        factory: Injected<T>,
    ) -> Result<(), ContainerError> {
        check_parameters(factory.name(), factory.parameters())?;
        self.insert(tag.into(), Binding::Factory(factory.erase()))
    }

    /// Binds `tag` to a callable returning instance pointers, which are resolved as-is.
    pub fn register_factory_ptr<T: 'static>(
        &self,
        tag: impl Into<String>,
        factory: Injected<InstancePtr<T>>,
    ) -> Result<(), ContainerError> {
        check_parameters(factory.name(), factory.parameters())?;
        self.insert(tag.into(), Binding::Factory(factory.erase_ptr()))
    }

    /// Binds `tag` to a component constructed anew on every resolution.
    pub fn register_class<T: Component>(&self, tag: impl Into<String>) -> Result<(), ContainerError> {
        let class = Injected::<T>::component();
        check_parameters(class.name(), class.parameters())?;
        self.insert(tag.into(), Binding::Class(class.erase()))
    }

    /// Binds `tag` to a component constructed once, on first resolution, from registered bindings
    /// only.
    pub fn register_singleton<T: Component>(
        &self,
        tag: impl Into<String>,
    ) -> Result<(), ContainerError> {
        let class = Injected::<T>::component();
        check_parameters(class.name(), class.parameters())?;
        self.insert(tag.into(), Binding::Singleton(class.erase()))
    }

    fn insert(&self, tag: String, binding: Binding) -> Result<(), ContainerError> {
        if tag.is_empty() {
            return Err(ContainerError::EmptyTag);
        }

        let mut registry = self.registry.borrow_mut();
        if registry.bindings.contains_key(&tag) && !registry.replaceable_tags.remove(&tag) {
            return Err(ContainerError::DuplicateTag(tag));
        }

        debug!(tag = %tag, kind = ?binding.kind(), "Registering binding.");

        registry.bindings.insert(tag, binding);
        Ok(())
    }

    /// Checks if there's a binding for given tag.
    pub fn is_registered(&self, tag: &str) -> bool {
        self.registry.borrow().bindings.contains_key(tag)
    }

    /// Returns the kind of binding registered for given tag.
    pub fn binding_kind(&self, tag: &str) -> Option<BindingKind> {
        self.registry.borrow().bindings.get(tag).map(Binding::kind)
    }

    /// Returns all registered tags, sorted.
    pub fn tags(&self) -> Vec<String> {
        self.registry
            .borrow()
            .bindings
            .keys()
            .sorted()
            .cloned()
            .collect()
    }

    /// Typesafe version of [Container::resolve_any].
    pub fn resolve<T: 'static>(
        &self,
        tag: &str,
        locals: &Locals,
    ) -> Result<InstancePtr<T>, ContainerError> {
        self.resolve_any(tag, locals)
            .and_then(|value| InstancePtr::<T>::from_argument(tag, value))
    }

    /// Resolves given tag, taking `locals` into account. See the module documentation for
    /// precedence rules.
    pub fn resolve_any(&self, tag: &str, locals: &Locals) -> Result<InstanceAnyPtr, ContainerError> {
        trace!(tag, "Resolving dependency.");

        let binding = self.registry.borrow().bindings.get(tag).cloned();
        match (binding, locals.get(tag)) {
            (Some(Binding::Singleton(class)), local) => self.resolve_singleton(tag, &class, local),
            (_, Some(local)) => Ok(local.clone()),
            (Some(Binding::Value(value)), None) => Ok(value),
            (Some(Binding::Factory(factory) | Binding::Class(factory)), None) => {
                self.provide(tag, &factory, locals)
            }
            (None, None) => Err(ContainerError::UnknownTag(tag.to_string())),
        }
    }

    /// Constructs a [Component], injecting its declared dependencies.
    pub fn construct<T: Component>(&self, locals: &Locals) -> Result<T, ContainerError> {
        self.call(&Injected::<T>::component(), locals)
    }

    /// Calls `callable` with its declared dependencies. The result is returned as-is, so a
    /// callable returning a future is not awaited.
    pub fn call<R: 'static>(
        &self,
        callable: &Injected<R>,
        locals: &Locals,
    ) -> Result<R, ContainerError> {
        check_parameters(callable.name(), callable.parameters())?;

        let values = callable
            .parameters()
            .iter()
            .map(|tag| self.resolve_any(tag, locals))
            .collect::<Result<Vec<_>, _>>()?;

        callable.invoke(&Arguments::new(callable.shared_parameters(), values))
    }

    fn resolve_singleton(
        &self,
        tag: &str,
        class: &Injected<InstanceAnyPtr>,
        local: Option<&InstanceAnyPtr>,
    ) -> Result<InstanceAnyPtr, ContainerError> {
        if let Some(instance) = self.registry.borrow().singletons.get(tag) {
            return Ok(instance.clone());
        }

        if let Some(local) = local {
            return Ok(local.clone());
        }

        debug!(tag, "Creating singleton instance.");

        let instance = self.provide(tag, class, &Locals::default())?;
        self.registry
            .borrow_mut()
            .singletons
            .insert(tag.to_string(), instance.clone());

        Ok(instance)
    }

    fn provide(
        &self,
        tag: &str,
        factory: &Injected<InstanceAnyPtr>,
        locals: &Locals,
    ) -> Result<InstanceAnyPtr, ContainerError> {
        {
            let mut registry = self.registry.borrow_mut();
            if registry
                .tags_under_construction
                .iter()
                .any(|under_construction| under_construction == tag)
            {
                let mut path = registry.tags_under_construction.clone();
                path.push(tag.to_string());
                return Err(ContainerError::DependencyCycle(path));
            }

            registry.tags_under_construction.push(tag.to_string());
        }

        let instance = self.call(factory, locals);
        self.registry.borrow_mut().tags_under_construction.pop();

        instance
    }
}

fn check_parameters(name: &str, parameters: &[String]) -> Result<(), ContainerError> {
    let mut seen = FxHashSet::default();
    for parameter in parameters {
        if parameter.is_empty() {
            return Err(ContainerError::MalformedCallable(format!(
                "{name} declares an empty parameter tag"
            )));
        }

        if !seen.insert(parameter.as_str()) {
            return Err(ContainerError::MalformedCallable(format!(
                "{name} declares parameter '{parameter}' more than once"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::component::Component;
    use crate::container::{BindingKind, Container, ContainerRef, Locals, CONTAINER_TAG};
    use crate::error::ContainerError;
    use crate::future::FutureExt;
    use crate::injected::{Arguments, Injected};
    use crate::instance::InstancePtr;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Pair {
        a: InstancePtr<i32>,
        b: InstancePtr<i32>,
    }

    impl Component for Pair {
        fn parameters() -> &'static [&'static str] {
            &["b", "a"]
        }

        fn create(arguments: &Arguments) -> Result<Self, ContainerError> {
            Ok(Self {
                b: arguments.get(0)?,
                a: arguments.get(1)?,
            })
        }
    }

    #[derive(Debug)]
    struct Counted;

    thread_local! {
        static COUNTED_CONSTRUCTIONS: Cell<usize> = Cell::new(0);
    }

    impl Component for Counted {
        fn parameters() -> &'static [&'static str] {
            &[]
        }

        fn create(_arguments: &Arguments) -> Result<Self, ContainerError> {
            COUNTED_CONSTRUCTIONS.with(|count| count.set(count.get() + 1));
            Ok(Self)
        }
    }

    #[derive(Debug)]
    struct SelfDependent;

    impl Component for SelfDependent {
        fn parameters() -> &'static [&'static str] {
            &["self_dependent"]
        }

        fn create(_arguments: &Arguments) -> Result<Self, ContainerError> {
            Ok(Self)
        }
    }

    fn counting_factory(count: Rc<Cell<usize>>) -> Injected<usize> {
        Injected::new("counting", Vec::<String>::new(), move |_: &Arguments| {
            count.set(count.get() + 1);
            Ok(count.get())
        })
    }

    #[test]
    fn should_return_identical_values() {
        let container = Container::new();
        container.register_value("a", 1).unwrap();

        let first = container.resolve::<i32>("a", &Locals::default()).unwrap();
        let second = container.resolve::<i32>("a", &Locals::default()).unwrap();

        assert_eq!(*first, 1);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn should_not_register_duplicate_tags() {
        let container = Container::new();
        container.register_value("a", 1).unwrap();

        assert!(matches!(
            container.register_value("a", 2).unwrap_err(),
            ContainerError::DuplicateTag(tag) if tag == "a"
        ));
        assert!(matches!(
            container.register_class::<Pair>("a").unwrap_err(),
            ContainerError::DuplicateTag(_)
        ));
        assert_eq!(*container.resolve::<i32>("a", &Locals::default()).unwrap(), 1);
    }

    #[test]
    fn should_not_register_empty_tags() {
        let container = Container::new();
        assert!(matches!(
            container.register_value("", 1).unwrap_err(),
            ContainerError::EmptyTag
        ));
    }

    #[test]
    fn should_not_resolve_unknown_tags() {
        let container = Container::new();
        let tags = container.tags();

        assert!(matches!(
            container.resolve_any("missing", &Locals::default()).unwrap_err(),
            ContainerError::UnknownTag(tag) if tag == "missing"
        ));
        assert_eq!(container.tags(), tags);
    }

    #[test]
    fn should_invoke_factory_on_every_resolution() {
        let count = Rc::new(Cell::new(0));
        let container = Container::new();
        container
            .register_factory("counter", counting_factory(count.clone()))
            .unwrap();

        let results: Vec<_> = (0..3)
            .map(|_| {
                container
                    .resolve::<usize>("counter", &Locals::default())
                    .unwrap()
            })
            .collect();

        assert_eq!(count.get(), 3);
        assert_eq!(results.iter().map(|result| **result).collect::<Vec<_>>(), [1, 2, 3]);
        assert!(!Rc::ptr_eq(&results[0], &results[1]));
    }

    #[test]
    fn should_construct_class_on_every_resolution() {
        let container = Container::new();
        container.register_value("a", 1).unwrap();
        container.register_value("b", 2).unwrap();
        container.register_class::<Pair>("pair").unwrap();

        let first = container.resolve::<Pair>("pair", &Locals::default()).unwrap();
        let second = container.resolve::<Pair>("pair", &Locals::default()).unwrap();

        assert_eq!((*first.a, *first.b), (1, 2));
        assert!(!Rc::ptr_eq(&first, &second));
        assert!(Rc::ptr_eq(&first.a, &second.a));
    }

    #[test]
    fn should_construct_singleton_once() {
        let container = Container::new();
        container.register_singleton::<Counted>("counted").unwrap();

        let instances: Vec<_> = (0..5)
            .map(|_| {
                container
                    .resolve::<Counted>("counted", &Locals::default())
                    .unwrap()
            })
            .collect();

        assert_eq!(COUNTED_CONSTRUCTIONS.with(Cell::get), 1);
        assert!(instances
            .iter()
            .all(|instance| Rc::ptr_eq(instance, &instances[0])));
    }

    #[test]
    fn should_ignore_locals_for_constructed_singletons() {
        let container = Container::new();
        container.register_value("a", 1).unwrap();
        container.register_value("b", 2).unwrap();
        container.register_singleton::<Pair>("pair").unwrap();

        let singleton = container.resolve::<Pair>("pair", &Locals::default()).unwrap();
        let overridden = container
            .resolve::<Pair>(
                "pair",
                &Locals::new().with(
                    "pair",
                    Pair {
                        a: Rc::new(3),
                        b: Rc::new(4),
                    },
                ),
            )
            .unwrap();

        assert!(Rc::ptr_eq(&singleton, &overridden));
    }

    #[test]
    fn should_construct_singletons_without_locals() {
        let container = Container::new();
        container.register_value("a", 1).unwrap();
        container.register_value("b", 2).unwrap();
        container.register_singleton::<Pair>("pair").unwrap();

        let singleton = container
            .resolve::<Pair>("pair", &Locals::new().with("a", 10))
            .unwrap();

        assert_eq!(*singleton.a, 1);
    }

    #[test]
    fn should_prefer_locals_before_singleton_construction() {
        let container = Container::new();
        container.register_singleton::<Counted>("local_counted").unwrap();

        let local = Rc::new(Counted);
        let resolved = container
            .resolve::<Counted>("local_counted", &Locals::new().with_ptr("local_counted", local.clone()))
            .unwrap();

        assert!(Rc::ptr_eq(&local, &resolved));
    }

    #[test]
    fn should_prefer_locals() {
        let count = Rc::new(Cell::new(0));
        let container = Container::new();
        container.register_value("a", 1).unwrap();
        container
            .register_factory("counter", counting_factory(count.clone()))
            .unwrap();
        container.register_class::<Pair>("pair").unwrap();

        let locals = Locals::new()
            .with("a", 10)
            .with("counter", 20_usize)
            .with(
                "pair",
                Pair {
                    a: Rc::new(30),
                    b: Rc::new(40),
                },
            );

        assert_eq!(*container.resolve::<i32>("a", &locals).unwrap(), 10);
        assert_eq!(*container.resolve::<usize>("counter", &locals).unwrap(), 20);
        assert_eq!(*container.resolve::<Pair>("pair", &locals).unwrap().a, 30);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn should_pass_locals_to_nested_dependencies() {
        let container = Container::new();
        container.register_value("a", 1).unwrap();
        container.register_class::<Pair>("pair").unwrap();

        let pair = container
            .resolve::<Pair>("pair", &Locals::new().with("b", 2))
            .unwrap();

        assert_eq!((*pair.a, *pair.b), (1, 2));
    }

    #[test]
    fn should_construct_components_positionally() {
        let container = Container::new();

        assert!(matches!(
            container.construct::<Pair>(&Locals::default()).unwrap_err(),
            ContainerError::UnknownTag(tag) if tag == "b"
        ));

        let pair = container
            .construct::<Pair>(&Locals::new().with("a", 1).with("b", 2))
            .unwrap();
        assert_eq!((*pair.a, *pair.b), (1, 2));
    }

    #[test]
    fn should_call_without_dependencies() {
        let container = Container::new();
        let callable = Injected::new("answer", Vec::<String>::new(), |_: &Arguments| Ok(42));

        assert_eq!(container.call(&callable, &Locals::default()).unwrap(), 42);
    }

    #[test]
    fn should_not_await_returned_futures() {
        let polled = Rc::new(Cell::new(false));
        let container = Container::new();
        container.register_value("a", 1).unwrap();

        let callable = {
            let polled = polled.clone();
            Injected::new("async", ["a"], move |arguments: &Arguments| {
                let a = arguments.get::<InstancePtr<i32>>(0)?;
                let polled = polled.clone();
                Ok(async move {
                    polled.set(true);
                    *a + 1
                }
                .boxed_local())
            })
        };

        let future = container.call(&callable, &Locals::default()).unwrap();
        assert!(!polled.get());
        assert_eq!(block_on(future), 2);
        assert!(polled.get());
    }

    #[test]
    fn should_detect_dependency_cycles() {
        let container = Container::new();
        container
            .register_class::<SelfDependent>("self_dependent")
            .unwrap();

        assert!(matches!(
            container.resolve_any("self_dependent", &Locals::default()).unwrap_err(),
            ContainerError::DependencyCycle(path) if path == ["self_dependent", "self_dependent"]
        ));

        // construction state is cleaned up after a failure
        assert!(matches!(
            container.resolve_any("self_dependent", &Locals::default()).unwrap_err(),
            ContainerError::DependencyCycle(path) if path.len() == 2
        ));
        assert!(container
            .resolve_any(
                "self_dependent",
                &Locals::new().with("self_dependent", SelfDependent)
            )
            .is_ok());
    }

    #[test]
    fn should_reject_malformed_callables() {
        let container = Container::new();
        let duplicated = Injected::new("duplicated", ["a", "a"], |_: &Arguments| Ok(()));
        let empty = Injected::new("empty", [""], |_: &Arguments| Ok(()));

        assert!(matches!(
            container.register_factory("duplicated", duplicated.clone()).unwrap_err(),
            ContainerError::MalformedCallable(_)
        ));
        assert!(matches!(
            container.call(&duplicated, &Locals::default()).unwrap_err(),
            ContainerError::MalformedCallable(_)
        ));
        assert!(matches!(
            container.register_factory("empty", empty).unwrap_err(),
            ContainerError::MalformedCallable(_)
        ));
        assert!(!container.is_registered("duplicated"));
    }

    #[test]
    fn should_reject_incompatible_types() {
        let container = Container::new();
        container.register_value("a", 1).unwrap();

        assert!(matches!(
            container.resolve::<String>("a", &Locals::default()).unwrap_err(),
            ContainerError::IncompatibleValue { tag, .. } if tag == "a"
        ));
    }

    #[test]
    fn should_register_itself() {
        let container = Container::new();
        container.register_value("a", 1).unwrap();

        let reference = container
            .resolve::<ContainerRef>(CONTAINER_TAG, &Locals::default())
            .unwrap();
        let upgraded = reference.upgrade().unwrap();

        assert_eq!(*upgraded.resolve::<i32>("a", &Locals::default()).unwrap(), 1);
        assert_eq!(
            container.binding_kind(CONTAINER_TAG),
            Some(BindingKind::Value)
        );

        drop(upgraded);
        drop(container);
        assert!(reference.upgrade().is_none());
    }

    #[test]
    fn should_replace_default_bindings_once() {
        let container = Container::new();
        container.register_value(CONTAINER_TAG, 1).unwrap();

        assert_eq!(
            *container
                .resolve::<i32>(CONTAINER_TAG, &Locals::default())
                .unwrap(),
            1
        );
        assert!(matches!(
            container.register_value(CONTAINER_TAG, 2).unwrap_err(),
            ContainerError::DuplicateTag(_)
        ));
    }

    #[test]
    fn should_forward_factory_pointers() {
        let container = Container::new();
        container.register_value("number", 5_u8).unwrap();
        container
            .register_factory_ptr(
                "alias",
                Injected::new("alias", ["number"], |arguments: &Arguments| {
                    arguments.get::<InstancePtr<u8>>(0)
                }),
            )
            .unwrap();

        let number = container.resolve::<u8>("number", &Locals::default()).unwrap();
        let alias = container.resolve::<u8>("alias", &Locals::default()).unwrap();

        assert!(Rc::ptr_eq(&number, &alias));
        assert_eq!(
            container.binding_kind("alias"),
            Some(BindingKind::Factory)
        );
    }

    #[test]
    fn should_wrap_factory_results() {
        let container = Container::new();
        container.register_value("number", 5_u8).unwrap();
        container
            .register_factory(
                "wrapped",
                Injected::new("wrapped", ["number"], |arguments: &Arguments| {
                    arguments.get::<InstancePtr<u8>>(0)
                }),
            )
            .unwrap();

        assert!(matches!(
            container.resolve::<u8>("wrapped", &Locals::default()).unwrap_err(),
            ContainerError::IncompatibleValue { tag, .. } if tag == "wrapped"
        ));
        assert_eq!(
            **container
                .resolve::<InstancePtr<u8>>("wrapped", &Locals::default())
                .unwrap(),
            5
        );
    }

    #[test]
    fn should_report_binding_kinds() {
        let container = Container::new();
        container.register_value("value", 1).unwrap();
        container
            .register_factory("factory", counting_factory(Rc::default()))
            .unwrap();
        container.register_class::<Pair>("class").unwrap();
        container.register_singleton::<Counted>("singleton").unwrap();

        assert_eq!(container.binding_kind("value"), Some(BindingKind::Value));
        assert_eq!(container.binding_kind("factory"), Some(BindingKind::Factory));
        assert_eq!(container.binding_kind("class"), Some(BindingKind::Class));
        assert_eq!(
            container.binding_kind("singleton"),
            Some(BindingKind::Singleton)
        );
        assert_eq!(container.binding_kind("missing"), None);
        assert_eq!(
            container.tags(),
            ["class", CONTAINER_TAG, "factory", "singleton", "value"]
        );
    }
}
