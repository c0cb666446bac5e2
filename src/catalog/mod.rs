//! Type catalog: the table of constructible types the service manager can
//! reference by name.
//!
//! Registries never conjure types out of strings. Every descriptor a
//! registration or an abstract factory refers to (a class to autowire, a
//! factory class to instantiate, an interface used as a type hint) is looked
//! up here. The catalog is filled once at startup and shared immutably
//! afterwards.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::SmResult;
use crate::factories::{DynamicFactory, InvokableFactory, ReflectionFactory};
use crate::traits::{AbstractFactory, Factory};
use crate::value::Value;

pub mod arguments;
pub mod parameter;

pub use arguments::Arguments;
pub use parameter::{Constructor, Parameter, TypeHint};

pub type BuildFn = Arc<dyn Fn(&Arguments) -> SmResult<Value> + Send + Sync>;
pub type MakeFactoryFn = Arc<dyn Fn() -> Arc<dyn Factory> + Send + Sync>;
pub type MakeAbstractFactoryFn = Arc<dyn Fn() -> Arc<dyn AbstractFactory> + Send + Sync>;

static IMPLICIT: Constructor = Constructor::Implicit;

/// What a catalog entry is and how it is constructed.
#[derive(Clone)]
pub enum TypeShape {
    /// Exists as a type hint target, never constructed
    Interface,
    /// A constructible class
    Class {
        constructor: Constructor,
        build: BuildFn,
    },
    /// A zero-argument class whose instances are factories
    Factory(MakeFactoryFn),
    /// A zero-argument class whose instances are abstract factories
    AbstractFactory(MakeAbstractFactoryFn),
}

impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Interface => write!(f, "Interface"),
            TypeShape::Class { constructor, .. } => f.debug_struct("Class").field("constructor", constructor).finish(),
            TypeShape::Factory(_) => write!(f, "Factory"),
            TypeShape::AbstractFactory(_) => write!(f, "AbstractFactory"),
        }
    }
}

/// A named entry of the [`TypeCatalog`].
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    shape: TypeShape,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// True for anything but interfaces.
    pub fn is_class(&self) -> bool {
        !matches!(self.shape, TypeShape::Interface)
    }

    /// The constructor; factory classes have an implicit one.
    pub fn constructor(&self) -> Option<&Constructor> {
        match &self.shape {
            TypeShape::Class { constructor, .. } => Some(constructor),
            TypeShape::Factory(_) | TypeShape::AbstractFactory(_) => Some(&IMPLICIT),
            TypeShape::Interface => None,
        }
    }

    /// True if instances of this type can be invoked as factories.
    pub fn is_factory(&self) -> bool {
        matches!(self.shape, TypeShape::Factory(_) | TypeShape::AbstractFactory(_))
    }

    /// Constructs an instance from positional arguments.
    ///
    /// Factory classes ignore the arguments and yield the factory object
    /// itself, stored as `Arc<dyn Factory>` or `Arc<dyn AbstractFactory>`.
    /// Interfaces yield `None`.
    pub fn instantiate(&self, args: &Arguments) -> Option<SmResult<Value>> {
        match &self.shape {
            TypeShape::Interface => None,
            TypeShape::Class { build, .. } => Some(build(args)),
            TypeShape::Factory(make) => Some(Ok(Value::service(make()))),
            TypeShape::AbstractFactory(make) => Some(Ok(Value::service(make()))),
        }
    }
}

/// Table of named types, keyed by type name.
///
/// # Examples
///
/// ```
/// use ferrous_sm::{Constructor, Parameter, TypeCatalog};
///
/// struct Mailer { host: String }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.interface("MailerInterface");
/// catalog.class("Mailer", Constructor::public([Parameter::new("host").typed("string").default_value("localhost")]), |args| {
///     Ok(Mailer { host: args.string(0)? })
/// });
///
/// assert!(catalog.contains("Mailer"));
/// assert!(catalog.is_class("Mailer"));
/// assert!(catalog.contains("MailerInterface"));
/// assert!(!catalog.is_class("MailerInterface"));
/// assert!(catalog.is_class("ReflectionFactory"));
/// ```
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: BTreeMap<String, TypeDescriptor>,
}

impl TypeCatalog {
    /// Creates a catalog holding the built-in factory classes.
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        catalog.abstract_factory(ReflectionFactory::NAME, || ReflectionFactory);
        catalog.abstract_factory(DynamicFactory::NAME, || DynamicFactory);
        catalog.factory(InvokableFactory::NAME, || InvokableFactory);
        catalog
    }

    /// Creates a catalog with no entries at all.
    pub fn empty() -> Self {
        Self { types: BTreeMap::new() }
    }

    /// Registers a constructible class.
    pub fn class<T, F>(&mut self, name: impl Into<String>, constructor: Constructor, build: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(&Arguments) -> SmResult<T> + Send + Sync + 'static,
    {
        let build: BuildFn = Arc::new(move |args: &Arguments| build(args).map(Value::service));
        self.insert(TypeDescriptor::new(name, TypeShape::Class { constructor, build }))
    }

    /// Registers a class whose build closure produces a [`Value`] directly.
    pub fn class_value<F>(&mut self, name: impl Into<String>, constructor: Constructor, build: F) -> &mut Self
    where
        F: Fn(&Arguments) -> SmResult<Value> + Send + Sync + 'static,
    {
        self.insert(TypeDescriptor::new(
            name,
            TypeShape::Class {
                constructor,
                build: Arc::new(build),
            },
        ))
    }

    /// Registers an interface name usable as a type hint.
    pub fn interface(&mut self, name: impl Into<String>) -> &mut Self {
        self.insert(TypeDescriptor::new(name, TypeShape::Interface))
    }

    /// Registers a factory class.
    pub fn factory<T, F>(&mut self, name: impl Into<String>, make: F) -> &mut Self
    where
        T: Factory + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let make: MakeFactoryFn = Arc::new(move || Arc::new(make()) as Arc<dyn Factory>);
        self.insert(TypeDescriptor::new(name, TypeShape::Factory(make)))
    }

    /// Registers an abstract factory class.
    pub fn abstract_factory<T, F>(&mut self, name: impl Into<String>, make: F) -> &mut Self
    where
        T: AbstractFactory + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let make: MakeAbstractFactoryFn = Arc::new(move || Arc::new(make()) as Arc<dyn AbstractFactory>);
        self.insert(TypeDescriptor::new(name, TypeShape::AbstractFactory(make)))
    }

    /// Inserts a descriptor, replacing any entry of the same name.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types.insert(descriptor.name.clone(), descriptor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// True if a class or interface of that name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// True if a class (not an interface) of that name exists.
    pub fn is_class(&self, name: &str) -> bool {
        self.get(name).is_some_and(TypeDescriptor::is_class)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
