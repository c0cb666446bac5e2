//! Registration tables and factory bindings.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::SmResult;
use crate::traits::{AbstractFactory, Container, Factory};
use crate::value::Value;

/// How a service id is bound to a factory.
///
/// # Examples
///
/// ```
/// use ferrous_sm::{FactoryBinding, Value};
///
/// let by_name: FactoryBinding = "MailerFactory".into();
/// assert!(matches!(by_name, FactoryBinding::Descriptor(ref name) if name == "MailerFactory"));
///
/// let closure = FactoryBinding::from_fn(|_c, _id, _opts| Ok(Value::from(1)));
/// assert!(matches!(closure, FactoryBinding::Instance(_)));
///
/// // Accepted at registration, rejected when the service is created.
/// let bogus: FactoryBinding = Value::from(123).into();
/// assert!(matches!(bogus, FactoryBinding::Value(_)));
/// ```
#[derive(Clone)]
pub enum FactoryBinding {
    /// A ready factory object or callable
    Instance(Arc<dyn Factory>),
    /// Name of a catalog factory class, instantiated on first use
    Descriptor(String),
    /// Any other value; never invocable
    Value(Value),
}

impl FactoryBinding {
    pub fn instance<F: Factory + 'static>(factory: F) -> Self {
        FactoryBinding::Instance(Arc::new(factory))
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&dyn Container, &str, Option<&Value>) -> SmResult<Value> + Send + Sync + 'static,
    {
        FactoryBinding::Instance(Arc::new(f))
    }

    pub fn descriptor(name: impl Into<String>) -> Self {
        FactoryBinding::Descriptor(name.into())
    }
}

impl fmt::Debug for FactoryBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryBinding::Instance(_) => write!(f, "Instance(<factory>)"),
            FactoryBinding::Descriptor(name) => write!(f, "Descriptor({:?})", name),
            FactoryBinding::Value(value) => write!(f, "Value({:?})", value),
        }
    }
}

impl From<&str> for FactoryBinding {
    fn from(name: &str) -> Self {
        FactoryBinding::Descriptor(name.to_string())
    }
}

impl From<String> for FactoryBinding {
    fn from(name: String) -> Self {
        FactoryBinding::Descriptor(name)
    }
}

impl From<Value> for FactoryBinding {
    fn from(value: Value) -> Self {
        FactoryBinding::Value(value)
    }
}

impl From<Arc<dyn Factory>> for FactoryBinding {
    fn from(factory: Arc<dyn Factory>) -> Self {
        FactoryBinding::Instance(factory)
    }
}

/// An entry of the abstract factory chain.
#[derive(Clone)]
pub enum AbstractFactoryEntry {
    /// A ready abstract factory
    Instance(Arc<dyn AbstractFactory>),
    /// Name of a catalog abstract factory class, instantiated once and shared
    Descriptor(String),
}

impl AbstractFactoryEntry {
    pub fn instance<F: AbstractFactory + 'static>(factory: F) -> Self {
        AbstractFactoryEntry::Instance(Arc::new(factory))
    }
}

impl fmt::Debug for AbstractFactoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbstractFactoryEntry::Instance(_) => write!(f, "Instance(<abstract factory>)"),
            AbstractFactoryEntry::Descriptor(name) => write!(f, "Descriptor({:?})", name),
        }
    }
}

impl From<&str> for AbstractFactoryEntry {
    fn from(name: &str) -> Self {
        AbstractFactoryEntry::Descriptor(name.to_string())
    }
}

impl From<String> for AbstractFactoryEntry {
    fn from(name: String) -> Self {
        AbstractFactoryEntry::Descriptor(name)
    }
}

impl From<Arc<dyn AbstractFactory>> for AbstractFactoryEntry {
    fn from(factory: Arc<dyn AbstractFactory>) -> Self {
        AbstractFactoryEntry::Instance(factory)
    }
}

/// A factory ready to be invoked.
#[derive(Clone)]
pub(crate) enum ResolvedFactory {
    Plain(Arc<dyn Factory>),
    Abstract(Arc<dyn AbstractFactory>),
}

impl ResolvedFactory {
    pub(crate) fn create(&self, container: &dyn Container, service: &str, options: Option<&Value>) -> SmResult<Value> {
        match self {
            ResolvedFactory::Plain(factory) => factory.create(container, service, options),
            ResolvedFactory::Abstract(factory) => factory.create(container, service, options),
        }
    }
}

/// Registration tables. Mutated only through `&mut ServiceManager`.
#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) services: HashMap<String, Value>,
    pub(crate) factories: HashMap<String, FactoryBinding>,
    pub(crate) invokables: BTreeSet<String>,
    pub(crate) abstract_factories: Vec<AbstractFactoryEntry>,
    pub(crate) aliases: HashMap<String, String>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// One-hop alias rewrite.
    #[inline]
    pub(crate) fn resolve_alias<'a>(&'a self, id: &'a str) -> &'a str {
        self.aliases.get(id).map(String::as_str).unwrap_or(id)
    }

    /// True for any binding except the abstract factory chain.
    pub(crate) fn has_binding(&self, id: &str) -> bool {
        self.services.contains_key(id) || self.factories.contains_key(id) || self.invokables.contains(id)
    }

    /// Drops every binding of `id`, including an alias named `id`.
    pub(crate) fn purge(&mut self, id: &str) {
        self.services.remove(id);
        self.factories.remove(id);
        self.invokables.remove(id);
        self.aliases.remove(id);
    }
}

/// Memo tables populated during resolution.
#[derive(Default)]
pub(crate) struct ResolutionCache {
    pub(crate) factories: HashMap<String, ResolvedFactory>,
    pub(crate) services: HashMap<String, Value>,
    pub(crate) abstract_factories: HashMap<String, Arc<dyn AbstractFactory>>,
}

impl ResolutionCache {
    pub(crate) fn purge(&mut self, id: &str) {
        self.factories.remove(id);
        self.services.remove(id);
    }
}
