//! The service manager: registration tables plus the resolution engine.
//!
//! Resolution of an identifier follows a fixed priority order:
//!
//! 1. one-hop alias rewrite,
//! 2. direct service value,
//! 3. memoized service instance (`get` only),
//! 4. memoized factory, else explicit factory, else invokable marker,
//!    else the first abstract factory whose `can_create` accepts the id.
//!
//! Factories resolved in step 4 are memoized per id; abstract factories
//! registered by descriptor are instantiated once and shared across ids.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::catalog::{TypeCatalog, TypeDescriptor, TypeShape};
use crate::error::{SmError, SmResult};
use crate::factories::InvokableFactory;
use crate::key::Key;
use crate::observer::{Observers, ResolutionObserver};
use crate::registration::{AbstractFactoryEntry, FactoryBinding, Registry, ResolutionCache, ResolvedFactory};
use crate::traits::{AbstractFactory, Container};
use crate::value::Value;

pub mod builder;
pub use builder::ServiceManagerBuilder;

/// String-keyed service registry.
///
/// Registration takes `&mut self`, resolution takes `&self`: configure the
/// manager first, then share it. Memo tables sit behind a single mutex that
/// is never held while a factory runs, so factories may resolve their own
/// dependencies recursively.
///
/// # Examples
///
/// ```
/// use ferrous_sm::{Constructor, ServiceManager, TypeCatalog, Value};
/// use std::sync::Arc;
///
/// struct Mailer;
///
/// let mut catalog = TypeCatalog::new();
/// catalog.class("Mailer", Constructor::Implicit, |_| Ok(Mailer));
///
/// let mut manager = ServiceManager::new(Arc::new(catalog));
/// manager.add_service("config", Value::from([("host", Value::from("localhost"))]));
/// manager.add_invokable("Mailer").unwrap();
/// manager.add_alias("mailer", "Mailer");
///
/// assert_eq!(manager.get("config").unwrap().get("host"), Some(&Value::from("localhost")));
///
/// // `get` shares, `create_service` builds fresh.
/// let a = manager.get("mailer").unwrap();
/// let b = manager.get("Mailer").unwrap();
/// let c = manager.create_service("Mailer", None).unwrap();
/// assert!(a.same_instance(&b));
/// assert!(!a.same_instance(&c));
/// ```
pub struct ServiceManager {
    catalog: Arc<TypeCatalog>,
    registry: Registry,
    cache: Mutex<ResolutionCache>,
    observers: Observers,
}

impl ServiceManager {
    /// Creates an empty manager over `catalog`.
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            catalog,
            registry: Registry::new(),
            cache: Mutex::new(ResolutionCache::default()),
            observers: Observers::new(),
        }
    }

    /// Starts a builder that validates initial registrations as a whole.
    pub fn builder(catalog: Arc<TypeCatalog>) -> ServiceManagerBuilder {
        ServiceManagerBuilder::new(catalog)
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    // ----- Registration -----

    /// Stores `value` as the direct binding for `id`.
    ///
    /// Takes precedence over every other binding kind, and replaces an alias
    /// of the same name.
    pub fn add_service(&mut self, id: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let id = id.into();
        debug!(service = %id, "Registered service");
        self.registry.aliases.remove(&id);
        self.registry.services.insert(id, value.into());
        self
    }

    /// Registers an explicit factory for `id`.
    ///
    /// A descriptor binding must name a catalog class; whether that class is
    /// actually a factory is checked when the service is first created.
    pub fn add_factory(&mut self, id: impl Into<String>, factory: impl Into<FactoryBinding>) -> SmResult<&mut Self> {
        let id = id.into();
        let factory = factory.into();
        if let FactoryBinding::Descriptor(name) = &factory {
            if !self.catalog.is_class(name) {
                return Err(SmError::FactoryDoesNotExist(name.clone()));
            }
        }
        debug!(service = %id, factory = ?factory, "Registered factory");
        self.cache.get_mut().factories.remove(&id);
        self.registry.factories.insert(id, factory);
        Ok(self)
    }

    /// Registers a closure as the factory for `id`.
    pub fn add_factory_fn<F>(&mut self, id: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&dyn Container, &str, Option<&Value>) -> SmResult<Value> + Send + Sync + 'static,
    {
        let id = id.into();
        debug!(service = %id, "Registered factory closure");
        self.cache.get_mut().factories.remove(&id);
        self.registry.factories.insert(id, FactoryBinding::from_fn(f));
        self
    }

    /// Marks the catalog class `id` as directly constructible.
    pub fn add_invokable(&mut self, id: impl Into<String>) -> SmResult<&mut Self> {
        let id = id.into();
        if !self.catalog.is_class(&id) {
            return Err(SmError::ClassNotFound(id));
        }
        debug!(service = %id, "Registered invokable");
        self.registry.invokables.insert(id);
        Ok(self)
    }

    /// Appends an abstract factory to the fallback chain.
    pub fn add_abstract_factory(&mut self, factory: impl Into<AbstractFactoryEntry>) -> SmResult<&mut Self> {
        let entry = factory.into();
        if let AbstractFactoryEntry::Descriptor(name) = &entry {
            match self.catalog.get(name).map(TypeDescriptor::shape) {
                Some(TypeShape::AbstractFactory(_)) => {}
                Some(_) => return Err(SmError::InvalidAbstractFactory(name.clone())),
                None => return Err(SmError::AbstractFactoryDoesNotExist(name.clone())),
            }
        }
        debug!(factory = ?entry, position = self.registry.abstract_factories.len(), "Registered abstract factory");
        self.registry.abstract_factories.push(entry);
        Ok(self)
    }

    /// Records a one-hop alias. The target is not checked until resolution.
    pub fn add_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) -> &mut Self {
        let (alias, target) = (alias.into(), target.into());
        debug!(alias = %alias, target = %target, "Registered alias");
        self.registry.aliases.insert(alias, target);
        self
    }

    pub fn add_observer(&mut self, observer: Arc<dyn ResolutionObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    /// Purges `id` and, when `id` is an alias, its target from every table.
    pub fn remove_service(&mut self, id: &str) -> &mut Self {
        let target = self.registry.resolve_alias(id).to_string();
        debug!(service = %id, target = %target, "Removing service");
        let cache = self.cache.get_mut();
        for key in [id, target.as_str()] {
            self.registry.purge(key);
            cache.purge(key);
        }
        self
    }

    // ----- Resolution -----

    /// Returns the shared instance of `id`, creating and memoizing it on
    /// first use.
    pub fn get(&self, id: &str) -> SmResult<Value> {
        let resolved = self.resolve_alias(id);

        if let Some(service) = self.registry.services.get(resolved) {
            return Ok(service.clone());
        }

        let cached = self.cache.lock().services.get(resolved).cloned();
        if let Some(service) = cached {
            trace!(service = %resolved, "Service cache hit");
            return Ok(service);
        }

        let service = self.create_service(id, None)?;
        self.cache.lock().services.insert(resolved.to_string(), service.clone());
        Ok(service)
    }

    /// Returns the shared instance of `id` downcast to `T`.
    pub fn get_as<T: std::any::Any + Send + Sync>(&self, id: &str) -> SmResult<Arc<T>> {
        Container::get_as(self, id)
    }

    /// True if `id` has a binding or an abstract factory accepts it.
    pub fn has(&self, id: &str) -> bool {
        let resolved = self.resolve_alias(id);

        if self.registry.has_binding(resolved) {
            return true;
        }
        let memoized = self.cache.lock().services.contains_key(resolved);
        if memoized {
            return true;
        }

        match self.find_abstract_factory(resolved) {
            Ok(found) => found.is_some(),
            Err(error) => {
                warn!(service = %resolved, error = %error, "Abstract factory could not be resolved");
                false
            }
        }
    }

    /// Creates a fresh instance of `id`, bypassing the service cache.
    ///
    /// Every failure is wrapped once in [`SmError::ServiceCreationFailed`]
    /// naming `id` as requested, before alias rewriting.
    pub fn create_service(&self, id: &str, options: Option<Value>) -> SmResult<Value> {
        let resolved = self.resolve_alias(id);

        if let Some(service) = self.registry.services.get(resolved) {
            return Ok(service.clone());
        }

        let started = self.observers.has_observers().then(Instant::now);
        self.observers.resolving(id);

        let result = self
            .factory_for(resolved)
            .and_then(|factory| factory.create(self, resolved, options.as_ref()));

        match result {
            Ok(service) => {
                if let Some(started) = started {
                    self.observers.resolved(id, started.elapsed());
                }
                Ok(service)
            }
            Err(cause) => {
                warn!(service = %id, error = %cause, "Service creation failed");
                self.observers.creation_failed(id, &cause);
                Err(SmError::creation_failed(id, cause))
            }
        }
    }

    // ----- Indexed access -----

    pub fn offset_exists(&self, key: impl Into<Key>) -> SmResult<bool> {
        let key = key.into();
        Ok(self.has(key.as_id()?))
    }

    pub fn offset_get(&self, key: impl Into<Key>) -> SmResult<Value> {
        let key = key.into();
        self.get(key.as_id()?)
    }

    pub fn offset_set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> SmResult<()> {
        let key = key.into();
        self.add_service(key.as_id()?, value);
        Ok(())
    }

    pub fn offset_unset(&mut self, key: impl Into<Key>) -> SmResult<()> {
        let key = key.into();
        self.remove_service(key.as_id()?);
        Ok(())
    }

    // ----- Introspection -----

    /// Ids with a direct, factory or invokable binding, sorted.
    pub fn service_ids(&self) -> Vec<String> {
        let registry = &self.registry;
        let ids: BTreeSet<&String> = registry
            .services
            .keys()
            .chain(registry.factories.keys())
            .chain(registry.invokables.iter())
            .collect();
        ids.into_iter().cloned().collect()
    }

    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.registry.aliases
    }

    pub fn abstract_factory_count(&self) -> usize {
        self.registry.abstract_factories.len()
    }

    // ----- Internals -----

    fn resolve_alias<'a>(&'a self, id: &'a str) -> &'a str {
        let resolved = self.registry.resolve_alias(id);
        if resolved != id {
            trace!(alias = %id, target = %resolved, "Following alias");
        }
        resolved
    }

    fn factory_for(&self, id: &str) -> SmResult<ResolvedFactory> {
        let cached = self.cache.lock().factories.get(id).cloned();
        if let Some(factory) = cached {
            trace!(service = %id, "Factory cache hit");
            return Ok(factory);
        }

        let factory = if let Some(binding) = self.registry.factories.get(id) {
            self.instantiate_binding(id, binding)?
        } else if self.registry.invokables.contains(id) {
            ResolvedFactory::Plain(Arc::new(InvokableFactory))
        } else if let Some(factory) = self.find_abstract_factory(id)? {
            ResolvedFactory::Abstract(factory)
        } else {
            return Err(SmError::FactoryNotFound(id.to_string()));
        };

        self.cache.lock().factories.insert(id.to_string(), factory.clone());
        Ok(factory)
    }

    fn instantiate_binding(&self, id: &str, binding: &FactoryBinding) -> SmResult<ResolvedFactory> {
        match binding {
            FactoryBinding::Instance(factory) => Ok(ResolvedFactory::Plain(factory.clone())),
            FactoryBinding::Descriptor(name) => match self.catalog.get(name).map(TypeDescriptor::shape) {
                Some(TypeShape::Factory(make)) => Ok(ResolvedFactory::Plain(make())),
                Some(TypeShape::AbstractFactory(make)) => Ok(ResolvedFactory::Abstract(make())),
                _ => Err(SmError::InvalidFactory { service: id.to_string() }),
            },
            FactoryBinding::Value(_) => Err(SmError::InvalidFactory { service: id.to_string() }),
        }
    }

    /// First abstract factory, in registration order, that accepts `id`.
    fn find_abstract_factory(&self, id: &str) -> SmResult<Option<Arc<dyn AbstractFactory>>> {
        for entry in &self.registry.abstract_factories {
            let factory = self.abstract_factory_instance(entry)?;
            if factory.can_create(self, id) {
                return Ok(Some(factory));
            }
        }
        Ok(None)
    }

    fn abstract_factory_instance(&self, entry: &AbstractFactoryEntry) -> SmResult<Arc<dyn AbstractFactory>> {
        let name = match entry {
            AbstractFactoryEntry::Instance(factory) => return Ok(factory.clone()),
            AbstractFactoryEntry::Descriptor(name) => name,
        };

        let cached = self.cache.lock().abstract_factories.get(name).cloned();
        if let Some(factory) = cached {
            return Ok(factory);
        }

        let factory = match self.catalog.get(name).map(TypeDescriptor::shape) {
            Some(TypeShape::AbstractFactory(make)) => make(),
            Some(_) => return Err(SmError::InvalidAbstractFactory(name.clone())),
            None => return Err(SmError::AbstractFactoryDoesNotExist(name.clone())),
        };
        trace!(factory = %name, "Instantiated abstract factory");

        let mut cache = self.cache.lock();
        Ok(cache.abstract_factories.entry(name.clone()).or_insert(factory).clone())
    }
}

impl Container for ServiceManager {
    fn has(&self, id: &str) -> bool {
        ServiceManager::has(self, id)
    }

    fn get(&self, id: &str) -> SmResult<Value> {
        ServiceManager::get(self, id)
    }

    fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }
}

impl fmt::Debug for ServiceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceManager")
            .field("services", &self.registry.services.len())
            .field("factories", &self.registry.factories.len())
            .field("invokables", &self.registry.invokables.len())
            .field("abstract_factories", &self.registry.abstract_factories.len())
            .field("aliases", &self.registry.aliases.len())
            .finish()
    }
}
