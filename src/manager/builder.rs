use std::sync::Arc;

use crate::catalog::TypeCatalog;
use crate::error::SmResult;
use crate::observer::ResolutionObserver;
use crate::registration::{AbstractFactoryEntry, FactoryBinding};
use crate::traits::Container;
use crate::value::Value;

use super::ServiceManager;

/// Collects registrations and applies them in one go.
///
/// [`build`](Self::build) validates every entry; the first invalid one aborts
/// the build and no manager is returned.
///
/// ```
/// use ferrous_sm::{Constructor, ReflectionFactory, ServiceManager, SmError, TypeCatalog, Value};
/// use std::sync::Arc;
///
/// struct Clock;
///
/// let mut catalog = TypeCatalog::new();
/// catalog.class("Clock", Constructor::Implicit, |_| Ok(Clock));
/// let catalog = Arc::new(catalog);
///
/// let manager = ServiceManager::builder(catalog.clone())
///     .service("ticks", Value::from(60))
///     .invokable("Clock")
///     .abstract_factory(ReflectionFactory::NAME)
///     .alias("clock", "Clock")
///     .build()
///     .unwrap();
/// assert!(manager.has("clock"));
///
/// let result = ServiceManager::builder(catalog).invokable("Nope").build();
/// assert!(matches!(result, Err(SmError::ClassNotFound(name)) if name == "Nope"));
/// ```
#[must_use = "a builder does nothing until `build` is called"]
pub struct ServiceManagerBuilder {
    catalog: Arc<TypeCatalog>,
    services: Vec<(String, Value)>,
    factories: Vec<(String, FactoryBinding)>,
    invokables: Vec<String>,
    abstract_factories: Vec<AbstractFactoryEntry>,
    aliases: Vec<(String, String)>,
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl ServiceManagerBuilder {
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            catalog,
            services: Vec::new(),
            factories: Vec::new(),
            invokables: Vec::new(),
            abstract_factories: Vec::new(),
            aliases: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn service(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.services.push((id.into(), value.into()));
        self
    }

    pub fn factory(mut self, id: impl Into<String>, factory: impl Into<FactoryBinding>) -> Self {
        self.factories.push((id.into(), factory.into()));
        self
    }

    pub fn factory_fn<F>(self, id: impl Into<String>, f: F) -> Self
    where
        F: Fn(&dyn Container, &str, Option<&Value>) -> SmResult<Value> + Send + Sync + 'static,
    {
        self.factory(id, FactoryBinding::from_fn(f))
    }

    pub fn invokable(mut self, id: impl Into<String>) -> Self {
        self.invokables.push(id.into());
        self
    }

    pub fn abstract_factory(mut self, factory: impl Into<AbstractFactoryEntry>) -> Self {
        self.abstract_factories.push(factory.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), target.into()));
        self
    }

    pub fn observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Applies services, factories, invokables, abstract factories and
    /// aliases, in that order.
    pub fn build(self) -> SmResult<ServiceManager> {
        let mut manager = ServiceManager::new(self.catalog);

        for observer in self.observers {
            manager.add_observer(observer);
        }
        for (id, value) in self.services {
            manager.add_service(id, value);
        }
        for (id, factory) in self.factories {
            manager.add_factory(id, factory)?;
        }
        for id in self.invokables {
            manager.add_invokable(id)?;
        }
        for entry in self.abstract_factories {
            manager.add_abstract_factory(entry)?;
        }
        for (alias, target) in self.aliases {
            manager.add_alias(alias, target);
        }

        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmError;

    #[test]
    fn build_applies_every_table() {
        let manager = ServiceManagerBuilder::new(Arc::new(TypeCatalog::new()))
            .service("answer", Value::from(42))
            .factory_fn("greeting", |_c, _id, _o| Ok(Value::from("hi")))
            .alias("reply", "answer")
            .build()
            .unwrap();

        assert_eq!(manager.get("reply").unwrap(), Value::Int(42));
        assert_eq!(manager.get("greeting").unwrap(), Value::from("hi"));
        assert_eq!(manager.service_ids(), vec!["answer".to_string(), "greeting".to_string()]);
    }

    #[test]
    fn build_fails_on_first_invalid_entry() {
        let result = ServiceManagerBuilder::new(Arc::new(TypeCatalog::new()))
            .factory("a", "MissingFactory")
            .abstract_factory("MissingAbstract")
            .build();

        match result {
            Err(SmError::FactoryDoesNotExist(name)) => assert_eq!(name, "MissingFactory"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn build_rejects_non_abstract_factory_descriptor() {
        let result = ServiceManagerBuilder::new(Arc::new(TypeCatalog::new()))
            .abstract_factory(crate::factories::InvokableFactory::NAME)
            .build();

        assert!(matches!(result, Err(SmError::InvalidAbstractFactory(_))));
    }
}
