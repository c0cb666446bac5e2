//! Configuration-driven construction of a service manager.
//!
//! Mirrors the array-shaped configuration common to service locators: each
//! table maps onto one registration method, and the whole document is
//! validated before a manager is handed out.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::catalog::TypeCatalog;
use crate::error::{SmError, SmResult};
use crate::manager::{ServiceManager, ServiceManagerBuilder};
use crate::value::Value;

/// Declarative registrations for a [`ServiceManager`].
///
/// Factories and abstract factories are referenced by catalog name; direct
/// services are plain configuration values.
///
/// # Examples
///
/// ```
/// use ferrous_sm::{Constructor, ServiceManager, ServiceManagerConfig, TypeCatalog, Value};
/// use std::sync::Arc;
///
/// struct Clock;
///
/// let mut catalog = TypeCatalog::new();
/// catalog.class("Clock", Constructor::Implicit, |_| Ok(Clock));
///
/// let config = ServiceManagerConfig::from_json(r#"{
///     "services": { "db": { "host": "localhost", "port": 5432 } },
///     "invokables": ["Clock"],
///     "abstract_factories": ["ReflectionFactory"],
///     "aliases": { "clock": "Clock" }
/// }"#).unwrap();
///
/// let manager = ServiceManager::from_config(Arc::new(catalog), config).unwrap();
/// assert_eq!(manager.get("db").unwrap().get("port"), Some(&Value::Int(5432)));
/// assert!(manager.get_as::<Clock>("clock").is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceManagerConfig {
    /// Direct service values
    pub services: BTreeMap<String, Value>,
    /// Service id to factory class name
    pub factories: BTreeMap<String, String>,
    /// Abstract factory class names, consulted in order
    pub abstract_factories: Vec<String>,
    /// Class names constructible without a factory
    pub invokables: Vec<String>,
    /// Alias to target id
    pub aliases: BTreeMap<String, String>,
}

impl ServiceManagerConfig {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> SmResult<Self> {
        serde_json::from_str(json).map_err(|e| SmError::InvalidConfig(e.to_string()))
    }

    /// True when no table has an entry.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
            && self.factories.is_empty()
            && self.abstract_factories.is_empty()
            && self.invokables.is_empty()
            && self.aliases.is_empty()
    }

    /// Folds `other` into `self`; later entries win for keyed tables,
    /// list tables are appended.
    pub fn merge(&mut self, other: ServiceManagerConfig) {
        self.services.extend(other.services);
        self.factories.extend(other.factories);
        self.abstract_factories.extend(other.abstract_factories);
        self.invokables.extend(other.invokables);
        self.aliases.extend(other.aliases);
    }
}

impl ServiceManagerBuilder {
    /// Queues every registration of `config`.
    pub fn with_config(self, config: ServiceManagerConfig) -> Self {
        let ServiceManagerConfig { services, factories, abstract_factories, invokables, aliases } = config;

        let builder = services.into_iter().fold(self, |b, (id, value)| b.service(id, value));
        let builder = factories.into_iter().fold(builder, |b, (id, name)| b.factory(id, name));
        let builder = invokables.into_iter().fold(builder, |b, id| b.invokable(id));
        let builder = abstract_factories.into_iter().fold(builder, |b, name| b.abstract_factory(name));
        aliases.into_iter().fold(builder, |b, (alias, target)| b.alias(alias, target))
    }
}

impl ServiceManager {
    /// Builds a manager from `config`, failing on the first invalid entry.
    pub fn from_config(catalog: Arc<TypeCatalog>, config: ServiceManagerConfig) -> SmResult<Self> {
        debug!(
            services = config.services.len(),
            factories = config.factories.len(),
            invokables = config.invokables.len(),
            abstract_factories = config.abstract_factories.len(),
            aliases = config.aliases.len(),
            "Building service manager from configuration"
        );
        ServiceManager::builder(catalog).with_config(config).build()
    }
}
