//! Factory capabilities.

use crate::error::SmResult;
use crate::traits::Container;
use crate::value::Value;

/// Creates a service given the container, the resolved service id and
/// optional creation options.
///
/// Any closure with the matching signature is a `Factory`, so a plain
/// callable and a dedicated factory type are registered the same way.
///
/// # Examples
///
/// ```
/// use ferrous_sm::{Container, Factory, FactoryBinding, ServiceManager, SmResult, TypeCatalog, Value};
/// use std::sync::Arc;
///
/// struct Greeter(String);
///
/// struct GreeterFactory;
///
/// impl Factory for GreeterFactory {
///     fn create(&self, container: &dyn Container, _service: &str, _options: Option<&Value>) -> SmResult<Value> {
///         let name = container.get("name")?;
///         Ok(Value::service(Greeter(name.as_str().unwrap_or("world").to_string())))
///     }
/// }
///
/// let mut manager = ServiceManager::new(Arc::new(TypeCatalog::new()));
/// manager.add_service("name", Value::from("ferris"));
/// manager.add_factory("greeter", FactoryBinding::instance(GreeterFactory)).unwrap();
/// manager.add_factory_fn("shout", |_c, _id, _opts| Ok(Value::from("HEY")));
///
/// let greeter = manager.get_as::<Greeter>("greeter").unwrap();
/// assert_eq!(greeter.0, "ferris");
/// assert_eq!(manager.get("shout").unwrap(), Value::from("HEY"));
/// ```
pub trait Factory: Send + Sync {
    fn create(&self, container: &dyn Container, service: &str, options: Option<&Value>) -> SmResult<Value>;
}

impl<F> Factory for F
where
    F: Fn(&dyn Container, &str, Option<&Value>) -> SmResult<Value> + Send + Sync,
{
    fn create(&self, container: &dyn Container, service: &str, options: Option<&Value>) -> SmResult<Value> {
        self(container, service, options)
    }
}

/// Fallback factory queried through a capability check before it is asked
/// to construct anything.
///
/// `can_create` must be free of construction side effects: the registry
/// calls it from `has`.
pub trait AbstractFactory: Factory {
    fn can_create(&self, container: &dyn Container, service: &str) -> bool;
}
