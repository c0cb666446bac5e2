//! Container trait handed to every factory.

use std::any::Any;
use std::sync::Arc;

use crate::catalog::TypeCatalog;
use crate::error::{SmError, SmResult};
use crate::value::Value;

/// Object-safe view of a service registry.
///
/// Factories never see the concrete [`ServiceManager`](crate::ServiceManager);
/// they receive a `&dyn Container`, which keeps them testable against a
/// stub and keeps recursive resolution (a factory asking for its own
/// dependencies) going through the same public contract as external callers.
///
/// # Examples
///
/// ```
/// use ferrous_sm::{Container, ServiceManager, TypeCatalog, Value};
/// use std::sync::Arc;
///
/// fn describe(container: &dyn Container, id: &str) -> String {
///     if container.has(id) {
///         format!("{} is available", id)
///     } else {
///         format!("{} is missing", id)
///     }
/// }
///
/// let mut manager = ServiceManager::new(Arc::new(TypeCatalog::new()));
/// manager.add_service("config", Value::from(123));
///
/// assert_eq!(describe(&manager, "config"), "config is available");
/// assert_eq!(describe(&manager, "mailer"), "mailer is missing");
/// ```
pub trait Container {
    /// True if `id` can be resolved without failing on a missing binding.
    fn has(&self, id: &str) -> bool;

    /// Resolves `id`, sharing the instance across calls where the
    /// implementation caches.
    fn get(&self, id: &str) -> SmResult<Value>;

    /// The type catalog used for descriptor lookups.
    fn catalog(&self) -> &TypeCatalog;

    /// Resolves `id` and downcasts it to a concrete object type.
    fn get_as<T: Any + Send + Sync>(&self, id: &str) -> SmResult<Arc<T>>
    where
        Self: Sized,
    {
        self.get(id)?.downcast::<T>().ok_or_else(|| SmError::TypeMismatch {
            service: id.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }
}
