//! Resolution observers.
//!
//! Hooks invoked around every `create_service` call, for tracing, timing or
//! collecting failures without wrapping the registry.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::error::SmError;

/// Observer of service creation events.
///
/// `id` is always the identifier as requested by the caller, before alias
/// rewriting.
///
/// # Examples
///
/// ```
/// use ferrous_sm::{ResolutionObserver, ServiceManager, SmError, TypeCatalog, Value};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Failures(Mutex<Vec<String>>);
///
/// impl ResolutionObserver for Failures {
///     fn resolving(&self, _id: &str) {}
///     fn resolved(&self, _id: &str, _duration: Duration) {}
///     fn creation_failed(&self, id: &str, _error: &SmError) {
///         self.0.lock().unwrap().push(id.to_string());
///     }
/// }
///
/// let failures = Arc::new(Failures::default());
/// let mut manager = ServiceManager::new(Arc::new(TypeCatalog::new()));
/// manager.add_observer(failures.clone());
///
/// assert!(manager.get("missing").is_err());
/// assert_eq!(*failures.0.lock().unwrap(), vec!["missing".to_string()]);
/// ```
pub trait ResolutionObserver: Send + Sync {
    /// Called before a factory is looked up and invoked.
    fn resolving(&self, id: &str);

    /// Called after a service was created.
    fn resolved(&self, id: &str, duration: Duration);

    /// Called with the unwrapped cause when creation fails.
    fn creation_failed(&self, id: &str, error: &SmError);
}

/// Observer forwarding every event to `tracing`.
///
/// ```
/// use ferrous_sm::{ServiceManager, TracingObserver, TypeCatalog};
/// use std::sync::Arc;
///
/// let mut manager = ServiceManager::new(Arc::new(TypeCatalog::new()));
/// manager.add_observer(Arc::new(TracingObserver::new()));
/// ```
#[derive(Debug, Clone)]
pub struct TracingObserver {
    target: &'static str,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self { target: "ferrous_sm" }
    }

    /// Tags events with a custom label, recorded as the `observer` field.
    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionObserver for TracingObserver {
    fn resolving(&self, id: &str) {
        trace!(observer = self.target, service = %id, "Resolving");
    }

    fn resolved(&self, id: &str, duration: Duration) {
        debug!(observer = self.target, service = %id, ?duration, "Resolved");
    }

    fn creation_failed(&self, id: &str, error: &SmError) {
        warn!(observer = self.target, service = %id, error = %error, "Creation failed");
    }
}

#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, id: &str) {
        for observer in &self.observers {
            observer.resolving(id);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, id: &str, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(id, duration);
        }
    }

    #[inline]
    pub(crate) fn creation_failed(&self, id: &str, error: &SmError) {
        for observer in &self.observers {
            observer.creation_failed(id, error);
        }
    }
}
