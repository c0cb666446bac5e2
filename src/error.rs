//! Error types for the service manager.

use thiserror::Error;

/// Service manager errors
///
/// Covers every failure the registry can report: registration-time
/// validation, factory lookup, descriptor-driven construction and the
/// top-level [`SmError::ServiceCreationFailed`] wrapper that every failure
/// inside a factory is folded into.
///
/// # Examples
///
/// ```rust
/// use ferrous_sm::{ServiceManager, SmError, TypeCatalog};
/// use std::sync::Arc;
///
/// let manager = ServiceManager::new(Arc::new(TypeCatalog::new()));
/// match manager.get("mailer") {
///     Err(SmError::ServiceCreationFailed { service, source }) => {
///         assert_eq!(service, "mailer");
///         assert!(matches!(*source, SmError::FactoryNotFound(_)));
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum SmError {
    /// A referenced type descriptor is not in the catalog
    #[error("The class \"{0}\" does not exist.")]
    ClassNotFound(String),

    /// A factory descriptor given at registration is not in the catalog
    #[error("The factory \"{0}\" does not exist.")]
    FactoryDoesNotExist(String),

    /// The factory bound to a service is neither callable nor a factory type
    #[error("The factory for service \"{service}\" is invalid.")]
    InvalidFactory { service: String },

    /// The `{id}Factory` class found by the dynamic factory is not a factory
    #[error("Dynamic factory \"{factory}\" for service \"{service}\" is invalid.")]
    InvalidDynamicFactory { factory: String, service: String },

    /// An abstract factory descriptor given at registration is not in the catalog
    #[error("The abstract factory \"{0}\" does not exist.")]
    AbstractFactoryDoesNotExist(String),

    /// An abstract factory descriptor does not provide the abstract factory capability
    #[error("The abstract factory \"{0}\" is invalid.")]
    InvalidAbstractFactory(String),

    /// No binding of any kind exists for the service
    #[error("Factory for service \"{0}\" not found.")]
    FactoryNotFound(String),

    /// A factory was asked for a service it cannot build
    #[error("Cannot create service \"{0}\"!")]
    CannotCreate(String),

    /// A scalar or untyped constructor parameter has no default
    #[error("Unable to create service \"{service}\": Cannot resolve parameter \"{parameter}\" to a class or interface!")]
    ParameterNotResolvable { service: String, parameter: String },

    /// A class-typed constructor parameter is neither registered nor optional
    #[error("Unable to create service \"{service}\": Cannot resolve parameter \"{parameter}\" using type hint \"{type_hint}\"!")]
    DependencyNotFound {
        service: String,
        parameter: String,
        type_hint: String,
    },

    /// Options handed to the invokable factory are not a positional list
    #[error("Cannot create service \"{0}\": Invalid options given.")]
    InvalidOptions(String),

    /// A positional constructor argument is missing or has the wrong shape
    #[error("Cannot create service \"{service}\": argument {position} must be {expected}.")]
    InvalidArgument {
        service: String,
        position: usize,
        expected: &'static str,
    },

    /// A resolved value could not be downcast to the requested type
    #[error("The service \"{service}\" is not of type {expected}.")]
    TypeMismatch {
        service: String,
        expected: &'static str,
    },

    /// Top-level wrapper raised by `create_service` and `get`
    #[error("The service \"{service}\" could not be created.")]
    ServiceCreationFailed {
        service: String,
        #[source]
        source: Box<SmError>,
    },

    /// A non-string index was passed to an indexed accessor
    #[error("The service ID must be of type string.")]
    InvalidArgumentKind,

    /// Malformed service manager configuration
    #[error("Invalid service manager configuration: {0}")]
    InvalidConfig(String),

    /// Failure reported by a user-supplied factory or constructor
    #[error("{0}")]
    Custom(String),
}

impl SmError {
    /// Creates a [`SmError::Custom`] error from any message.
    pub fn custom(message: impl Into<String>) -> Self {
        SmError::Custom(message.into())
    }

    /// Wraps `cause` as the failure to create `service`.
    pub(crate) fn creation_failed(service: impl Into<String>, cause: SmError) -> Self {
        SmError::ServiceCreationFailed {
            service: service.into(),
            source: Box::new(cause),
        }
    }

    /// Returns the innermost error of a [`SmError::ServiceCreationFailed`] chain.
    ///
    /// Nested resolution wraps once per `create_service` boundary, so a
    /// failure three dependencies deep is wrapped three times.
    ///
    /// ```rust
    /// use ferrous_sm::SmError;
    ///
    /// let inner = SmError::FactoryNotFound("db".into());
    /// let err = SmError::ServiceCreationFailed {
    ///     service: "repo".into(),
    ///     source: Box::new(SmError::ServiceCreationFailed {
    ///         service: "db".into(),
    ///         source: Box::new(inner),
    ///     }),
    /// };
    /// assert!(matches!(err.root_cause(), SmError::FactoryNotFound(id) if id == "db"));
    /// ```
    pub fn root_cause(&self) -> &SmError {
        let mut current = self;
        while let SmError::ServiceCreationFailed { source, .. } = current {
            current = source.as_ref();
        }
        current
    }
}

/// Result type for service manager operations
pub type SmResult<T> = Result<T, SmError>;
