//! # ferrous-sm
//!
//! String-keyed service manager: a registry mapping identifiers to services,
//! factories, invokable classes and a chain of abstract factories, with
//! descriptor-driven autowiring of constructor dependencies.
//!
//! ## Features
//!
//! - **Direct services**: any [`Value`], from configuration maps to constructed objects
//! - **Factories**: closures, factory objects or catalog factory classes per id
//! - **Invokables**: catalog classes constructed directly, options spread as arguments
//! - **Abstract factories**: ordered fallback chain, e.g. [`ReflectionFactory`] autowiring
//! - **Aliases**: one-hop renaming of identifiers
//! - **Shared instances**: `get` memoizes, `create_service` always builds fresh
//! - **Thread-safe**: configure with `&mut`, then share and resolve through `&self`
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_sm::{Constructor, Parameter, ReflectionFactory, ServiceManager, TypeCatalog, Value};
//! use std::sync::Arc;
//!
//! struct Database {
//!     dsn: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! // Describe the constructible types
//! let mut catalog = TypeCatalog::new();
//! catalog.class("Database", Constructor::public([Parameter::new("dsn")]), |args| {
//!     Ok(Database { dsn: args.string(0)? })
//! });
//! catalog.class("UserService", Constructor::public([Parameter::new("db").typed("Database")]), |args| {
//!     Ok(UserService { db: args.object(0)? })
//! });
//!
//! // Register services
//! let mut manager = ServiceManager::new(Arc::new(catalog));
//! manager.add_factory_fn("Database", |container, _id, _options| {
//!     let dsn = container.get("dsn")?;
//!     Ok(Value::service(Database { dsn: dsn.as_str().unwrap_or_default().to_string() }))
//! });
//! manager.add_service("dsn", "postgres://localhost");
//! manager.add_abstract_factory(ReflectionFactory::NAME).unwrap();
//!
//! // Resolve
//! let users = manager.get_as::<UserService>("UserService").unwrap();
//! assert_eq!(users.db.dsn, "postgres://localhost");
//! ```
//!
//! ## Error Handling
//!
//! Every failure during creation surfaces as
//! [`SmError::ServiceCreationFailed`] naming the requested id, with the
//! underlying cause as its source:
//!
//! ```rust
//! use ferrous_sm::{ServiceManager, SmError, TypeCatalog};
//! use std::sync::Arc;
//!
//! let manager = ServiceManager::new(Arc::new(TypeCatalog::new()));
//! let error = manager.get("mailer").unwrap_err();
//! assert!(matches!(error.root_cause(), SmError::FactoryNotFound(id) if id == "mailer"));
//! ```

pub mod catalog;
pub mod error;
pub mod factories;
pub mod key;
pub mod manager;
pub mod observer;
pub mod registration;
pub mod traits;
pub mod value;

#[cfg(feature = "config")]
pub mod config;

// Re-export core types
pub use catalog::{Arguments, Constructor, Parameter, TypeCatalog, TypeDescriptor, TypeHint, TypeShape};
pub use error::{SmError, SmResult};
pub use factories::{DynamicFactory, InvokableFactory, ReflectionFactory};
pub use key::Key;
pub use manager::{ServiceManager, ServiceManagerBuilder};
pub use observer::{ResolutionObserver, TracingObserver};
pub use registration::{AbstractFactoryEntry, FactoryBinding};
pub use traits::{AbstractFactory, Container, Factory};
pub use value::{AnyArc, Value};

#[cfg(feature = "config")]
pub use config::ServiceManagerConfig;
