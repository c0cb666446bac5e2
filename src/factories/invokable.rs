use crate::catalog::Arguments;
use crate::error::{SmError, SmResult};
use crate::traits::{Container, Factory};
use crate::value::Value;

/// Constructs a type directly, optionally spreading a positional option list
/// as constructor arguments.
///
/// Only the catalog is consulted; the container's `has`/`get` are never
/// called, so every dependency must come in through the options.
///
/// ```
/// use ferrous_sm::{Constructor, Parameter, ServiceManager, TypeCatalog, Value};
/// use std::sync::Arc;
///
/// struct Point { x: i64, y: i64 }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.class("Point", Constructor::public([
///     Parameter::new("x").typed("int").default_value(0),
///     Parameter::new("y").typed("int").default_value(0),
/// ]), |args| Ok(Point { x: args.int(0)?, y: args.int(1)? }));
///
/// let mut manager = ServiceManager::new(Arc::new(catalog));
/// manager.add_invokable("Point").unwrap();
///
/// let origin = manager.get_as::<Point>("Point").unwrap();
/// assert_eq!((origin.x, origin.y), (0, 0));
///
/// let p = manager.create_service("Point", Some(Value::List(vec![Value::from(3), Value::from(4)]))).unwrap();
/// let p = p.downcast::<Point>().unwrap();
/// assert_eq!((p.x, p.y), (3, 4));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokableFactory;

impl InvokableFactory {
    /// Catalog name of this factory class.
    pub const NAME: &'static str = "InvokableFactory";
}

impl Factory for InvokableFactory {
    fn create(&self, container: &dyn Container, service: &str, options: Option<&Value>) -> SmResult<Value> {
        let descriptor = container
            .catalog()
            .get(service)
            .ok_or_else(|| SmError::ClassNotFound(service.to_string()))?;

        if descriptor.constructor().is_some_and(|constructor| !constructor.is_accessible()) {
            return Err(SmError::CannotCreate(service.to_string()));
        }

        let values = match options {
            None | Some(Value::Null) => Vec::new(),
            Some(options) => options
                .clone()
                .into_list()
                .ok_or_else(|| SmError::InvalidOptions(service.to_string()))?,
        };

        let parameters = descriptor
            .constructor()
            .map(|constructor| constructor.parameters())
            .unwrap_or_default();
        let args = Arguments::new(service, values).padded_with_defaults(parameters);

        descriptor
            .instantiate(&args)
            .unwrap_or_else(|| Err(SmError::CannotCreate(service.to_string())))
    }
}
