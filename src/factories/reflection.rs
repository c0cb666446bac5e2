use tracing::trace;

use crate::catalog::{Arguments, Constructor, Parameter, TypeHint};
use crate::error::{SmError, SmResult};
use crate::traits::{AbstractFactory, Container, Factory};
use crate::value::Value;

/// Autowiring abstract factory.
///
/// Builds any catalog class with an accessible constructor, resolving each
/// constructor parameter against the container:
///
/// 1. An `Array`-typed parameter always receives an empty list.
/// 2. An untyped parameter, or one typed with a name that is neither a
///    catalog class nor interface (scalars), receives its default or fails
///    with [`SmError::ParameterNotResolvable`].
/// 3. A class/interface-typed parameter receives `container.get(type)` when
///    `container.has(type)`, else its default when optional, else fails with
///    [`SmError::DependencyNotFound`].
///
/// Resolution recurses through the container without cycle detection; a
/// cyclic graph exhausts the stack.
///
/// ```
/// use ferrous_sm::{Constructor, Parameter, ReflectionFactory, ServiceManager, TypeCatalog, Value};
/// use std::sync::Arc;
///
/// struct Clock;
/// struct Scheduler { clock: Arc<Clock>, ticks: i64 }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.class("Clock", Constructor::Implicit, |_| Ok(Clock));
/// catalog.class("Scheduler", Constructor::public([
///     Parameter::new("clock").typed("Clock"),
///     Parameter::new("ticks").typed("int").default_value(60),
/// ]), |args| Ok(Scheduler { clock: args.object::<Clock>(0)?, ticks: args.int(1)? }));
///
/// let mut manager = ServiceManager::new(Arc::new(catalog));
/// manager.add_abstract_factory(ReflectionFactory::NAME).unwrap();
///
/// let scheduler = manager.get_as::<Scheduler>("Scheduler").unwrap();
/// assert_eq!(scheduler.ticks, 60);
/// assert!(Arc::ptr_eq(&scheduler.clock, &manager.get_as::<Clock>("Clock").unwrap()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectionFactory;

impl ReflectionFactory {
    /// Catalog name of this factory class.
    pub const NAME: &'static str = "ReflectionFactory";

    fn resolve_parameter(
        container: &dyn Container,
        service: &str,
        parameter: &Parameter,
        optional: bool,
    ) -> SmResult<Value> {
        let type_name = match parameter.hint() {
            TypeHint::Array => return Ok(Value::List(Vec::new())),
            TypeHint::Named(type_name) if container.catalog().contains(type_name) => type_name,
            TypeHint::Untyped | TypeHint::Named(_) => {
                return parameter.default().cloned().ok_or_else(|| SmError::ParameterNotResolvable {
                    service: service.to_string(),
                    parameter: parameter.name().to_string(),
                });
            }
        };

        if container.has(type_name) {
            trace!(service = %service, parameter = %parameter.name(), dependency = %type_name, "Resolving dependency");
            return container.get(type_name);
        }

        if optional {
            return Ok(parameter.default().cloned().unwrap_or_default());
        }

        Err(SmError::DependencyNotFound {
            service: service.to_string(),
            parameter: parameter.name().to_string(),
            type_hint: type_name.clone(),
        })
    }
}

impl Factory for ReflectionFactory {
    fn create(&self, container: &dyn Container, service: &str, _options: Option<&Value>) -> SmResult<Value> {
        if !self.can_create(container, service) {
            return Err(SmError::CannotCreate(service.to_string()));
        }

        let descriptor = container
            .catalog()
            .get(service)
            .ok_or_else(|| SmError::CannotCreate(service.to_string()))?;

        let values = match descriptor.constructor() {
            Some(constructor @ Constructor::Public(parameters)) => parameters
                .iter()
                .enumerate()
                .map(|(position, parameter)| {
                    Self::resolve_parameter(container, service, parameter, constructor.is_optional(position))
                })
                .collect::<SmResult<Vec<_>>>()?,
            _ => Vec::new(),
        };

        descriptor
            .instantiate(&Arguments::new(service, values))
            .unwrap_or_else(|| Err(SmError::CannotCreate(service.to_string())))
    }
}

impl AbstractFactory for ReflectionFactory {
    fn can_create(&self, container: &dyn Container, service: &str) -> bool {
        container
            .catalog()
            .get(service)
            .and_then(|descriptor| descriptor.constructor())
            .is_some_and(Constructor::is_accessible)
    }
}
