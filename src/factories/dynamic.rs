use crate::catalog::TypeShape;
use crate::error::{SmError, SmResult};
use crate::traits::{AbstractFactory, Container, Factory};
use crate::value::Value;

/// Convention-based abstract factory: service `X` is built by the catalog
/// class `XFactory`.
///
/// ```
/// use ferrous_sm::{Container, DynamicFactory, ServiceManager, SmResult, TypeCatalog, Value};
/// use std::sync::Arc;
///
/// struct Mailer;
///
/// let mut catalog = TypeCatalog::new();
/// catalog.factory("MailerFactory", || {
///     |_c: &dyn Container, _id: &str, _o: Option<&Value>| -> SmResult<Value> { Ok(Value::service(Mailer)) }
/// });
///
/// let mut manager = ServiceManager::new(Arc::new(catalog));
/// manager.add_abstract_factory(DynamicFactory::NAME).unwrap();
///
/// assert!(manager.has("Mailer"));
/// assert!(!manager.has("Printer"));
/// assert!(manager.get_as::<Mailer>("Mailer").is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicFactory;

impl DynamicFactory {
    /// Catalog name of this factory class.
    pub const NAME: &'static str = "DynamicFactory";

    fn factory_name(service: &str) -> String {
        format!("{}Factory", service)
    }
}

impl Factory for DynamicFactory {
    fn create(&self, container: &dyn Container, service: &str, options: Option<&Value>) -> SmResult<Value> {
        if !self.can_create(container, service) {
            return Err(SmError::CannotCreate(service.to_string()));
        }

        let factory_name = Self::factory_name(service);
        match container.catalog().get(&factory_name).map(|descriptor| descriptor.shape()) {
            Some(TypeShape::Factory(make)) => make().create(container, service, options),
            Some(TypeShape::AbstractFactory(make)) => make().create(container, service, options),
            _ => Err(SmError::InvalidDynamicFactory {
                factory: factory_name,
                service: service.to_string(),
            }),
        }
    }
}

impl AbstractFactory for DynamicFactory {
    fn can_create(&self, container: &dyn Container, service: &str) -> bool {
        container.catalog().is_class(&Self::factory_name(service))
    }
}
