mod common;

use common::{FooBar, Plain};
use ferrous_sm::{
    AbstractFactory, AbstractFactoryEntry, Container, DynamicFactory, Factory, ReflectionFactory, ServiceManager,
    SmError, SmResult, Value,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Accepts ids with a fixed prefix and echoes the id back.
struct PrefixFactory(&'static str);

impl Factory for PrefixFactory {
    fn create(&self, _container: &dyn Container, service: &str, _options: Option<&Value>) -> SmResult<Value> {
        Ok(Value::from(format!("{}:{}", self.0, service)))
    }
}

impl AbstractFactory for PrefixFactory {
    fn can_create(&self, _container: &dyn Container, service: &str) -> bool {
        service.starts_with(self.0)
    }
}

#[test]
fn test_add_abstract_factory_instance() {
    let mut manager = common::manager();
    manager.add_abstract_factory(AbstractFactoryEntry::instance(DynamicFactory)).unwrap();

    assert!(manager.get_as::<FooBar>("FooBar").is_ok());
}

#[test]
fn test_add_abstract_factory_by_descriptor() {
    let mut manager = common::manager();
    manager.add_abstract_factory(DynamicFactory::NAME).unwrap();

    assert!(manager.get_as::<FooBar>("FooBar").is_ok());
}

#[test]
fn test_has_consults_abstract_factories() {
    let mut manager = common::manager();
    manager.add_abstract_factory(DynamicFactory::NAME).unwrap();

    assert!(manager.has("FooBar"));
    assert!(!manager.has("config"));
}

#[test]
fn test_dynamic_factory_rejects_non_factory_class() {
    let mut catalog = common::catalog();
    catalog.class("WidgetFactory", ferrous_sm::Constructor::Implicit, |_| Ok(Plain));
    let mut manager = ServiceManager::new(Arc::new(catalog));
    manager.add_abstract_factory(DynamicFactory::NAME).unwrap();

    assert!(manager.has("Widget"));
    let error = manager.get("Widget").unwrap_err();
    assert!(matches!(
        error.root_cause(),
        SmError::InvalidDynamicFactory { factory, service } if factory == "WidgetFactory" && service == "Widget"
    ));
}

#[test]
fn test_dynamic_factory_direct_call_without_factory_class() {
    let manager = common::manager();
    let result = DynamicFactory.create(&manager, "Plain", None);
    assert!(matches!(result, Err(SmError::CannotCreate(id)) if id == "Plain"));
}

#[test]
fn test_chain_is_consulted_in_registration_order() {
    let mut manager = common::manager();
    manager.add_abstract_factory(AbstractFactoryEntry::instance(PrefixFactory("app"))).unwrap();
    manager.add_abstract_factory(AbstractFactoryEntry::instance(PrefixFactory("a"))).unwrap();

    assert_eq!(manager.get("app.mailer").unwrap(), Value::from("app:app.mailer"));
    assert_eq!(manager.get("audit").unwrap(), Value::from("a:audit"));
    assert!(!manager.has("zeta"));
    assert_eq!(manager.abstract_factory_count(), 2);
}

#[test]
fn test_explicit_bindings_beat_abstract_factories() {
    let mut manager = common::manager();
    manager.add_abstract_factory(AbstractFactoryEntry::instance(PrefixFactory("app"))).unwrap();
    manager.add_factory_fn("app.mailer", |_c, _id, _o| Ok(Value::from("explicit")));

    assert_eq!(manager.get("app.mailer").unwrap(), Value::from("explicit"));
}

#[test]
fn test_matched_abstract_factory_is_memoized_per_id() {
    let mut manager = common::manager();
    manager.add_abstract_factory(ReflectionFactory::NAME).unwrap();

    let first = manager.create_service("Plain", None).unwrap();
    let second = manager.create_service("Plain", None).unwrap();
    assert!(!first.same_instance(&second));
    assert!(first.downcast::<Plain>().is_some());
}

#[test]
fn test_descriptor_abstract_factory_is_instantiated_once() {
    let instantiations = Arc::new(AtomicUsize::new(0));
    let mut catalog = common::catalog();
    let counter = instantiations.clone();
    catalog.abstract_factory("CountingReflection", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        ReflectionFactory
    });

    let mut manager = ServiceManager::new(Arc::new(catalog));
    manager.add_abstract_factory("CountingReflection").unwrap();

    assert!(manager.has("Plain"));
    assert!(manager.has("ConsoleLogger"));
    assert!(!manager.has("LoggerInterface"));
    manager.get("Plain").unwrap();
    manager.get("ConsoleLogger").unwrap();
    manager.create_service("Plain", None).unwrap();

    assert_eq!(instantiations.load(Ordering::SeqCst), 1);
}

#[test]
fn test_registration_rejects_unknown_or_invalid_descriptor() {
    let mut manager = common::manager();

    let result = manager.add_abstract_factory("Missing");
    assert!(matches!(result, Err(SmError::AbstractFactoryDoesNotExist(name)) if name == "Missing"));

    let result = manager.add_abstract_factory("FooBarFactory");
    assert!(matches!(result, Err(SmError::InvalidAbstractFactory(name)) if name == "FooBarFactory"));

    let result = manager.add_abstract_factory("Plain");
    assert!(matches!(result, Err(SmError::InvalidAbstractFactory(_))));

    assert_eq!(manager.abstract_factory_count(), 0);
}

#[test]
fn test_abstract_factory_as_explicit_factory() {
    let mut manager = common::manager();
    manager.add_factory("Plain", ReflectionFactory::NAME).unwrap();

    assert!(manager.get_as::<Plain>("Plain").is_ok());
}

#[test]
fn test_end_to_end_dynamic_and_reflection() {
    let mut manager = ServiceManager::builder(common::shared_catalog())
        .factory("Foo", "FooBarFactory")
        .invokable("Plain")
        .abstract_factory(DynamicFactory::NAME)
        .abstract_factory(ReflectionFactory::NAME)
        .build()
        .unwrap();

    assert!(manager.get_as::<FooBar>("Foo").is_ok());
    assert!(manager.get_as::<Plain>("Plain").is_ok());

    assert!(manager.has("ConsoleLogger"));
    assert!(manager.get_as::<common::ConsoleLogger>("ConsoleLogger").is_ok());
    assert!(!manager.has("Baz"));

    manager.remove_service("Plain");
    assert!(manager.has("Plain"));
}
