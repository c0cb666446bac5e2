mod common;

use common::{ClassWithoutDependencies, FooBar, Plain};
use ferrous_sm::{Container, Factory, InvokableFactory, SmError, SmResult, TypeCatalog, Value};
use std::collections::BTreeMap;

/// Container whose `has`/`get` must never be reached.
struct CatalogOnly(TypeCatalog);

impl Container for CatalogOnly {
    fn has(&self, id: &str) -> bool {
        panic!("unexpected has({})", id)
    }

    fn get(&self, id: &str) -> SmResult<Value> {
        panic!("unexpected get({})", id)
    }

    fn catalog(&self) -> &TypeCatalog {
        &self.0
    }
}

fn container() -> CatalogOnly {
    CatalogOnly(common::catalog())
}

#[test]
fn test_invoke_without_options() {
    let created = InvokableFactory.create(&container(), "ClassWithoutDependencies", None).unwrap();
    assert_eq!(created.downcast::<ClassWithoutDependencies>().unwrap().id, 1);

    let created = InvokableFactory.create(&container(), "Plain", None).unwrap();
    assert!(created.downcast::<Plain>().is_some());
}

#[test]
fn test_invoke_with_positional_options() {
    let options = Value::List(vec![Value::from("foo"), Value::from("bar")]);
    let created = InvokableFactory.create(&container(), "FooBar", Some(&options)).unwrap();
    let foo_bar = created.downcast::<FooBar>().unwrap();
    assert_eq!(foo_bar.foo, "foo");
    assert_eq!(foo_bar.bar, "bar");
}

#[test]
fn test_invoke_overrides_defaults() {
    let options = Value::List(vec![Value::from(42)]);
    let created = InvokableFactory.create(&container(), "ClassWithoutDependencies", Some(&options)).unwrap();
    assert_eq!(created.downcast::<ClassWithoutDependencies>().unwrap().id, 42);
}

#[test]
fn test_invoke_with_empty_map_counts_as_empty_list() {
    let options = Value::Map(BTreeMap::new());
    let created = InvokableFactory.create(&container(), "ClassWithoutDependencies", Some(&options)).unwrap();
    assert_eq!(created.downcast::<ClassWithoutDependencies>().unwrap().id, 1);
}

#[test]
fn test_invoke_with_null_options_uses_defaults() {
    let created = InvokableFactory.create(&container(), "ClassWithoutDependencies", Some(&Value::Null)).unwrap();
    assert_eq!(created.downcast::<ClassWithoutDependencies>().unwrap().id, 1);

    let mut manager = common::manager();
    manager.add_invokable("ClassWithoutDependencies").unwrap();
    let created = manager.create_service("ClassWithoutDependencies", Some(Value::Null)).unwrap();
    assert_eq!(created.downcast::<ClassWithoutDependencies>().unwrap().id, 1);
}

#[test]
fn test_invoke_with_keyed_options_fails() {
    let options = Value::from([("id", Value::from(5))]);
    let result = InvokableFactory.create(&container(), "ClassWithoutDependencies", Some(&options));
    assert!(matches!(result, Err(SmError::InvalidOptions(id)) if id == "ClassWithoutDependencies"));

    let result = InvokableFactory.create(&container(), "ClassWithoutDependencies", Some(&Value::from("x")));
    assert!(matches!(result, Err(SmError::InvalidOptions(_))));
}

#[test]
fn test_invoke_missing_arguments() {
    let result = InvokableFactory.create(&container(), "FooBar", None);
    match result {
        Err(SmError::InvalidArgument { service, position, .. }) => {
            assert_eq!(service, "FooBar");
            assert_eq!(position, 0);
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_invoke_unknown_interface_or_restricted() {
    assert!(matches!(
        InvokableFactory.create(&container(), "Nope", None),
        Err(SmError::ClassNotFound(id)) if id == "Nope"
    ));
    assert!(matches!(
        InvokableFactory.create(&container(), "LoggerInterface", None),
        Err(SmError::CannotCreate(_))
    ));
    assert!(matches!(InvokableFactory.create(&container(), "Locked", None), Err(SmError::CannotCreate(_))));
}

#[test]
fn test_invokable_through_manager_spreads_options() {
    let mut manager = common::manager();
    manager.add_invokable("FooBar").unwrap();

    let options = Value::List(vec![Value::from("a"), Value::from("b")]);
    let first = manager.create_service("FooBar", Some(options.clone())).unwrap();
    let second = manager.create_service("FooBar", Some(options)).unwrap();
    assert!(!first.same_instance(&second));
    assert_eq!(first.downcast::<FooBar>().unwrap().bar, "b");

    // Shared resolution has no options to spread.
    let error = manager.get("FooBar").unwrap_err();
    assert!(matches!(error.root_cause(), SmError::InvalidArgument { .. }));
}

#[test]
fn test_invokable_factory_registered_explicitly() {
    let mut manager = common::manager();
    manager.add_factory("Plain", InvokableFactory::NAME).unwrap();

    assert!(manager.get_as::<Plain>("Plain").is_ok());
}
