#![cfg(feature = "config")]

mod common;

use common::{ClassWithoutDependencies, FooBar};
use ferrous_sm::{ServiceManager, ServiceManagerConfig, SmError, Value};

const CONFIG: &str = r#"{
    "services": {
        "config": { "foo": "bar", "retries": 3 }
    },
    "factories": {
        "FooBar": "FooBarFactory"
    },
    "invokables": ["ClassWithoutDependencies"],
    "abstract_factories": ["DynamicFactory", "ReflectionFactory"],
    "aliases": {
        "configuration": "config",
        "foobar": "FooBar"
    }
}"#;

#[test]
fn test_manager_from_json() {
    let config = ServiceManagerConfig::from_json(CONFIG).unwrap();
    let manager = ServiceManager::from_config(common::shared_catalog(), config).unwrap();

    let configuration = manager.get("configuration").unwrap();
    assert_eq!(configuration.get("foo"), Some(&Value::from("bar")));
    assert_eq!(configuration.get("retries"), Some(&Value::Int(3)));

    assert!(manager.get_as::<FooBar>("foobar").is_ok());
    assert_eq!(manager.get_as::<ClassWithoutDependencies>("ClassWithoutDependencies").unwrap().id, 1);
    assert!(manager.has("ConsoleLogger"));
    assert_eq!(manager.abstract_factory_count(), 2);
}

#[test]
fn test_invalid_entry_aborts_construction() {
    let config = ServiceManagerConfig::from_json(r#"{ "invokables": ["Plain", "Ghost"] }"#).unwrap();
    let result = ServiceManager::from_config(common::shared_catalog(), config);
    assert!(matches!(result, Err(SmError::ClassNotFound(name)) if name == "Ghost"));

    let config = ServiceManagerConfig::from_json(r#"{ "abstract_factories": ["FooBarFactory"] }"#).unwrap();
    let result = ServiceManager::from_config(common::shared_catalog(), config);
    assert!(matches!(result, Err(SmError::InvalidAbstractFactory(_))));
}

#[test]
fn test_builder_combines_config_and_code() {
    let config = ServiceManagerConfig::from_json(r#"{ "aliases": { "answer": "the-answer" } }"#).unwrap();
    let manager = ServiceManager::builder(common::shared_catalog())
        .with_config(config)
        .factory_fn("the-answer", |_c, _id, _o| Ok(Value::from(42)))
        .build()
        .unwrap();

    assert_eq!(manager.get("answer").unwrap(), Value::Int(42));
}
