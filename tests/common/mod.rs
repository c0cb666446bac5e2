//! Shared fixture types and catalog for the integration suites.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ferrous_sm::{
    Constructor, Container, Factory, Parameter, ServiceManager, SmError, SmResult, TypeCatalog, Value,
};

#[derive(Debug)]
pub struct FooBar {
    pub foo: String,
    pub bar: String,
}

#[derive(Debug)]
pub struct ClassWithoutDependencies {
    pub id: i64,
}

#[derive(Debug)]
pub struct ClassWithoutFactory {
    pub foo: Arc<FooBar>,
    pub bar: Vec<Value>,
    pub baz: i64,
}

#[derive(Debug)]
pub struct ClassWithScalarParams {
    pub id: i64,
    pub foo: String,
}

#[derive(Debug)]
pub struct ClassWithOptionalLogger {
    pub logger: Option<Arc<ConsoleLogger>>,
}

#[derive(Debug)]
pub struct ConsoleLogger;

#[derive(Debug)]
pub struct Plain;

#[derive(Debug)]
pub struct Locked;

/// Builds `FooBar("foo", "bar")` regardless of options.
#[derive(Debug, Default)]
pub struct FooBarFactory;

impl Factory for FooBarFactory {
    fn create(&self, _container: &dyn Container, _service: &str, _options: Option<&Value>) -> SmResult<Value> {
        Ok(Value::service(FooBar { foo: "foo".into(), bar: "bar".into() }))
    }
}

/// Builds `FooBar` from the `foo` and `bar` option keys.
#[derive(Debug, Default)]
pub struct FooBarFactoryWithOptions;

impl Factory for FooBarFactoryWithOptions {
    fn create(&self, _container: &dyn Container, service: &str, options: Option<&Value>) -> SmResult<Value> {
        let option = |key: &str| -> SmResult<String> {
            options
                .and_then(|o| o.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| SmError::InvalidOptions(format!("{} requires option \"{}\"", service, key)))
        };
        Ok(Value::service(FooBar { foo: option("foo")?, bar: option("bar")? }))
    }
}

pub fn foo_bar_constructor() -> Constructor {
    Constructor::public([Parameter::new("foo").typed("string"), Parameter::new("bar").typed("string")])
}

/// Catalog holding every fixture type plus the built-in factories.
pub fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();

    catalog.class("FooBar", foo_bar_constructor(), |args| {
        Ok(FooBar { foo: args.string(0)?, bar: args.string(1)? })
    });
    catalog.factory("FooBarFactory", || FooBarFactory);
    catalog.factory("FooBarFactoryWithOptions", || FooBarFactoryWithOptions);

    catalog.class(
        "ClassWithoutDependencies",
        Constructor::public([Parameter::new("id").typed("int").default_value(1)]),
        |args| Ok(ClassWithoutDependencies { id: args.int(0)? }),
    );

    catalog.class(
        "ClassWithoutFactory",
        Constructor::public([
            Parameter::new("foo").typed("FooBar"),
            Parameter::new("bar").array(),
            Parameter::new("baz").typed("int").default_value(123),
        ]),
        |args| Ok(ClassWithoutFactory { foo: args.object(0)?, bar: args.list(1)?, baz: args.int(2)? }),
    );

    catalog.class(
        "ClassWithScalarParams",
        Constructor::public([Parameter::new("id").typed("int"), Parameter::new("foo").typed("string")]),
        |args| Ok(ClassWithScalarParams { id: args.int(0)?, foo: args.string(1)? }),
    );

    catalog.interface("LoggerInterface");
    catalog.class("ConsoleLogger", Constructor::Implicit, |_| Ok(ConsoleLogger));
    catalog.class(
        "ClassWithOptionalLogger",
        Constructor::public([Parameter::new("logger").typed("LoggerInterface").default_value(Value::Null)]),
        |args| Ok(ClassWithOptionalLogger { logger: args.optional_object(0)? }),
    );

    catalog.class("Plain", Constructor::Implicit, |_| Ok(Plain));
    catalog.class("Locked", Constructor::Restricted, |_| Ok(Locked));

    catalog
}

pub fn shared_catalog() -> Arc<TypeCatalog> {
    Arc::new(catalog())
}

pub fn manager() -> ServiceManager {
    ServiceManager::new(shared_catalog())
}

/// Factory closure that counts its invocations and returns a fresh `Plain`.
pub fn counting_factory(
    calls: Arc<AtomicUsize>,
) -> impl Fn(&dyn Container, &str, Option<&Value>) -> SmResult<Value> + Send + Sync + 'static {
    move |_container, _id, _options| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::service(Plain))
    }
}
