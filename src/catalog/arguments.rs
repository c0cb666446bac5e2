//! Positional constructor arguments.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::Parameter;
use crate::error::{SmError, SmResult};
use crate::value::Value;

/// Positional argument list handed to a class's build closure.
///
/// Accessors fail with [`SmError::InvalidArgument`] naming the service and
/// the position, so a build closure can simply use `?`.
///
/// # Examples
///
/// ```
/// use ferrous_sm::{Arguments, Value};
///
/// let args = Arguments::new("FooBar", vec![Value::from("foo"), Value::from(3)]);
/// assert_eq!(args.string(0).unwrap(), "foo");
/// assert_eq!(args.int(1).unwrap(), 3);
/// assert!(args.string(2).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Arguments {
    service: String,
    values: Vec<Value>,
}

impl Arguments {
    pub fn new(service: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            service: service.into(),
            values,
        }
    }

    /// Fills the positions after the supplied values with declared defaults.
    ///
    /// Padding stops at the first parameter without a default; the build
    /// closure reports the missing argument.
    pub(crate) fn padded_with_defaults(mut self, parameters: &[Parameter]) -> Self {
        for parameter in parameters.iter().skip(self.values.len()) {
            match parameter.default() {
                Some(default) => self.values.push(default.clone()),
                None => break,
            }
        }
        self
    }

    /// Name of the service being constructed.
    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The raw value at `position`.
    pub fn value(&self, position: usize) -> SmResult<&Value> {
        self.values
            .get(position)
            .ok_or_else(|| self.invalid(position, "present"))
    }

    /// A constructed object of type `T`.
    pub fn object<T: Any + Send + Sync>(&self, position: usize) -> SmResult<Arc<T>> {
        self.value(position)?
            .downcast::<T>()
            .ok_or_else(|| self.invalid(position, std::any::type_name::<T>()))
    }

    /// A constructed object of type `T`, or `None` for a null or absent argument.
    pub fn optional_object<T: Any + Send + Sync>(&self, position: usize) -> SmResult<Option<Arc<T>>> {
        match self.values.get(position) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .downcast::<T>()
                .map(Some)
                .ok_or_else(|| self.invalid(position, std::any::type_name::<T>())),
        }
    }

    pub fn string(&self, position: usize) -> SmResult<String> {
        self.value(position)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(position, "a string"))
    }

    pub fn int(&self, position: usize) -> SmResult<i64> {
        self.value(position)?
            .as_int()
            .ok_or_else(|| self.invalid(position, "an int"))
    }

    pub fn float(&self, position: usize) -> SmResult<f64> {
        self.value(position)?
            .as_float()
            .ok_or_else(|| self.invalid(position, "a float"))
    }

    pub fn bool(&self, position: usize) -> SmResult<bool> {
        self.value(position)?
            .as_bool()
            .ok_or_else(|| self.invalid(position, "a bool"))
    }

    pub fn list(&self, position: usize) -> SmResult<Vec<Value>> {
        self.value(position)?
            .as_list()
            .map(<[Value]>::to_vec)
            .ok_or_else(|| self.invalid(position, "a list"))
    }

    pub fn map(&self, position: usize) -> SmResult<BTreeMap<String, Value>> {
        self.value(position)?
            .as_map()
            .cloned()
            .ok_or_else(|| self.invalid(position, "a map"))
    }

    fn invalid(&self, position: usize, expected: &'static str) -> SmError {
        SmError::InvalidArgument {
            service: self.service.clone(),
            position,
            expected,
        }
    }
}
