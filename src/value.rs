//! Loosely-typed values held and produced by the service manager.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "config")]
use serde::Deserialize;

// Type-erased Arc for constructed objects
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// A value stored in, or produced by, the service manager.
///
/// Services are not restricted to constructed objects: configuration arrays,
/// strings and numbers are valid services too. Constructed objects are held
/// as [`Value::Service`] and compare by identity; every other variant
/// compares structurally.
///
/// `Value` also doubles as the options argument of
/// [`ServiceManager::create_service`](crate::ServiceManager::create_service):
/// a [`Value::List`] is spread as positional constructor arguments by the
/// invokable factory, a [`Value::Map`] is handed to custom factories as-is.
///
/// # Examples
///
/// ```rust
/// use ferrous_sm::Value;
///
/// struct Mailer;
///
/// let a = Value::service(Mailer);
/// let b = a.clone();
/// assert!(a.same_instance(&b));
/// assert!(a.downcast::<Mailer>().is_some());
///
/// assert_eq!(Value::from(42), Value::Int(42));
/// assert!(Value::List(vec![Value::from("x")]).is_list());
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(untagged))]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// A constructed object
    #[cfg_attr(feature = "config", serde(skip))]
    Service(AnyArc),
}

impl Value {
    /// Wraps a constructed object.
    pub fn service<T: Any + Send + Sync>(value: T) -> Self {
        Value::Service(Arc::new(value))
    }

    /// Wraps an already shared object.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Value::Service(value)
    }

    /// Downcasts a [`Value::Service`] to `Arc<T>`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Value::Service(any) => any.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    /// True when both values are the very same constructed object.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Service(a), Value::Service(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// List-like check used for positional options.
    ///
    /// An empty map counts as a list, as an empty array is both.
    pub fn is_list(&self) -> bool {
        match self {
            Value::List(_) => true,
            Value::Map(map) => map.is_empty(),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key of a [`Value::Map`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Takes a positional list out of list-like options.
    pub(crate) fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            Value::Map(map) if map.is_empty() => Some(Vec::new()),
            _ => None,
        }
    }

    /// Short name of the variant for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Service(_) => "service",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Service(a), Value::Service(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({:?})", b),
            Value::Int(i) => write!(f, "Int({:?})", i),
            Value::Float(x) => write!(f, "Float({:?})", x),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Service(any) => write!(f, "Service({:p})", Arc::as_ptr(any)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Value {
    fn from(entries: [(&str, Value); N]) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}
