//! Constructor parameter descriptors.

use crate::value::Value;

/// Declared type of a constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// No declared type
    Untyped,
    /// The generic sequence type; always resolved to an empty list
    Array,
    /// A named type: a catalog class or interface, or a scalar such as `int`
    Named(String),
}

/// Describes one constructor parameter.
///
/// Built fluently and handed to [`Constructor::public`]. Whether a parameter
/// is optional depends on its position, see [`Constructor::is_optional`].
///
/// ```
/// use ferrous_sm::{Parameter, TypeHint, Value};
///
/// let p = Parameter::new("baz").typed("int").default_value(123);
/// assert_eq!(p.name(), "baz");
/// assert_eq!(p.hint(), &TypeHint::Named("int".into()));
/// assert_eq!(p.default(), Some(&Value::Int(123)));
/// ```
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    hint: TypeHint,
    default: Option<Value>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: TypeHint::Untyped,
            default: None,
        }
    }

    /// Declares the parameter type by name. `"array"` declares the generic
    /// sequence type, same as [`Parameter::array`].
    pub fn typed(mut self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        self.hint = if type_name == "array" { TypeHint::Array } else { TypeHint::Named(type_name) };
        self
    }

    /// Declares the parameter as the generic sequence type.
    pub fn array(mut self) -> Self {
        self.hint = TypeHint::Array;
        self
    }

    /// Gives the parameter a default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hint(&self) -> &TypeHint {
        &self.hint
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Shape of a class constructor.
#[derive(Debug, Clone)]
pub enum Constructor {
    /// The class declares no constructor
    Implicit,
    /// A public constructor with the given parameters
    Public(Vec<Parameter>),
    /// A constructor that cannot be called from outside the class
    Restricted,
}

impl Constructor {
    /// Builds a public constructor.
    pub fn public(parameters: impl IntoIterator<Item = Parameter>) -> Self {
        Constructor::Public(parameters.into_iter().collect())
    }

    /// Parameters of a public constructor; empty otherwise.
    pub fn parameters(&self) -> &[Parameter] {
        match self {
            Constructor::Public(parameters) => parameters,
            Constructor::Implicit | Constructor::Restricted => &[],
        }
    }

    /// True if the parameter at `position` and every later one have a default.
    ///
    /// ```
    /// use ferrous_sm::{Constructor, Parameter};
    ///
    /// let ctor = Constructor::public([
    ///     Parameter::new("a").default_value(1),
    ///     Parameter::new("b"),
    ///     Parameter::new("c").default_value(3),
    /// ]);
    /// let optional: Vec<bool> = (0..3).map(|i| ctor.is_optional(i)).collect();
    /// assert_eq!(optional, vec![false, false, true]);
    /// ```
    pub fn is_optional(&self, position: usize) -> bool {
        self.parameters()
            .get(position..)
            .is_some_and(|tail| !tail.is_empty() && tail.iter().all(Parameter::has_default))
    }

    /// True unless the constructor is restricted.
    pub fn is_accessible(&self) -> bool {
        !matches!(self, Constructor::Restricted)
    }
}
