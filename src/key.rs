//! Index keys for the service manager's indexed accessors.

use std::fmt;

use crate::error::{SmError, SmResult};

/// Key accepted by the indexed accessors (`offset_get`, `offset_set`, ...).
///
/// Service identifiers are strings. The indexed accessors accept anything
/// convertible into a `Key` so that callers driving the registry from
/// loosely-typed input (bootstrap tables, config walkers) get a typed
/// [`SmError::InvalidArgumentKind`] instead of a silent stringification.
///
/// # Examples
///
/// ```rust
/// use ferrous_sm::{Key, SmError};
///
/// let id = Key::from("mailer");
/// assert_eq!(id.as_id().unwrap(), "mailer");
///
/// let index = Key::from(123i64);
/// assert!(matches!(index.as_id(), Err(SmError::InvalidArgumentKind)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A string service identifier
    Id(String),
    /// A positional index, never a valid service identifier
    Index(i64),
}

impl Key {
    /// Returns the service identifier, or fails for non-string keys.
    pub fn as_id(&self) -> SmResult<&str> {
        match self {
            Key::Id(id) => Ok(id),
            Key::Index(_) => Err(SmError::InvalidArgumentKind),
        }
    }

    /// Returns true for string identifiers.
    pub fn is_id(&self) -> bool {
        matches!(self, Key::Id(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Id(id) => write!(f, "{}", id),
            Key::Index(index) => write!(f, "#{}", index),
        }
    }
}

impl From<&str> for Key {
    fn from(id: &str) -> Self {
        Key::Id(id.to_string())
    }
}

impl From<String> for Key {
    fn from(id: String) -> Self {
        Key::Id(id)
    }
}

impl From<&String> for Key {
    fn from(id: &String) -> Self {
        Key::Id(id.clone())
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(i64::from(index))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}
