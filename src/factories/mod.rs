//! Built-in factories.
//!
//! - [`InvokableFactory`] constructs a type from caller-supplied positional
//!   options, without looking anything up in the container.
//! - [`ReflectionFactory`] autowires a type from its catalog constructor
//!   descriptor, resolving class-typed parameters through the container.
//! - [`DynamicFactory`] delegates to a `"{id}Factory"` class by naming
//!   convention.

mod dynamic;
mod invokable;
mod reflection;

pub use dynamic::DynamicFactory;
pub use invokable::InvokableFactory;
pub use reflection::ReflectionFactory;
