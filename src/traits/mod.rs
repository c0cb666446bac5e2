//! Core traits for the service manager.

mod container;
mod factory;

pub use container::Container;
pub use factory::{AbstractFactory, Factory};
