//! Dog domain entities.

pub mod model;

pub use model::Dog;
