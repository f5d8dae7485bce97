//! Request handlers.

pub mod dog;
pub mod health;
