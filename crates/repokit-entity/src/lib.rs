//! # repokit-entity
//!
//! Entity models for Repokit. Every struct in this crate represents a
//! database table row, derives `Debug`, `Clone`, `Serialize`,
//! `Deserialize` and `sqlx::FromRow`, and implements
//! [`repokit_core::Entity`].

pub mod dog;

pub use dog::Dog;
