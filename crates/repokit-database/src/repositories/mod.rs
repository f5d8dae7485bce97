//! Repository layer: the generic facade and concrete entity repositories.

pub mod dog;
pub mod generic;

pub use dog::DogRepository;
pub use generic::{CrudRepository, GenericRepository};
