//! Domain entities stored by the shelter administration core.
//!
//! Each type implements the [`Entity`](entity_store::Entity) contract; the
//! four main records all carry the soft-delete capability.

pub mod adoption;
pub mod animal;
pub mod customer;
pub mod employee;

pub use adoption::{Adoption, AdoptionStatus};
pub use animal::{Animal, AnimalStatus, Species};
pub use customer::Customer;
pub use employee::Employee;
