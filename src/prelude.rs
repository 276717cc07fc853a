//! Convenience re-exports for common Shelterhaus usage
//!
//! This prelude re-exports the most commonly used items from the
//! Shelterhaus ecosystem, making it easier to import everything you need
//! with a single use statement.

// Core Shelterhaus components
pub use crate::coordinator::AdoptionCoordinator;
pub use crate::core::Shelter;
pub use crate::errors::ShelterError;

// Domain entities
pub use crate::entities::{
    Adoption, AdoptionStatus, Animal, AnimalStatus, Customer, Employee, Species,
};

// Repositories and the common repository surface
pub use crate::repository::{
    AdoptionRepository, AnimalRepository, CustomerRepository, EmployeeRepository, Repository,
};

// Re-export centralized config
pub use config::{AppConfig, StorageConfig};

// Re-export commonly used store types for convenience
pub use entity_store::prelude::*;

// Common external dependencies
pub use tokio;
