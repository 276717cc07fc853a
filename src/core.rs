//! Core Shelterhaus functionality
//!
//! This module contains the main `Shelter` struct, wiring one shared store
//! per entity type into the per-type repositories and the adoption
//! lifecycle coordinator.

use config::AppConfig;

use crate::coordinator::AdoptionCoordinator;
use crate::errors::ShelterError;
use crate::repository::{
    AdoptionRepository, AnimalRepository, CustomerRepository, EmployeeRepository,
};
use crate::seed;

/// Main coordinator facade over the shelter's repositories.
///
/// Each repository owns the single store instance for its backing file;
/// the coordinator holds clones sharing those same instances, so the
/// per-file concurrency guard covers everything reached from here.
#[derive(Debug, Clone)]
pub struct Shelter {
    animals: AnimalRepository,
    adoptions: AdoptionRepository,
    customers: CustomerRepository,
    employees: EmployeeRepository,
    coordinator: AdoptionCoordinator,
}

impl Shelter {
    /// Build the repositories and coordinator over `config.storage.data_dir`,
    /// seeding missing backing files when `config.seed_on_open` is set.
    pub async fn open(config: AppConfig) -> Result<Self, ShelterError> {
        let data_dir = &config.storage.data_dir;

        let animals = AnimalRepository::new(data_dir);
        let adoptions = AdoptionRepository::new(data_dir);
        let customers = CustomerRepository::new(data_dir);
        let employees = EmployeeRepository::new(data_dir);

        let coordinator = AdoptionCoordinator::new(
            adoptions.clone(),
            animals.clone(),
            customers.clone(),
            employees.clone(),
        );

        let shelter = Self {
            animals,
            adoptions,
            customers,
            employees,
            coordinator,
        };

        if config.seed_on_open {
            seed::seed_defaults(&shelter).await?;
        }

        Ok(shelter)
    }

    pub fn animals(&self) -> &AnimalRepository {
        &self.animals
    }

    pub fn adoptions(&self) -> &AdoptionRepository {
        &self.adoptions
    }

    pub fn customers(&self) -> &CustomerRepository {
        &self.customers
    }

    pub fn employees(&self) -> &EmployeeRepository {
        &self.employees
    }

    pub fn coordinator(&self) -> &AdoptionCoordinator {
        &self.coordinator
    }

    /// Populate any missing backing files with sample records. Backing files
    /// that already exist are left alone.
    pub async fn seed(&self) -> Result<(), ShelterError> {
        seed::seed_defaults(self).await
    }
}
