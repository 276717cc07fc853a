//! Animal repository: validation rules and availability lookups.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use entity_store::{validate_base, FileStore, StoreError};

use super::Repository;
use crate::entities::{Animal, AnimalStatus, Species};

/// Field-level checks layered on the base validation.
pub fn validate_animal(animal: &Animal) -> Result<(), StoreError> {
    validate_base(animal)?;

    if animal.name.trim().is_empty() {
        return Err(StoreError::validation("animal", "name must not be empty"));
    }
    if let Some(weight) = animal.weight_kg {
        if weight < 0.0 {
            return Err(StoreError::validation(
                "animal",
                format!("weight must not be negative (got {weight})"),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct AnimalRepository {
    store: Arc<FileStore<Animal>>,
}

impl AnimalRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let store = FileStore::new(data_dir).with_validator(validate_animal);
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn find_by_status(&self, status: AnimalStatus) -> Result<Vec<Animal>, StoreError> {
        self.store.find(move |a: &Animal| a.status == status).await
    }

    pub async fn find_available(&self) -> Result<Vec<Animal>, StoreError> {
        self.find_by_status(AnimalStatus::Available).await
    }

    pub async fn find_by_species(&self, species: Species) -> Result<Vec<Animal>, StoreError> {
        self.store
            .find(move |a: &Animal| a.species == species)
            .await
    }

    /// Case-insensitive substring match; blank input returns an empty list.
    pub async fn find_by_name(&self, fragment: &str) -> Result<Vec<Animal>, StoreError> {
        let fragment = fragment.trim().to_lowercase();
        if fragment.is_empty() {
            return Ok(Vec::new());
        }
        self.store
            .find(move |a: &Animal| a.name.to_lowercase().contains(&fragment))
            .await
    }
}

#[async_trait]
impl Repository for AnimalRepository {
    type Entity = Animal;

    fn store(&self) -> &FileStore<Animal> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_animal_rejects_blank_name() {
        let animal = Animal::new("   ", Species::Dog);
        assert!(matches!(
            validate_animal(&animal),
            Err(StoreError::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_animal_rejects_negative_weight() {
        let mut animal = Animal::new("Rex", Species::Dog);
        animal.weight_kg = Some(-1.5);
        assert!(matches!(
            validate_animal(&animal),
            Err(StoreError::Validation { .. })
        ));

        animal.weight_kg = Some(12.0);
        assert!(validate_animal(&animal).is_ok());
    }
}
