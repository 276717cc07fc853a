//! Per-type repositories: thin specializations of the generic store.
//!
//! Each repository shares one [`FileStore`] instance per backing file
//! (wrapped in an `Arc`, so clones keep the same concurrency guard),
//! installs its composed validator, and layers type-specific lookups as
//! plain `find` wrappers.

pub mod adoption;
pub mod animal;
pub mod customer;
pub mod employee;

pub use adoption::AdoptionRepository;
pub use animal::AnimalRepository;
pub use customer::CustomerRepository;
pub use employee::EmployeeRepository;

use async_trait::async_trait;
use entity_store::{Entity, FileStore, Page, StoreError};

/// Common repository surface delegating to the underlying store.
///
/// Repositories override the defaults only where a type adds behavior
/// (e.g. the customer's unique-email check on writes).
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Entity;

    /// The shared store this repository wraps.
    fn store(&self) -> &FileStore<Self::Entity>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Self::Entity>, StoreError> {
        self.store().get_by_id(id).await
    }

    async fn list_all(&self) -> Result<Vec<Self::Entity>, StoreError> {
        self.store().list_all().await
    }

    async fn create(&self, entity: Self::Entity) -> Result<Self::Entity, StoreError> {
        self.store().create(entity).await
    }

    async fn update(&self, entity: Self::Entity) -> Result<Self::Entity, StoreError> {
        self.store().update(entity).await
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.store().delete(id).await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.store().count().await
    }

    async fn get_paged(
        &self,
        page_number: usize,
        page_size: usize,
    ) -> Result<Page<Self::Entity>, StoreError> {
        self.store()
            .find_paged(page_number, page_size, None::<fn(&Self::Entity) -> bool>)
            .await
    }
}
