//! Soft-delete administration.
//!
//! Soft-deleted rows stay physically present in the backing file and are
//! excluded from every normal read. These operations inspect, restore, or
//! purge them.

use tracing::debug;

use super::core::FileStore;
use crate::entity::Entity;
use crate::errors::StoreError;

impl<T: Entity> FileStore<T> {
    /// All soft-deleted records still present in the backing file.
    pub async fn list_deleted(&self) -> Result<Vec<T>, StoreError> {
        if !T::supports_soft_delete() {
            return Err(StoreError::validation(
                T::entity_name(),
                "entity type does not support soft deletion",
            ));
        }

        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records.into_iter().filter(|r| r.is_deleted()).collect())
    }

    /// Clear the delete markers on a soft-deleted record, making it active
    /// again.
    pub async fn restore(&self, id: i32) -> Result<T, StoreError> {
        if !T::supports_soft_delete() {
            return Err(StoreError::validation(
                T::entity_name(),
                "entity type does not support soft deletion",
            ));
        }

        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let pos = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::entity_name(), id))?;

        if !records[pos].is_deleted() {
            return Err(StoreError::conflict(
                T::entity_name(),
                format!("id {} is not deleted", id),
            ));
        }

        records[pos].clear_deleted();
        let restored = records[pos].clone();
        self.save(&records).await?;

        debug!(entity = T::entity_name(), id, "restored record");
        Ok(restored)
    }

    /// Physically remove a row, whatever its delete marker says.
    pub async fn purge(&self, id: i32) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let pos = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::entity_name(), id))?;

        records.remove(pos);
        self.save(&records).await?;

        debug!(entity = T::entity_name(), id, "purged record");
        Ok(())
    }
}
