//! Create/read/update/delete cycles over the backing file.

use chrono::Utc;
use tracing::debug;

use super::core::FileStore;
use crate::entity::Entity;
use crate::errors::StoreError;

impl<T: Entity> FileStore<T> {
    /// All non-deleted records.
    pub async fn list_all(&self) -> Result<Vec<T>, StoreError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records.into_iter().filter(|r| !r.is_deleted()).collect())
    }

    /// The non-deleted record with `id`, if any.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<T>, StoreError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .find(|r| r.id() == id && !r.is_deleted()))
    }

    /// Insert a record, assigning `max(existing ids) + 1` when `id == 0`.
    ///
    /// An active record with the same id is a conflict; a soft-deleted one
    /// is physically replaced by the newcomer. The generated id is based on
    /// all physical rows, deleted ones included, so it can never collide
    /// with a stale soft-deleted row.
    pub async fn create(&self, mut entity: T) -> Result<T, StoreError> {
        (self.validator)(&entity)?;

        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        if entity.id() == 0 {
            let next = records.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
            entity.set_id(next);
        } else if let Some(pos) = records.iter().position(|r| r.id() == entity.id()) {
            if records[pos].is_deleted() {
                // The stale soft-deleted row gives way to the id's new owner.
                records.remove(pos);
            } else {
                return Err(StoreError::conflict(
                    T::entity_name(),
                    format!("id {} already exists", entity.id()),
                ));
            }
        }

        entity.clear_deleted();
        records.push(entity.clone());
        self.save(&records).await?;

        debug!(entity = T::entity_name(), id = entity.id(), "created record");
        Ok(entity)
    }

    /// Replace the active record with the same id in place.
    pub async fn update(&self, entity: T) -> Result<T, StoreError> {
        (self.validator)(&entity)?;

        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let pos = records
            .iter()
            .position(|r| r.id() == entity.id() && !r.is_deleted())
            .ok_or_else(|| StoreError::not_found(T::entity_name(), entity.id()))?;

        records[pos] = entity.clone();
        self.save(&records).await?;

        debug!(entity = T::entity_name(), id = entity.id(), "updated record");
        Ok(entity)
    }

    /// Remove the active record with `id`: a soft delete (marker plus
    /// timestamp) when the type carries the capability, a physical removal
    /// otherwise.
    ///
    /// A record that is already soft-deleted yields [`StoreError::AlreadyDeleted`];
    /// a record that does not exist at all yields [`StoreError::NotFound`].
    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let pos = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::entity_name(), id))?;

        if records[pos].is_deleted() {
            return Err(StoreError::already_deleted(T::entity_name(), id));
        }

        if T::supports_soft_delete() {
            records[pos].mark_deleted(Utc::now());
        } else {
            records.remove(pos);
        }
        self.save(&records).await?;

        debug!(entity = T::entity_name(), id, "deleted record");
        Ok(())
    }

    /// Number of active records.
    pub async fn count(&self) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records.iter().filter(|r| !r.is_deleted()).count())
    }
}
