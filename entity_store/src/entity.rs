//! The entity contract every stored record must satisfy.
//!
//! A record type opts into storage by implementing [`Entity`]: a unique
//! integer identity plus an optional soft-delete capability. The store
//! interrogates the capability through the defaulted methods instead of
//! assuming every type carries delete markers.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::StoreError;

/// Minimal shape of a stored record: integer identity, optional soft delete.
pub trait Entity:
    Clone + Send + Sync + Debug + Serialize + DeserializeOwned + 'static
{
    /// Stable name for this entity type, used for the backing file name and
    /// for error/log context.
    fn entity_name() -> &'static str;

    /// The record's identity. `0` means "unassigned - to be generated".
    fn id(&self) -> i32;

    /// Assign the identity. Called by the store exactly once, on insert.
    fn set_id(&mut self, id: i32);

    /// Whether this entity type carries soft-delete markers.
    fn supports_soft_delete() -> bool {
        false
    }

    fn is_deleted(&self) -> bool {
        false
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Mark the record as logically removed. No-op for types without the
    /// capability.
    fn mark_deleted(&mut self, _at: DateTime<Utc>) {}

    /// Reset the delete markers. No-op for types without the capability.
    fn clear_deleted(&mut self) {}
}

/// Base validation every entity passes before a write.
///
/// Per-type validators compose with this explicitly: call it first, then
/// layer the type's own field checks on top.
pub fn validate_base<T: Entity>(entity: &T) -> Result<(), StoreError> {
    if entity.id() < 0 {
        return Err(StoreError::validation(
            T::entity_name(),
            format!("id must not be negative (got {})", entity.id()),
        ));
    }
    Ok(())
}
