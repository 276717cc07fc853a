//! Error types for the Shelterhaus crate
//!
//! This module contains the domain-level error type. Store failures of any
//! kind surface through the single `Repository` variant; lifecycle
//! violations get their own typed variants so presentation layers can pick
//! messaging without parsing free text.

use entity_store::StoreError;
use thiserror::Error;

use crate::entities::{AdoptionStatus, AnimalStatus};

#[derive(Debug, Error)]
pub enum ShelterError {
    #[error("repository operation failed: {0}")]
    Repository(#[from] StoreError),

    #[error("adoption {id} is {actual:?}, expected {expected}")]
    InvalidTransition {
        id: i32,
        expected: &'static str,
        actual: AdoptionStatus,
    },

    #[error("animal {id} is not available for adoption (status {status:?})")]
    AnimalNotAvailable { id: i32, status: AnimalStatus },

    #[error("animal {animal_id} already has an open adoption ({adoption_id})")]
    OpenAdoptionExists { animal_id: i32, adoption_id: i32 },
}
