//! Error types for the entity store
//!
//! This module contains all error types that can be returned by store
//! operations, each carrying the entity type and enough context for a
//! caller to choose appropriate messaging without parsing free text.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} validation failed: {message}")]
    Validation {
        entity: &'static str,
        message: String,
    },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{entity} with id {id} is already deleted")]
    AlreadyDeleted { entity: &'static str, id: i32 },

    #[error("{entity} conflict: {message}")]
    Conflict {
        entity: &'static str,
        message: String,
    },

    #[error("failed to {op} {entity} store at {path}: {source}")]
    Io {
        entity: &'static str,
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {op} {entity} records at {path}: {source}")]
    Serialization {
        entity: &'static str,
        op: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            entity,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn already_deleted(entity: &'static str, id: i32) -> Self {
        Self::AlreadyDeleted { entity, id }
    }

    pub fn conflict(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            message: message.into(),
        }
    }

    pub fn io(entity: &'static str, op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            entity,
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn serialization(
        entity: &'static str,
        op: &'static str,
        path: &Path,
        source: serde_json::Error,
    ) -> Self {
        Self::Serialization {
            entity,
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}
