//! Convenience re-exports for common entity-store usage

// Core contract and store
pub use crate::entity::{validate_base, Entity};
pub use crate::file_store::FileStore;

// Error types
pub use crate::errors::StoreError;

// Query helpers
pub use crate::query::{Page, SortOrder};

// Common external dependencies that are frequently used alongside the store
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
