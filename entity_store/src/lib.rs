//! Entity Store - Core persistence layer for Shelterhaus
//!
//! This crate provides the foundational types for the file-backed entity
//! store: the entity contract, the generic store with its concurrency guard,
//! query helpers, and the validation extension point.

pub mod entity;
pub mod errors;
pub mod file_store;
pub mod prelude;
pub mod query;

pub use entity::{validate_base, Entity};
pub use errors::StoreError;
pub use file_store::FileStore;
pub use query::{Page, SortOrder};
