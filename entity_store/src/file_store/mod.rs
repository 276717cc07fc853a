//! The generic file-backed store.
//!
//! One [`FileStore`] instance owns one backing file (a pretty-printed JSON
//! array) for one entity type and serializes every load-modify-save cycle
//! against it through a single mutex. There is no long-lived in-memory
//! cache: what the file says is what the store says.

mod core;
mod crud;
mod query;
mod soft_delete;


pub use self::core::FileStore;
