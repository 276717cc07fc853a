//! Store construction and the guarded load/save cycle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::entity::{validate_base, Entity};
use crate::errors::StoreError;

/// Validation hook run before every `create` and `update`.
pub(crate) type Validator<T> = Arc<dyn Fn(&T) -> Result<(), StoreError> + Send + Sync>;

/// Generic file-backed store for one entity type.
///
/// Every operation reloads the whole backing file, mutates the in-memory
/// collection, and rewrites the whole file, with the instance-level lock
/// held across the full cycle. Callers that need the lock to actually
/// serialize access must share one instance per backing file (wrap it in an
/// `Arc`); two instances over the same path do not guard each other.
pub struct FileStore<T: Entity> {
    pub(crate) path: PathBuf,
    pub(crate) lock: Mutex<()>,
    pub(crate) validator: Validator<T>,
}

impl<T: Entity> std::fmt::Debug for FileStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("entity", &T::entity_name())
            .field("path", &self.path)
            .finish()
    }
}

impl<T: Entity> FileStore<T> {
    /// Create a store whose backing file is `<data_dir>/<entity_name>.json`.
    ///
    /// Neither the directory nor the file needs to exist yet; both are
    /// created lazily on the first write, and a missing file reads as an
    /// empty collection.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let path = data_dir
            .as_ref()
            .join(format!("{}.json", T::entity_name()));
        Self::at_path(path)
    }

    /// Create a store over an explicit backing file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            validator: Arc::new(validate_base::<T>),
        }
    }

    /// Replace the validation hook.
    ///
    /// The hook fully replaces the default base check, so composed
    /// validators are expected to call [`validate_base`] first themselves.
    pub fn with_validator(
        mut self,
        validator: impl Fn(&T) -> Result<(), StoreError> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection from the backing file.
    ///
    /// Missing file and empty/whitespace file both read as an empty
    /// collection. Must be called with the store lock held.
    pub(crate) async fn load(&self) -> Result<Vec<T>, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(T::entity_name(), "read", &self.path, e)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw)
            .map_err(|e| StoreError::serialization(T::entity_name(), "deserialize", &self.path, e))
    }

    /// Rewrite the backing file with the full collection.
    ///
    /// Creates the containing directory if missing. Must be called with the
    /// store lock held.
    pub(crate) async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(T::entity_name(), "prepare", &self.path, e))?;
        }

        let raw = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::serialization(T::entity_name(), "serialize", &self.path, e))?;

        fs::write(&self.path, raw)
            .await
            .map_err(|e| StoreError::io(T::entity_name(), "write", &self.path, e))?;

        debug!(
            entity = T::entity_name(),
            records = records.len(),
            "persisted collection"
        );
        Ok(())
    }
}
