//! Persisted slot backends.
//!
//! The cart survives restarts through a string key-value slot: one
//! serialized snapshot per key, read once at startup and overwritten
//! after every successful mutation.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

/// Fixed key under which the cart snapshot is persisted.
pub const CART_SLOT_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur reading or writing a slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot encoding failed.
    #[error("Encoding error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Durable string key-value storage surviving process restarts.
#[allow(async_fn_in_trait)]
pub trait SlotStore {
    /// Read the value stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Overwrite the value stored under `key`.
    ///
    /// The write must be atomic: a crash mid-write leaves either the old
    /// snapshot or the new one, never a torn file.
    async fn write(&self, key: &str, value: &str) -> Result<(), SlotError>;
}

impl<T: SlotStore> SlotStore for std::sync::Arc<T> {
    async fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        (**self).write(key, value).await
    }
}

/// Slot backend mapping each key to a JSON file in a base directory.
///
/// Key characters outside `[A-Za-z0-9]` are sanitized to `_` when forming
/// the file name, so keys like `@RocketShoes:cart` stay valid paths.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    dir: PathBuf,
}

impl JsonFileSlot {
    /// Create a slot over `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl SlotStore for JsonFileSlot {
    async fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SlotError::Io(e)),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write to a temporary sibling, then rename over the target.
        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &target).await?;

        Ok(())
    }
}

/// In-memory slot backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySlot {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStore for MemorySlot {
    async fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.entries().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_slot_roundtrip() {
        let slot = MemorySlot::new();
        assert!(slot.read(CART_SLOT_KEY).await.expect("read").is_none());

        slot.write(CART_SLOT_KEY, "[]").await.expect("write");
        assert_eq!(
            slot.read(CART_SLOT_KEY).await.expect("read").as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_file_slot_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let slot = JsonFileSlot::new(dir.path());

        assert!(slot.read(CART_SLOT_KEY).await.expect("read").is_none());

        slot.write(CART_SLOT_KEY, r#"[{"id":1}]"#).await.expect("write");
        assert_eq!(
            slot.read(CART_SLOT_KEY).await.expect("read").as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[tokio::test]
    async fn test_file_slot_overwrite_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let slot = JsonFileSlot::new(dir.path());

        slot.write(CART_SLOT_KEY, "old").await.expect("write");
        slot.write(CART_SLOT_KEY, "new").await.expect("write");

        assert_eq!(
            slot.read(CART_SLOT_KEY).await.expect("read").as_deref(),
            Some("new")
        );

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(entries.len(), 1, "temp file should be renamed away");
    }

    #[test]
    fn test_file_slot_sanitizes_key() {
        let slot = JsonFileSlot::new("/data");
        let path = slot.path_for(CART_SLOT_KEY);
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("_RocketShoes_cart.json")
        );
    }
}
