//! Key-value storage backends for the session store.
//!
//! Mirrors the `localStorage` surface (`getItem`/`setItem`/`removeItem`) so the
//! browser backend is a thin wrapper and the in-memory backend can stand in
//! for it natively, during SSR and in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage area exists (SSR, private mode, sandboxed iframe).
    #[error("storage is not available")]
    Unavailable,
    /// The backend refused the operation (quota exceeded, security error).
    #[error("storage operation failed: {0}")]
    Backend(String),
    #[error("failed to serialize value: {0}")]
    Serialize(String),
}

/// Minimal string key-value store.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage`, resolved on every call so a storage area that
/// disappears (cleared site data) degrades to `Unavailable`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }

    /// Whether the browser exposes `localStorage` at all
    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_clones_share_items() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("k", "v").unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));

        other.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_remove_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove_item("missing").is_ok());
        assert_eq!(storage.get_item("missing").unwrap(), None);
    }
}
