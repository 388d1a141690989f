//! Key/value persistence for small integer scalars
//!
//! Storage is best-effort: a failed read looks like an absent key and a
//! failed write is logged and dropped. Nothing in the game is allowed to
//! stall or crash because storage misbehaved.
//!
//! Backends:
//! - [`MemoryStore`]: in-memory (tests, headless runs)
//! - [`JsonFileStore`]: a JSON object on disk (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32)

use std::collections::BTreeMap;

/// Storage collaborator for persisted scalars
pub trait RecordStore {
    /// Read an integer, `None` if absent or unreadable
    fn get(&self, key: &str) -> Option<i64>;
    /// Write an integer (best-effort)
    fn set(&mut self, key: &str, value: i64);
    /// Push buffered writes to the backing medium. Stores that write through do nothing.
    fn flush(&mut self) {}
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
    /// Number of `set` calls (lets tests check write frequency)
    pub writes: usize,
    /// Number of `flush` calls
    pub flushes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: i64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn get(&self, key: &str) -> Option<i64> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: i64) {
        (**self).set(key, value)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

/// JSON object file (`{"key": 123}`) on disk
///
/// Writes are buffered until [`RecordStore::flush`] or drop, so a record run
/// doesn't rewrite the file every meter.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
    values: BTreeMap<String, i64>,
    dirty: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    /// Open (or lazily create) the store at `path`. Missing or corrupt files start empty.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("Ignoring corrupt store {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self {
            path,
            values,
            dirty: false,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Unflushed writes pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn write_file(&self) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RecordStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        match self.write_file() {
            Ok(()) => self.dirty = false,
            Err(e) => log::warn!("Failed to save {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Drop for JsonFileStore {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl RecordStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<i64> {
        let raw = Self::storage()?.get_item(key).ok()??;
        raw.trim().parse().ok()
    }

    fn set(&mut self, key: &str, value: i64) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, &value.to_string()).is_err() {
                    log::warn!("LocalStorage write failed for {}", key);
                }
            }
            None => log::warn!("LocalStorage unavailable, {} not saved", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("best"), None);
        store.set("best", 42);
        assert_eq!(store.get("best"), Some(42));
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn RecordStore> = Box::new(MemoryStore::with_value("k", 3));
        assert_eq!(store.get("k"), Some(3));
        store.set("k", 4);
        assert_eq!(store.get("k"), Some(4));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_json_file_store_persists() {
        let path = std::env::temp_dir().join(format!("hill_climb_store_{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get("best"), None);
        store.set("best", 1_234);
        store.flush();
        assert!(!store.is_dirty());

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("best"), Some(1_234));
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_json_file_store_buffers_until_flush() {
        let path = std::env::temp_dir().join(format!("hill_climb_buffered_{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path);
        for meters in 1..=50 {
            store.set("best", meters);
        }
        assert!(store.is_dirty());
        assert!(!path.exists());

        // Dropping flushes the last value
        drop(store);
        assert_eq!(JsonFileStore::open(&path).get("best"), Some(50));
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_json_file_store_tolerates_corruption() {
        let path = std::env::temp_dir().join(format!("hill_climb_corrupt_{}.json", std::process::id()));
        std::fs::write(&path, "{ definitely not json").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("best"), None);
        let _ = std::fs::remove_file(&path);
    }
}
