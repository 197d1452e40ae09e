// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-term fact memory backed by a single JSON file.
//!
//! The file holds one flat JSON object mapping string keys to string values.
//! Every operation loads the whole object from disk, and every write replaces
//! the whole file. A missing or malformed file reads as an empty mapping.
//!
//! Operations on one [`MemoryStore`] are serialized by an async mutex held
//! across load, mutate and persist, so concurrent saves on different keys
//! never lose each other's writes. Writes go to a sibling temp file that is
//! then renamed over the target.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tna_core::TnaError;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

/// Key/value fact store persisted to a JSON file.
#[derive(Debug)]
pub struct MemoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl MemoryStore {
    /// Creates a store backed by `path`. The file is not touched until the
    /// first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn save(&self, key: &str, value: &str) -> Result<(), TnaError> {
        let _guard = self.lock.lock().await;
        let mut facts = self.load().await?;
        facts.insert(key.to_string(), value.to_string());
        self.persist(&facts).await?;
        debug!(key, path = %self.path.display(), "fact saved");
        Ok(())
    }

    /// Returns the value stored under `key`, if any.
    pub async fn read(&self, key: &str) -> Result<Option<String>, TnaError> {
        let _guard = self.lock.lock().await;
        let mut facts = self.load().await?;
        Ok(facts.remove(key))
    }

    /// Snapshot of every stored fact, sorted by key.
    pub async fn entries(&self) -> Result<Vec<(String, String)>, TnaError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_iter().collect())
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, TnaError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(TnaError::storage("failed to read memory file", e)),
        };

        // Invalid UTF-8 is just another malformed file.
        match serde_json::from_slice(&raw) {
            Ok(facts) => Ok(facts),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "memory file is malformed, treating as empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    async fn persist(&self, facts: &BTreeMap<String, String>) -> Result<(), TnaError> {
        let json = serde_json::to_string_pretty(facts).map_err(|e| TnaError::Storage {
            message: format!("failed to serialize memory: {e}"),
            source: Some(Box::new(e)),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                TnaError::storage(format!("failed to create {}", parent.display()), e)
            })?;
        }

        let tmp = temp_path(&self.path);
        let result = async {
            tokio::fs::write(&tmp, json.as_bytes())
                .await
                .map_err(|e| TnaError::storage("failed to write memory temp file", e))?;
            tokio::fs::rename(&tmp, &self.path)
                .await
                .map_err(|e| TnaError::storage("failed to replace memory file", e))
        }
        .await;

        if let Err(e) = &result {
            error!(path = %self.path.display(), error = %e, "memory persist failed");
            let _ = tokio::fs::remove_file(&tmp).await;
        }
        result
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "memory".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> MemoryStore {
        MemoryStore::new(dir.path().join("agent_memory.json"))
    }

    #[tokio::test]
    async fn save_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save("wifi_password", "hunter2").await.unwrap();
        assert_eq!(
            store.read("wifi_password").await.unwrap().as_deref(),
            Some("hunter2")
        );
    }

    #[tokio::test]
    async fn missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.read("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save("parking", "level 2").await.unwrap();
        store.save("parking", "level 4").await.unwrap();
        assert_eq!(store.read("parking").await.unwrap().as_deref(), Some("level 4"));
    }

    #[tokio::test]
    async fn facts_survive_reconstruction() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).save("birthday", "March 3").await.unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.read("birthday").await.unwrap().as_deref(),
            Some("March 3")
        );
    }

    #[tokio::test]
    async fn file_is_pretty_flat_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("a", "1").await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!({"a": "1"}));
        assert!(!dir.path().join("agent_memory.json.tmp").exists());
    }

    #[tokio::test]
    async fn malformed_file_reads_as_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.read("anything").await.unwrap(), None);
        store.save("k", "v").await.unwrap();
        assert_eq!(store.entries().await.unwrap(), vec![("k".into(), "v".into())]);
    }

    #[tokio::test]
    async fn non_utf8_file_reads_as_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), [0xFF, 0xFE, 0x00, 0x7B]).unwrap();

        assert_eq!(store.read("k").await.unwrap(), None);
        store.save("k", "v").await.unwrap();
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn non_string_values_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"count": 3}"#).unwrap();
        assert!(store.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new(dir.path().join("nested/deeper/memory.json"));
        store.save("k", "v").await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn entries_are_sorted_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("b", "2").await.unwrap();
        store.save("a", "1").await.unwrap();

        assert_eq!(
            store.entries().await.unwrap(),
            vec![("a".into(), "1".into()), ("b".into(), "2".into())]
        );
    }

    #[tokio::test]
    async fn concurrent_saves_on_different_keys_all_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.save(&format!("key{i}"), &format!("value{i}")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let reopened = store_in(&dir);
        assert_eq!(reopened.entries().await.unwrap().len(), 16);
        assert_eq!(reopened.read("key7").await.unwrap().as_deref(), Some("value7"));
    }

    #[tokio::test]
    async fn unwritable_location_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = MemoryStore::new(blocker.join("memory.json"));

        let err = store.save("k", "v").await.unwrap_err();
        assert!(matches!(err, TnaError::Storage { .. }), "got: {err}");
    }
}
