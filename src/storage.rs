use crate::errors::StorageError;
use crate::models::MoodEntry;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tokio::fs;
use tracing::{error, warn};

pub const ENTRIES_KEY: &str = "mood-tracker-entries";
pub const THEME_KEY: &str = "mood-tracker-theme";

/// Everything the views need from persistent storage.
pub trait MoodStorage {
    /// Stored entries, newest first. Missing or malformed data reads as empty.
    fn load(&self) -> Vec<MoodEntry>;

    /// Prepends `entry` and overwrites the stored list.
    fn append(&mut self, entry: MoodEntry);

    fn preference(&self, key: &str) -> Option<String>;

    fn set_preference(&mut self, key: &str, value: &str);
}

/// String-keyed, string-valued store with browser local-storage semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalStorage {
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    pub fn remove_item(&mut self, key: &str) -> Option<String> {
        self.items.remove(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl MoodStorage for LocalStorage {
    fn load(&self) -> Vec<MoodEntry> {
        let Some(raw) = self.get_item(ENTRIES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("ignoring malformed {ENTRIES_KEY} value: {err}");
                Vec::new()
            }
        }
    }

    fn append(&mut self, entry: MoodEntry) {
        let mut entries = self.load();
        entries.insert(0, entry);
        match serde_json::to_string(&entries) {
            Ok(raw) => self.set_item(ENTRIES_KEY, raw),
            Err(err) => error!("failed to encode entries: {err}"),
        }
    }

    fn preference(&self, key: &str) -> Option<String> {
        self.get_item(key).map(str::to_string)
    }

    fn set_preference(&mut self, key: &str, value: &str) {
        self.set_item(key, value);
    }
}

pub async fn load_storage(path: &Path) -> LocalStorage {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(storage) => storage,
            Err(err) => {
                error!("failed to parse storage file: {err}");
                LocalStorage::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => LocalStorage::default(),
        Err(err) => {
            error!("failed to read storage file: {err}");
            LocalStorage::default()
        }
    }
}

pub async fn persist_storage(path: &Path, storage: &LocalStorage) -> Result<(), StorageError> {
    let payload = serde_json::to_vec_pretty(storage)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;

    fn entry(id: i64, mood: &str, note: &str) -> MoodEntry {
        MoodEntry {
            id,
            mood: Mood::from(mood),
            note: note.to_string(),
            date: format!("2026-10-{:02}T12:00:00.000Z", id),
        }
    }

    #[test]
    fn load_on_empty_storage_is_empty() {
        let storage = LocalStorage::default();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn load_ignores_malformed_value() {
        let mut storage = LocalStorage::default();
        storage.set_item(ENTRIES_KEY, "{not json");
        assert!(storage.load().is_empty());

        storage.set_item(ENTRIES_KEY, r#"{"id": 1}"#);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn append_prepends_newest_first() {
        let mut storage = LocalStorage::default();
        storage.append(entry(1, "bad", ""));
        storage.append(entry(2, "good", "walk"));
        storage.append(entry(3, "mystery", "?"));

        let ids: Vec<i64> = storage.load().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn append_over_malformed_value_starts_fresh() {
        let mut storage = LocalStorage::default();
        storage.set_item(ENTRIES_KEY, "garbage");
        storage.append(entry(4, "neutral", ""));
        assert_eq!(storage.load(), vec![entry(4, "neutral", "")]);
    }

    #[test]
    fn serialized_storage_round_trips_entries() {
        let mut storage = LocalStorage::default();
        storage.append(entry(1, "very-bad", "rain"));
        storage.append(entry(2, "very-good", "Great day"));
        storage.set_preference(THEME_KEY, "lavender");

        let raw = serde_json::to_string(&storage).unwrap();
        let restored: LocalStorage = serde_json::from_str(&raw).unwrap();

        assert_eq!(restored.load(), storage.load());
        assert_eq!(restored.preference(THEME_KEY).as_deref(), Some("lavender"));
    }

    #[test]
    fn entries_are_stored_as_plain_json_array() {
        let mut storage = LocalStorage::default();
        storage.append(entry(7, "good", "note"));
        let raw = storage.get_item(ENTRIES_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(value[0]["mood"], "good");
        assert_eq!(value[0]["id"], 7);
    }

    #[tokio::test]
    async fn missing_file_loads_empty_storage() {
        let mut path = std::env::temp_dir();
        path.push(format!("mood_tracker_missing_{}.json", std::process::id()));
        let storage = load_storage(&path).await;
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn persisted_file_loads_back() {
        let mut path = std::env::temp_dir();
        path.push(format!("mood_tracker_persist_{}.json", std::process::id()));

        let mut storage = LocalStorage::default();
        storage.append(entry(5, "good", "persisted"));
        persist_storage(&path, &storage).await.unwrap();

        let restored = load_storage(&path).await;
        assert_eq!(restored, storage);
        let _ = std::fs::remove_file(&path);
    }
}
