//! Hit Store
//!
//! Owns the ordered list of hits and its local-storage mirror:
//! - Load: read the `hits` entry once (missing entry = empty store)
//! - Mutate: append one hit, append an imported batch, or clear all
//! - Save: rewrite the whole entry after every mutation
//! - Close: flush only if an earlier save failed
//!
//! The entry is written to a temporary file in the data directory and renamed
//! over the old one, so a crash mid-write leaves the previous contents intact.

use crate::storage::error::StoreResult;
use crate::storage::types::{Hit, StoreState, DEFAULT_TIME_FORMAT};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Local storage key holding the serialized hit list
pub const HITS_KEY: &str = "hits";

/// Configuration for the hit store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the local storage entries
    pub data_dir: PathBuf,
    /// strftime-style format for newly recorded timestamps
    pub time_format: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("hitdash_data"),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Builder method: set the timestamp format
    pub fn time_format(mut self, time_format: impl Into<String>) -> Self {
        self.time_format = time_format.into();
        self
    }

    /// Get path to a local storage entry
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Get path to the hits entry
    pub fn hits_path(&self) -> PathBuf {
        self.entry_path(HITS_KEY)
    }
}

/// The session's hit store
#[derive(Debug)]
pub struct HitStore {
    config: StoreConfig,
    hits: Vec<Hit>,
    /// In-memory hits differ from the persisted entry
    dirty: bool,
}

impl HitStore {
    /// Load the store from its persisted entry
    pub fn load(config: StoreConfig) -> StoreResult<Self> {
        let path = config.hits_path();

        let hits: Vec<Hit> = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };

        tracing::debug!(path = ?path, count = hits.len(), "Loaded hits");

        Ok(Self {
            config,
            hits,
            dirty: false,
        })
    }

    /// Rewrite the persisted entry with the current hits
    pub fn save(&mut self) -> StoreResult<()> {
        let path = self.config.hits_path();
        write_atomic(&path, &serde_json::to_vec(&self.hits)?)?;
        self.dirty = false;

        tracing::debug!(path = ?path, count = self.hits.len(), "Saved hits");
        Ok(())
    }

    /// Release the store, retrying the save if the last one failed
    pub fn close(mut self) -> StoreResult<()> {
        if self.dirty {
            self.save()?;
        }
        tracing::debug!(count = self.hits.len(), "Closed hit store");
        Ok(())
    }

    /// Whether a mutation has not reached the persisted entry yet
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// All hits in insertion order
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Current lifecycle state
    pub fn state(&self) -> StoreState {
        if self.hits.is_empty() {
            StoreState::Empty
        } else {
            StoreState::Populated
        }
    }

    /// Record a hit stamped with the current local time.
    ///
    /// Returns `None` without touching the store when either field is empty.
    pub fn record(&mut self, name: &str, url: &str) -> StoreResult<Option<&Hit>> {
        if !is_recordable(name, url) {
            return Ok(None);
        }
        let hit = Hit::now(name, url, &self.config.time_format);
        self.push(hit)
    }

    /// Record a hit with an explicit display timestamp
    pub fn record_at(&mut self, name: &str, url: &str, time: &str) -> StoreResult<Option<&Hit>> {
        if !is_recordable(name, url) {
            return Ok(None);
        }
        self.push(Hit::new(name, url, time))
    }

    /// Append a batch of hits, skipping any without a name or URL.
    ///
    /// Persists once at the end and returns how many were appended.
    pub fn extend(&mut self, hits: impl IntoIterator<Item = Hit>) -> StoreResult<usize> {
        let before = self.hits.len();
        self.hits
            .extend(hits.into_iter().filter(|h| is_recordable(h.name(), h.url())));
        let added = self.hits.len() - before;

        if added > 0 {
            self.dirty = true;
            self.save()?;
            tracing::info!(added, total = self.hits.len(), "Appended hits");
        }
        Ok(added)
    }

    /// Remove every hit. Returns how many were removed.
    pub fn clear(&mut self) -> StoreResult<usize> {
        let removed = self.hits.len();
        self.hits.clear();
        self.dirty = true;
        self.save()?;

        tracing::info!(removed, "Cleared all hits");
        Ok(removed)
    }

    fn push(&mut self, hit: Hit) -> StoreResult<Option<&Hit>> {
        tracing::info!(name = %hit.name(), url = %hit.url(), time = %hit.time(), "Recorded hit");
        self.hits.push(hit);
        self.dirty = true;
        self.save()?;
        Ok(self.hits.last())
    }
}

fn is_recordable(name: &str, url: &str) -> bool {
    !name.is_empty() && !url.is_empty()
}

/// Write `content` to `path` through a temporary file and rename
fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_store() -> (HitStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = HitStore::load(StoreConfig::new(dir.path())).unwrap();
        (store, dir)
    }

    #[test]
    fn test_missing_entry_loads_empty() {
        let (store, _dir) = create_test_store();
        assert!(store.is_empty());
        assert_eq!(store.state(), StoreState::Empty);
    }

    #[test]
    fn test_record_requires_name_and_url() {
        let (mut store, dir) = create_test_store();
        store.record_at("A", "http://x", "1/1/2024, 10:00:00 AM").unwrap();

        assert!(store.record("", "http://y").unwrap().is_none());
        assert!(store.record("B", "").unwrap().is_none());
        assert!(store.record("", "").unwrap().is_none());

        assert_eq!(store.len(), 1);
        let reloaded = HitStore::load(StoreConfig::new(dir.path())).unwrap();
        assert_eq!(reloaded.hits(), store.hits());
    }

    #[test]
    fn test_record_appends_last() {
        let (mut store, _dir) = create_test_store();
        store.record_at("A", "http://x", "1/1/2024, 10:00:00 AM").unwrap();
        store.record_at("B", "http://y", "1/1/2024, 11:00:00 AM").unwrap();

        let recorded = store.record("C", "http://z").unwrap().cloned().unwrap();
        assert_eq!(recorded.name(), "C");
        assert_eq!(recorded.url(), "http://z");

        let names: Vec<_> = store.hits().iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(store.state(), StoreState::Populated);
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        let (mut store, _dir) = create_test_store();
        assert!(store.record(" ", " ").unwrap().is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempdir().unwrap();
        {
            let mut store = HitStore::load(StoreConfig::new(dir.path())).unwrap();
            store.record_at("A", "http://x", "1/1/2024, 10:00:00 AM").unwrap();
            store.record_at("A", "http://x", "1/1/2024, 10:00:00 AM").unwrap();
            store.close().unwrap();
        }

        let store = HitStore::load(StoreConfig::new(dir.path())).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.hits()[0], store.hits()[1]);
    }

    #[test]
    fn test_persisted_entry_is_json_array() {
        let (mut store, dir) = create_test_store();
        store.record_at("A", "http://x", "1/1/2024, 10:00:00 AM").unwrap();

        let content = std::fs::read_to_string(dir.path().join("hits.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"name": "A", "url": "http://x", "time": "1/1/2024, 10:00:00 AM"}])
        );
    }

    #[test]
    fn test_clear_empties_store() {
        let (mut store, dir) = create_test_store();
        for i in 0..5 {
            store.record_at(&format!("user{}", i), "http://x", "t").unwrap();
        }

        assert_eq!(store.clear().unwrap(), 5);
        assert!(store.is_empty());
        assert_eq!(store.clear().unwrap(), 0);

        let reloaded = HitStore::load(StoreConfig::new(dir.path())).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_extend_skips_incomplete_hits() {
        let (mut store, _dir) = create_test_store();
        let added = store
            .extend(vec![
                Hit::new("A", "http://x", "t1"),
                Hit::new("", "http://x", "t2"),
                Hit::new("B", "", "t3"),
                Hit::new("C", "http://y", "t4"),
            ])
            .unwrap();

        assert_eq!(added, 2);
        let times: Vec<_> = store.hits().iter().map(|h| h.time()).collect();
        assert_eq!(times, vec!["t1", "t4"]);
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("hits.json"), "not json").unwrap();

        let result = HitStore::load(StoreConfig::new(dir.path()));
        assert!(matches!(
            result,
            Err(crate::storage::StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_close_without_pending_changes_does_not_write() {
        let (mut store, dir) = create_test_store();
        store.record_at("A", "http://x", "t").unwrap();
        assert!(!store.has_unsaved_changes());

        let path = dir.path().join("hits.json");
        std::fs::remove_file(&path).unwrap();

        store.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_save_leaves_pending_changes() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let mut store = HitStore::load(StoreConfig::new(blocker.join("data"))).unwrap();
        assert!(store.record_at("A", "http://x", "t").is_err());

        assert_eq!(store.len(), 1);
        assert!(store.has_unsaved_changes());
        assert!(store.close().is_err());
    }

    #[test]
    fn test_custom_time_format() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path()).time_format("%Y-%m-%d");
        let mut store = HitStore::load(config).unwrap();

        let hit = store.record("A", "http://x").unwrap().cloned().unwrap();
        assert_eq!(hit.time().len(), 10);
        assert_eq!(hit.day(), hit.time());
    }
}
