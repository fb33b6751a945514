//! JSON snapshot cache storage
//!
//! The whole cache is one file holding both partitions. A snapshot that
//! cannot be parsed is deleted and the run starts cold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use super::Partition;
use crate::client::{VALIDATOR_HEADERS, validator_from};
use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// One cached response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredEntry", into = "StoredEntry")]
pub struct CacheEntry {
    /// Decoded response body
    pub payload: Value,

    /// ETag sent by the server, if any
    pub validator: Option<String>,

    /// Last time this entry was fetched or revalidated
    pub retrieved_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(payload: Value, validator: Option<String>, retrieved_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            validator,
            retrieved_at,
        }
    }

    /// Age of the entry at `now`. Timestamps in the future count as zero.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.retrieved_at).to_std().unwrap_or(Duration::ZERO)
    }

    /// Whether the entry can be served without asking the server
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age(now) < window
    }
}

/// On-disk layout of an entry
#[derive(Serialize, Deserialize)]
struct StoredEntry {
    response: Value,
    #[serde(default)]
    headers: BTreeMap<String, Option<String>>,
    #[serde(alias = "retrieved_at")]
    got_at: DateTime<Utc>,
}

impl From<StoredEntry> for CacheEntry {
    fn from(stored: StoredEntry) -> Self {
        let validator = validator_from(|name| stored.headers.get(name).cloned().flatten());
        Self {
            payload: stored.response,
            validator,
            retrieved_at: stored.got_at,
        }
    }
}

impl From<CacheEntry> for StoredEntry {
    fn from(entry: CacheEntry) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(VALIDATOR_HEADERS[0].to_string(), entry.validator);
        Self {
            response: entry.payload,
            headers,
            got_at: entry.retrieved_at,
        }
    }
}

/// In-memory response cache with snapshot persistence.
///
/// Single owner, no locking.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CacheStore {
    #[serde(rename = "all_teams", default)]
    team_pages: BTreeMap<String, CacheEntry>,

    #[serde(rename = "team_awards", default)]
    team_awards: BTreeMap<String, CacheEntry>,
}

impl CacheStore {
    /// Create a store hydrated from the snapshot at `path`
    pub fn open(path: &Path) -> Self {
        let mut store = Self::default();
        store.load(path);
        store
    }

    fn partition(&self, partition: Partition) -> &BTreeMap<String, CacheEntry> {
        match partition {
            Partition::TeamPages => &self.team_pages,
            Partition::TeamAwards => &self.team_awards,
        }
    }

    fn partition_mut(&mut self, partition: Partition) -> &mut BTreeMap<String, CacheEntry> {
        match partition {
            Partition::TeamPages => &mut self.team_pages,
            Partition::TeamAwards => &mut self.team_awards,
        }
    }

    /// Look up an entry
    pub fn get(&self, partition: Partition, key: &str) -> Option<&CacheEntry> {
        self.partition(partition).get(key)
    }

    /// Store an entry, replacing any previous one for `key`.
    ///
    /// `retrieved_at` never moves backwards for a key.
    pub fn put(&mut self, partition: Partition, key: &str, mut entry: CacheEntry) {
        let map = self.partition_mut(partition);
        if let Some(existing) = map.get(key)
            && existing.retrieved_at > entry.retrieved_at
        {
            entry.retrieved_at = existing.retrieved_at;
        }
        map.insert(key.to_string(), entry);
    }

    /// Number of entries in one partition
    pub fn partition_len(&self, partition: Partition) -> usize {
        self.partition(partition).len()
    }

    /// Total entries across partitions
    pub fn len(&self) -> usize {
        Partition::ALL.iter().map(|p| self.partition_len(*p)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the contents with the snapshot at `path`.
    ///
    /// A missing file leaves the store empty. A file that does not parse is
    /// deleted and the store is left empty.
    pub fn load(&mut self, path: &Path) {
        *self = Self::default();

        let contents = match std::fs::read(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No cache snapshot at {}", path.display());
                return;
            }
            Err(e) => {
                log::warn!("Failed to read cache snapshot {}: {}", path.display(), e);
                return;
            }
        };

        match serde_json::from_slice::<CacheStore>(&contents) {
            Ok(store) => {
                *self = store;
                log::info!(
                    "Loaded {} team pages and {} team award lists from {}",
                    self.team_pages.len(),
                    self.team_awards.len(),
                    path.display()
                );
            }
            Err(e) => {
                log::warn!(
                    "Corrupted cache snapshot {} ({}), deleting it",
                    path.display(),
                    e
                );
                if let Err(e) = std::fs::remove_file(path) {
                    log::warn!("Failed to delete cache snapshot {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Write both partitions to `path` as one snapshot.
    ///
    /// The file is written beside the target and renamed into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;
        }

        let json = serde_json::to_vec_pretty(self)?;

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = std::path::PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, json)
            .map_err(|e| CacheError::Io(format!("Failed to write cache snapshot: {}", e)))?;
        std::fs::rename(&tmp_path, path)
            .map_err(|e| CacheError::Io(format!("Failed to replace cache snapshot: {}", e)))?;

        log::debug!("Saved {} cache entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Remove every entry
    pub fn clear_all(&mut self) -> ClearStats {
        let entries_removed = self.len();
        self.team_pages.clear();
        self.team_awards.clear();
        ClearStats { entries_removed }
    }

    /// Per-partition statistics relative to `now`
    pub fn stats(&self, now: DateTime<Utc>, window: Duration) -> Vec<PartitionStats> {
        Partition::ALL
            .iter()
            .map(|&partition| {
                let entries = self.partition(partition);
                let fresh = entries
                    .values()
                    .filter(|e| e.is_fresh(now, window))
                    .count();
                PartitionStats {
                    partition,
                    total_entries: entries.len(),
                    fresh_entries: fresh,
                    stale_entries: entries.len() - fresh,
                    with_validator: entries.values().filter(|e| e.validator.is_some()).count(),
                    oldest_entry: entries.values().map(|e| e.retrieved_at).min(),
                    newest_entry: entries.values().map(|e| e.retrieved_at).max(),
                }
            })
            .collect()
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about one cache partition
#[derive(Debug)]
pub struct PartitionStats {
    pub partition: Partition,
    pub total_entries: usize,
    pub fresh_entries: usize,
    pub stale_entries: usize,
    pub with_validator: usize,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
}
