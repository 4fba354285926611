//! In-memory dataset registry.
//!
//! Datasets are keyed by sequential identifiers (`"1"`, `"2"`, ...) assigned
//! under the registry's write lock, so concurrent ingests never share an id.
//! Identifiers are never reused, even after a dataset has been evicted.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::input::SourceMetadata;
use crate::schema::Table;

/// Metadata about a registered dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    /// Registry identifier.
    pub dataset_id: String,
    /// Where the data came from.
    #[serde(flatten)]
    pub source: SourceMetadata,
    /// When the dataset was registered.
    pub ingested_at: DateTime<Utc>,
}

struct StoredDataset {
    table: Arc<Table>,
    info: DatasetInfo,
}

struct RegistryInner {
    /// Insertion-ordered, so the first entry is the oldest.
    entries: IndexMap<String, StoredDataset>,
    /// Number of datasets ever registered.
    ingested: u64,
}

/// Thread-safe map from dataset id to table.
pub struct DatasetRegistry {
    inner: RwLock<RegistryInner>,
    max_datasets: Option<usize>,
}

impl DatasetRegistry {
    /// Create an unbounded registry.
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// Create a registry that keeps at most `max_datasets` entries, evicting
    /// the oldest on overflow. `None` keeps everything.
    pub fn with_capacity(max_datasets: Option<usize>) -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                entries: IndexMap::new(),
                ingested: 0,
            }),
            max_datasets: max_datasets.map(|m| m.max(1)),
        }
    }

    /// Store a table and return its metadata, including the new id.
    pub fn register(&self, table: Table, source: SourceMetadata) -> DatasetInfo {
        let mut inner = self.write();

        inner.ingested += 1;
        let dataset_id = inner.ingested.to_string();

        if let Some(max) = self.max_datasets {
            while inner.entries.len() >= max {
                if let Some((evicted, _)) = inner.entries.shift_remove_index(0) {
                    tracing::info!(evicted = %evicted, "dataset registry eviction");
                }
            }
        }

        let info = DatasetInfo {
            dataset_id: dataset_id.clone(),
            source,
            ingested_at: Utc::now(),
        };

        inner.entries.insert(
            dataset_id,
            StoredDataset {
                table: Arc::new(table),
                info: info.clone(),
            },
        );

        info
    }

    /// Look up a table by id.
    pub fn get(&self, dataset_id: &str) -> Option<Arc<Table>> {
        self.read()
            .entries
            .get(dataset_id)
            .map(|entry| Arc::clone(&entry.table))
    }

    /// Look up a dataset's metadata by id.
    pub fn info(&self, dataset_id: &str) -> Option<DatasetInfo> {
        self.read()
            .entries
            .get(dataset_id)
            .map(|entry| entry.info.clone())
    }

    /// Ids of the datasets currently held, oldest first.
    pub fn dataset_ids(&self) -> Vec<String> {
        self.read().entries.keys().cloned().collect()
    }

    /// Number of datasets currently held.
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave the map half-updated, so
    // poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
