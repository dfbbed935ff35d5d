use routelog_core::HistoryRecord;
use uuid::Uuid;

use crate::backend::StorageBackend;
use crate::error::StoreError;

/// Fixed storage key. The version suffix is the only migration mechanism:
/// bumping it starts a fresh history and orphans the old blob.
pub const STORAGE_KEY: &str = "routelog.history.v1";

/// In-memory history, newest first, mirrored to a [`StorageBackend`].
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
    records: Vec<HistoryRecord>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Reads the persisted history once.
    ///
    /// A blob that cannot be read or parsed is logged at `warn` and replaced by
    /// an empty history; startup is never blocked on it.
    pub fn load(backend: impl StorageBackend + 'static) -> Self {
        let records = match read_records(&backend) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    key = STORAGE_KEY,
                    error = %e,
                    "could not load history, starting empty"
                );
                Vec::new()
            }
        };
        tracing::debug!(count = records.len(), "history loaded");
        Self {
            backend: Box::new(backend),
            records,
        }
    }

    /// Serializes the full collection and overwrites the stored blob.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] or [`StoreError::Write`]; the
    /// in-memory collection is untouched either way.
    pub fn save(&self) -> Result<(), StoreError> {
        let blob = serialize_records(&self.records)?;
        self.backend.set(STORAGE_KEY, &blob)
    }

    /// Prepends `record` and persists.
    ///
    /// # Errors
    ///
    /// Returns the [`save`](Self::save) error. The record stays in memory.
    pub fn append(&mut self, record: HistoryRecord) -> Result<(), StoreError> {
        self.records.insert(0, record);
        self.save()
    }

    /// Drops the record with `id` and persists. Returns `false` when no record
    /// matched, in which case nothing is written.
    ///
    /// # Errors
    ///
    /// Returns the [`save`](Self::save) error. The removal stays in effect in memory.
    pub fn remove(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Most recent record for the route, compared case-insensitively.
    #[must_use]
    pub fn find_cached(&self, origin: &str, destination: &str) -> Option<&HistoryRecord> {
        self.records
            .iter()
            .find(|r| r.matches_route(origin, destination))
    }

    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records of one week in store order.
    pub fn records_in_week<'a>(
        &'a self,
        week_key: &'a str,
    ) -> impl Iterator<Item = &'a HistoryRecord> + 'a {
        self.records.iter().filter(move |r| r.week_key == week_key)
    }

    /// Distinct week keys present in the history, latest week first.
    #[must_use]
    pub fn week_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.records.iter().map(|r| r.week_key.clone()).collect();
        keys.sort_unstable_by(|a, b| b.cmp(a));
        keys.dedup();
        keys
    }
}

fn read_records(backend: &dyn StorageBackend) -> Result<Vec<HistoryRecord>, StoreError> {
    match backend.get(STORAGE_KEY)? {
        Some(blob) => deserialize_records(&blob),
        None => Ok(Vec::new()),
    }
}

/// # Errors
///
/// Returns [`StoreError::Serialize`] if a record cannot be encoded.
pub fn serialize_records(records: &[HistoryRecord]) -> Result<String, StoreError> {
    serde_json::to_string(records).map_err(StoreError::Serialize)
}

/// # Errors
///
/// Returns [`StoreError::Corrupt`] if `blob` is not a JSON array of records.
pub fn deserialize_records(blob: &str) -> Result<Vec<HistoryRecord>, StoreError> {
    serde_json::from_str(blob).map_err(StoreError::Corrupt)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
