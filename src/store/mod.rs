//! Record persistence
//!
//! [`RecordStore`] is the seam to whatever holds downloaded records between
//! runs. [`JsonFileStore`] keeps them in a single JSON file beneath the
//! working directory (`repeaterbook.json`), keyed by (state id, repeater id).

use crate::constants::store::STORE_FILE_NAME;
use crate::error::{Error, Result};
use crate::record::{Record, RecordKey};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage for canonical records
pub trait RecordStore {
    /// Insert or replace records by key, returning how many were written
    fn populate(&mut self, records: Vec<Record>) -> Result<usize>;

    /// Records matching the predicate, in key order
    fn query(&self, predicate: &dyn Fn(&Record) -> bool) -> Result<Vec<Record>>;

    /// Number of stored records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Records persisted as a JSON array
#[derive(Debug)]
pub struct JsonFileStore {
    records: BTreeMap<RecordKey, Record>,
    path: PathBuf,
}

impl JsonFileStore {
    /// Store file path beneath a working directory
    pub fn path_in(working_dir: impl AsRef<Path>) -> PathBuf {
        working_dir.as_ref().join(STORE_FILE_NAME)
    }

    /// Load the store in `working_dir`, empty if it does not exist yet
    pub fn open(working_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_from(Self::path_in(working_dir))
    }

    /// Load a store from a specific file
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let records: Vec<Record> = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Store(format!("Failed to read {}: {}", path.display(), e)))?;
            serde_json::from_str(&content)
                .map_err(|e| Error::Store(format!("Failed to parse {}: {}", path.display(), e)))?
        } else {
            Vec::new()
        };

        Ok(Self {
            records: records.into_iter().map(|r| (r.key(), r)).collect(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store to disk through a temporary file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Store(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let records: Vec<&Record> = self.records.values().collect();
        let content = serde_json::to_vec_pretty(&records)?;

        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, content)
            .map_err(|e| Error::Store(format!("Failed to write {}: {}", temp.display(), e)))?;
        fs::rename(&temp, &self.path).map_err(|e| {
            Error::Store(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), records = records.len(), "Saved record store");
        Ok(())
    }

    /// Look up one record by key
    pub fn get(&self, key: &RecordKey) -> Option<&Record> {
        self.records.get(key)
    }
}

impl RecordStore for JsonFileStore {
    fn populate(&mut self, records: Vec<Record>) -> Result<usize> {
        let written = records.len();
        for record in records {
            self.records.insert(record.key(), record);
        }
        self.save()?;
        Ok(written)
    }

    fn query(&self, predicate: &dyn Fn(&Record) -> bool) -> Result<Vec<Record>> {
        Ok(self
            .records
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::{band_filter, Bands};
    use crate::record::tests::sample_record;
    use tempfile::TempDir;

    fn record(state_id: &str, id: u64, frequency: f64) -> Record {
        let mut record = sample_record();
        record.state_id = state_id.to_string();
        record.repeater_id = id;
        record.frequency = frequency;
        record
    }

    #[test]
    fn test_open_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::open(tmp.path()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.path(), tmp.path().join("repeaterbook.json"));
    }

    #[test]
    fn test_populate_upserts_by_key() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(tmp.path()).unwrap();

        store
            .populate(vec![record("06", 1, 146.94), record("06", 2, 442.1)])
            .unwrap();
        assert_eq!(store.len(), 2);

        let mut updated = record("06", 1, 146.94);
        updated.callsign = Some("K6NEW".to_string());
        store.populate(vec![updated, record("48", 1, 147.0)]).unwrap();

        assert_eq!(store.len(), 3);
        let key = ("06".to_string(), 1);
        assert_eq!(store.get(&key).unwrap().callsign.as_deref(), Some("K6NEW"));
    }

    #[test]
    fn test_persists_between_opens() {
        let tmp = TempDir::new().unwrap();
        {
            let mut store = JsonFileStore::open(tmp.path()).unwrap();
            store.populate(vec![record("06", 1, 146.94)]).unwrap();
        }

        let store = JsonFileStore::open(tmp.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(!tmp.path().join("repeaterbook.json.tmp").exists());
    }

    #[test]
    fn test_query_with_predicate() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(tmp.path()).unwrap();
        store
            .populate(vec![
                record("06", 1, 146.94),
                record("06", 2, 442.1),
                record("06", 3, 147.3),
            ])
            .unwrap();

        let two_meters = [Bands::M2.band()];
        let matches = band_filter(&two_meters);
        let ids: Vec<u64> = store
            .query(&matches)
            .unwrap()
            .iter()
            .map(|r| r.repeater_id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        assert_eq!(store.query(&|_| true).unwrap().len(), 3);
    }

    #[test]
    fn test_corrupt_file_is_store_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("repeaterbook.json"), "not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(tmp.path()),
            Err(Error::Store(_))
        ));
    }
}
