//! JSON-file backend for offline use.
//!
//! The whole history lives in one JSON array on disk. Loaded eagerly at
//! construction; every save rewrites the file. Query semantics are shared
//! with [`MemoryHistoryStore`](crate::MemoryHistoryStore).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::memory::page_records;
use crate::record::HistoryRecord;
use crate::traits::{HistoryPage, HistoryQuery, HistoryStore};

/// A history store persisted to a single JSON file.
pub struct FileHistoryStore {
    path: PathBuf,
    records: Mutex<Vec<HistoryRecord>>,
}

impl FileHistoryStore {
    /// Open (or create) a file-backed store. A missing file is an empty
    /// history; a present file must hold a JSON array of records.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let records = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| StorageError::Backend(format!("read {}: {}", path.display(), e)))?;
            serde_json::from_str(&raw)
                .map_err(|e| StorageError::Backend(format!("parse {}: {}", path.display(), e)))?
        } else {
            Vec::new()
        };
        Ok(FileHistoryStore {
            path,
            records: Mutex::new(records),
        })
    }

    fn write_all(&self, records: &[HistoryRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::Backend(format!("serialize history: {e}")))?;
        std::fs::write(&self.path, json)
            .map_err(|e| StorageError::Backend(format!("write {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn save(&self, record: HistoryRecord) -> Result<(), StorageError> {
        let mut records = self.records.lock().expect("history lock");
        records.push(record);
        self.write_all(&records)
    }

    async fn list(&self, query: &HistoryQuery) -> Result<HistoryPage, StorageError> {
        let records = self.records.lock().expect("history lock").clone();
        Ok(page_records(records, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafetal_core::{compute, FarmSurvey};

    fn record(fecha: &str) -> HistoryRecord {
        let survey = FarmSurvey {
            area_cultivada: 2.0,
            produccion_verde: 900.0,
            ..FarmSurvey::default()
        };
        let assessment = compute(&survey).unwrap();
        HistoryRecord::new(survey, &assessment, fecha.to_string())
    }

    #[tokio::test]
    async fn saves_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = FileHistoryStore::open(&path).unwrap();
        store.save(record("2026-08-05T10:00:00Z")).await.unwrap();
        store.save(record("2026-08-06T10:00:00Z")).await.unwrap();

        let reopened = FileHistoryStore::open(&path).unwrap();
        let page = reopened.list(&HistoryQuery::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].fecha, "2026-08-06T10:00:00Z");
    }

    #[tokio::test]
    async fn missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileHistoryStore::open(dir.path().join("none.json")).unwrap();
        let page = store.list(&HistoryQuery::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn corrupt_file_reports_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileHistoryStore::open(&path),
            Err(StorageError::Backend(_))
        ));
    }
}
