//! Durable alert storage.
//!
//! The monitor only needs an append-only collection, so the backend hides
//! behind [`AlertStore`]. Insert failures are the caller's problem to log
//! and swallow — the tick loop must keep running.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::alert::AlertRecord;

/// Alert persistence failure.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "alert store io error: {err}"),
            Self::Serialize(err) => write!(f, "alert record serialization failed: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

/// Append-only collection of alert records.
pub trait AlertStore: Send + Sync {
    fn insert(&self, record: &AlertRecord) -> Result<(), StoreError>;
}

/// In-memory store. Default wiring and test double.
#[derive(Default)]
pub struct MemoryAlertStore {
    records: Mutex<Vec<AlertRecord>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything inserted so far, in insert order.
    pub fn records(&self) -> Vec<AlertRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl AlertStore for MemoryAlertStore {
    fn insert(&self, record: &AlertRecord) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// File-backed store: one JSON object per line, flushed per insert.
pub struct JsonlAlertStore {
    file: Mutex<File>,
}

impl JsonlAlertStore {
    /// Open (or create) the alert log for appending.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AlertStore for JsonlAlertStore {
    fn insert(&self, record: &AlertRecord) -> Result<(), StoreError> {
        let line = serde_json::to_string(record)?;
        let mut file = self.file.lock().unwrap();
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(waktu: i64, pesan: &str) -> AlertRecord {
        AlertRecord {
            waktu,
            cpu: 95.0,
            suhu: 85.0,
            pesan: pesan.to_string(),
        }
    }

    #[test]
    fn memory_store_keeps_insert_order() {
        let store = MemoryAlertStore::new();
        store.insert(&record(1, "a")).unwrap();
        store.insert(&record(2, "b")).unwrap();
        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].waktu, 1);
        assert_eq!(records[1].pesan, "b");
    }

    #[test]
    fn jsonl_store_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.jsonl");
        let store = JsonlAlertStore::open(&path).unwrap();
        store.insert(&record(10, "CPU tinggi: 95.0%")).unwrap();
        store.insert(&record(20, "Suhu tinggi: 85.0°C")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: AlertRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.waktu, 10);
        assert_eq!(first.pesan, "CPU tinggi: 95.0%");
    }

    #[test]
    fn jsonl_store_appends_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.jsonl");
        {
            let store = JsonlAlertStore::open(&path).unwrap();
            store.insert(&record(1, "a")).unwrap();
        }
        {
            let store = JsonlAlertStore::open(&path).unwrap();
            store.insert(&record(2, "b")).unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
