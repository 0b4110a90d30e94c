use crate::error::StoreError;
use crate::store::Store;
use crate::types::{Booking, Slot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tracing::warn;

const SLOTS_FILE: &str = "slots.json";
const BOOKINGS_FILE: &str = "bookings.json";
const PRICE_FILE: &str = "price.txt";

/// Flat-file store: one JSON array per collection plus a plain-text price
/// file, all under a single data directory. Writes go through a temp file in
/// the same directory and an atomic rename, so a crash mid-save never leaves
/// a half-written collection behind.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Records are decoded one by one so a single malformed row is skipped
    /// with a warning instead of poisoning the whole collection. A file that
    /// is not a JSON array at all is reported as corrupt.
    fn read_records<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value(row) {
                Ok(record) => records.push(record),
                Err(err) => warn!(file, %err, "skipping malformed record"),
            }
        }
        Ok(records)
    }

    fn write_records<T: Serialize>(&self, file: &str, records: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        self.write_atomic(file, json.as_bytes())
    }

    fn write_atomic(&self, file: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.persist(self.dir.join(file))
            .map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}

impl Store for FileStore {
    fn load_slots(&self) -> Result<Vec<Slot>, StoreError> {
        self.read_records(SLOTS_FILE)
    }

    fn save_slots(&self, slots: &[Slot]) -> Result<(), StoreError> {
        self.write_records(SLOTS_FILE, slots)
    }

    fn load_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.read_records(BOOKINGS_FILE)
    }

    fn save_bookings(&self, bookings: &[Booking]) -> Result<(), StoreError> {
        self.write_records(BOOKINGS_FILE, bookings)
    }

    fn load_price_text(&self) -> Result<String, StoreError> {
        match fs::read_to_string(self.dir.join(PRICE_FILE)) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save_price_text(&self, text: &str) -> Result<(), StoreError> {
        self.write_atomic(PRICE_FILE, text.as_bytes())
    }
}
