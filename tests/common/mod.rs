#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::NaiveDate;
use invoice_ledger::{
    core::{FixedClock, LedgerStore},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

/// Fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Store backed by a JSON file in its own temporary directory.
pub fn setup_json_store() -> (LedgerStore, PathBuf) {
    let path = temp_base().join("invoices.json");
    (open_store(&path), path)
}

pub fn open_store(path: &Path) -> LedgerStore {
    LedgerStore::with_clock(
        Box::new(JsonStorage::new(path.to_path_buf())),
        Arc::new(FixedClock(fixed_date())),
    )
}
