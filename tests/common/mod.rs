#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fee_ledger::{
    core::LedgerStore,
    domain::StudentDraft,
    storage::json_backend::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for one test.
pub fn setup_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().join("data");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a store over `dir`, returning it with the load warnings.
pub fn open_store(dir: &PathBuf) -> (LedgerStore, Vec<String>) {
    let storage = JsonFileStore::new(dir.clone()).expect("create json file store");
    let (store, report) = LedgerStore::open(Box::new(storage));
    (store, report.warnings)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 11, 0, 0).unwrap()
}

pub fn draft(name: &str, phone: &str, class_name: &str, admission: NaiveDate, fee: f64) -> StudentDraft {
    StudentDraft::new(name, phone, class_name, Some(admission), fee)
}
