#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use txn_tracker::{
    core::{
        time::{Clock, FixedClock},
        LedgerStore,
    },
    domain::{TransactionInput, TransactionKind},
    storage::JsonFileStore,
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// 2024-07-04 10:00 UTC.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 7, 4, 10, 0, 0).unwrap()))
}

/// A ledger persisted as JSON files under `root`.
pub fn open_ledger(root: &PathBuf) -> LedgerStore {
    let store = JsonFileStore::new(root.clone()).expect("create json file store");
    LedgerStore::open(Box::new(store), fixed_clock())
}

/// An isolated on-disk ledger plus its storage root.
pub fn setup_test_env() -> (LedgerStore, PathBuf) {
    let root = test_dir().join("data");
    (open_ledger(&root), root)
}

/// Coffee (expense, food, 4.50), Salary (income, other, 2000) and Bus
/// (expense, transport, 2.75), added in that order.
pub fn seed(store: &mut LedgerStore) {
    let today = store.today();
    store.add(TransactionInput::new("Coffee", "4.50", today));
    store.add(
        TransactionInput::new("Salary", "2000", today)
            .kind(TransactionKind::Income)
            .category("other"),
    );
    store.add(TransactionInput::new("Bus", "2.75", today).category("transport"));
}
