mod common;

use std::fs;

use assert_fs::prelude::*;
use chrono::NaiveDate;
use regex::Regex;
use txn_tracker::core::errors::TrackerError;
use txn_tracker::core::services::{ExchangeError, ExchangeService};
use txn_tracker::core::LedgerStore;
use txn_tracker::storage::MemoryStore;

use common::{fixed_clock, seed, setup_test_env};

const BACKUP: &str = r#"[
  {"id":"1720087200000","description":"Coffee","amount":4.5,"type":"expense","category":"food","date":"2024-07-04","timestamp":"2024-07-04T10:00:00Z"},
  {"id":"1720000800000","description":"Salary","amount":2000.0,"type":"income","category":"other","date":"2024-07-03","timestamp":"2024-07-03T10:00:00Z"}
]"#;

fn memory_ledger() -> LedgerStore {
    LedgerStore::open(Box::new(MemoryStore::new()), fixed_clock())
}

#[test]
fn export_document_layout() {
    let mut store = memory_ledger();
    ExchangeService::import_into(&mut store, BACKUP).unwrap();
    let document = ExchangeService::export(store.transactions(), store.today()).unwrap();

    assert_eq!(document.file_name, "transactions_2024-07-04.json");
    insta::assert_snapshot!(document.contents, @r#"
    [
      {
        "id": "1720087200000",
        "description": "Coffee",
        "amount": 4.5,
        "type": "expense",
        "category": "food",
        "date": "2024-07-04",
        "timestamp": "2024-07-04T10:00:00Z"
      },
      {
        "id": "1720000800000",
        "description": "Salary",
        "amount": 2000.0,
        "type": "income",
        "category": "other",
        "date": "2024-07-03",
        "timestamp": "2024-07-03T10:00:00Z"
      }
    ]
    "#);
}

#[test]
fn export_writes_a_dated_file() {
    let (mut store, _) = setup_test_env();
    seed(&mut store);
    let dir = assert_fs::TempDir::new().unwrap();

    let document = ExchangeService::export(store.transactions(), store.today()).unwrap();
    let path = document.write_to(dir.path()).unwrap();

    let name_pattern = Regex::new(r"^transactions_\d{4}-\d{2}-\d{2}\.json$").unwrap();
    let file_name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name_pattern.is_match(&file_name));
    dir.child(&file_name).assert(predicates::path::exists());

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(ExchangeService::parse_import(&written).unwrap(), store.transactions());
}

#[test]
fn exported_file_restores_an_empty_ledger() {
    let (mut source, _) = setup_test_env();
    seed(&mut source);
    let dir = assert_fs::TempDir::new().unwrap();
    let path = ExchangeService::export(source.transactions(), source.today())
        .unwrap()
        .write_to(dir.path())
        .unwrap();

    let (mut target, _) = setup_test_env();
    let imported = ExchangeService::import_file(&mut target, &path).unwrap();
    assert_eq!(imported, 3);
    assert_eq!(target.transactions(), source.transactions());
}

#[test]
fn import_prepends_to_existing_entries() {
    let (mut store, _) = setup_test_env();
    seed(&mut store);
    ExchangeService::import_into(&mut store, BACKUP).unwrap();
    let order: Vec<&str> = store
        .transactions()
        .iter()
        .map(|txn| txn.description.as_str())
        .collect();
    assert_eq!(order, vec!["Coffee", "Salary", "Bus", "Salary", "Coffee"]);
    assert_eq!(
        store.transactions()[1].date.as_naive(),
        NaiveDate::from_ymd_opt(2024, 7, 3)
    );
}

#[test]
fn loose_records_from_older_backups_are_accepted() {
    let cases = [
        (
            "without timestamp",
            r#"[{"id":"1720087200000","description":"Coffee","amount":4.5,"type":"expense","category":"food","date":"2024-07-04"}]"#,
        ),
        (
            "cleared date",
            r#"[{"id":"1720087200000","description":"Coffee","amount":4.5,"type":"expense","category":"food","date":"","timestamp":"2024-07-04T10:00:00.000Z"}]"#,
        ),
        (
            "numeric id",
            r#"[{"id":1720087200000,"description":"Coffee","amount":4.5,"type":"expense","category":"food","date":"2024-07-04","timestamp":"2024-07-04T10:00:00.000Z"}]"#,
        ),
    ];
    for (label, document) in cases {
        let mut store = memory_ledger();
        let count = ExchangeService::import_into(&mut store, document).unwrap();
        assert_eq!(count, 1, "{label}");
        let txn = &store.transactions()[0];
        assert_eq!(txn.id.as_str(), "1720087200000", "{label}");
        assert_eq!(txn.description, "Coffee", "{label}");
    }
}

#[test]
fn loose_records_export_as_they_came_in() {
    let mut store = memory_ledger();
    ExchangeService::import_into(
        &mut store,
        r#"[{"id":7,"description":"Cash gift","amount":50,"type":"income","category":"gifts","date":""}]"#,
    )
    .unwrap();
    let document = ExchangeService::export(store.transactions(), store.today()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&document.contents).unwrap();
    assert_eq!(value[0]["id"], "7");
    assert_eq!(value[0]["date"], "");
    assert!(value[0].get("timestamp").is_none());
}

#[test]
fn malformed_files_are_rejected_without_changes() {
    let (mut store, _) = setup_test_env();
    seed(&mut store);
    let before = store.transactions().to_vec();
    let dir = assert_fs::TempDir::new().unwrap();

    let cases = [
        ("not_json.json", "this is not json"),
        ("object.json", r#"{"transactions": []}"#),
        ("bad_type.json", r#"[{"id":"1","description":"X","amount":1,"type":"refund","category":"food","date":"2024-07-04","timestamp":"2024-07-04T10:00:00Z"}]"#),
    ];
    for (name, contents) in cases {
        let file = dir.child(name);
        file.write_str(contents).unwrap();
        let err = ExchangeService::import_file(&mut store, file.path()).unwrap_err();
        assert!(matches!(err, ExchangeError::Parse(_)), "{name}");
        assert!(err
            .to_string()
            .starts_with("Error importing file. Please check the file format."));
    }
    assert_eq!(store.transactions(), before.as_slice());
}

#[test]
fn missing_import_file_is_a_read_error() {
    let mut store = memory_ledger();
    let dir = assert_fs::TempDir::new().unwrap();
    let err = ExchangeService::import_file(&mut store, &dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ExchangeError::Read(_)));
    assert!(matches!(TrackerError::from(err), TrackerError::ImportError(_)));
}

#[test]
fn empty_ledger_export_is_refused() {
    let store = memory_ledger();
    let err = ExchangeService::export(store.transactions(), store.today()).unwrap_err();
    assert!(matches!(TrackerError::from(err), TrackerError::ExportError(_)));
}
