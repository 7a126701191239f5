//! JSON export and import of the whole ledger.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::ledger_store::LedgerStore;
use crate::domain::Transaction;

const EXPORT_PREFIX: &str = "transactions";
const EXPORT_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("there are no transactions to export")]
    EmptyLedger,
    #[error("could not encode transactions: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not write export file: {0}")]
    Write(#[source] io::Error),
    #[error("could not read import file: {0}")]
    Read(#[source] io::Error),
    #[error("Error importing file. Please check the file format. ({0})")]
    Parse(#[source] serde_json::Error),
}

/// A rendered export, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub contents: String,
}

impl ExportDocument {
    /// Writes the document into `dir` and returns the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExchangeError> {
        fs::create_dir_all(dir).map_err(ExchangeError::Write)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.contents).map_err(ExchangeError::Write)?;
        tracing::info!(path = %path.display(), "export written");
        Ok(path)
    }
}

pub struct ExchangeService;

impl ExchangeService {
    /// `transactions_<YYYY-MM-DD>.json`
    pub fn export_file_name(today: NaiveDate) -> String {
        format!(
            "{}_{}.{}",
            EXPORT_PREFIX,
            today.format("%Y-%m-%d"),
            EXPORT_EXTENSION
        )
    }

    /// Renders the full ledger as 2-space indented JSON. An empty ledger has
    /// nothing to export.
    pub fn export(
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Result<ExportDocument, ExchangeError> {
        if transactions.is_empty() {
            return Err(ExchangeError::EmptyLedger);
        }
        let contents = serde_json::to_string_pretty(transactions).map_err(ExchangeError::Encode)?;
        Ok(ExportDocument {
            file_name: Self::export_file_name(today),
            contents,
        })
    }

    /// Parses a JSON array of transactions. Records are taken as they are.
    pub fn parse_import(text: &str) -> Result<Vec<Transaction>, ExchangeError> {
        serde_json::from_str(text).map_err(ExchangeError::Parse)
    }

    /// Parses `text` and prepends the records to the ledger. On a parse error
    /// the ledger is left untouched.
    pub fn import_into(store: &mut LedgerStore, text: &str) -> Result<usize, ExchangeError> {
        let records = Self::parse_import(text).map_err(|err| {
            tracing::warn!(error = %err, "import rejected");
            err
        })?;
        Ok(store.import_records(records))
    }

    pub fn import_file(store: &mut LedgerStore, path: &Path) -> Result<usize, ExchangeError> {
        let text = fs::read_to_string(path).map_err(ExchangeError::Read)?;
        Self::import_into(store, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::{Clock, FixedClock};
    use crate::domain::{TransactionInput, TransactionKind};
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn store() -> LedgerStore {
        let clock: Arc<dyn Clock> =
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 7, 4, 10, 0, 0).unwrap()));
        LedgerStore::open(Box::new(MemoryStore::new()), clock)
    }

    fn seeded() -> LedgerStore {
        let mut store = store();
        let today = store.today();
        store.add(TransactionInput::new("Coffee", "4.5", today));
        store.add(TransactionInput::new("Salary", "2000", today).kind(TransactionKind::Income));
        store
    }

    #[test]
    fn export_name_uses_the_date() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(
            ExchangeService::export_file_name(today),
            "transactions_2024-07-04.json"
        );
    }

    #[test]
    fn export_is_pretty_printed_with_two_spaces() {
        let store = seeded();
        let doc = ExchangeService::export(store.transactions(), store.today()).unwrap();
        assert!(doc.contents.starts_with("[\n  {\n    \"id\""));
    }

    #[test]
    fn empty_ledger_cannot_be_exported() {
        let store = store();
        let err = ExchangeService::export(store.transactions(), store.today()).unwrap_err();
        assert!(matches!(err, ExchangeError::EmptyLedger));
    }

    #[test]
    fn export_then_import_into_empty_ledger_reproduces_entries() {
        let source = seeded();
        let doc = ExchangeService::export(source.transactions(), source.today()).unwrap();

        let mut target = store();
        let count = ExchangeService::import_into(&mut target, &doc.contents).unwrap();
        assert_eq!(count, 2);
        assert_eq!(target.transactions(), source.transactions());
    }

    #[test]
    fn importing_twice_duplicates_entries() {
        let source = seeded();
        let doc = ExchangeService::export(source.transactions(), source.today()).unwrap();
        let mut target = store();
        ExchangeService::import_into(&mut target, &doc.contents).unwrap();
        ExchangeService::import_into(&mut target, &doc.contents).unwrap();
        assert_eq!(target.len(), 4);
        assert_eq!(target.transactions()[0].id, target.transactions()[2].id);
    }

    #[test]
    fn invalid_document_leaves_ledger_unchanged() {
        let mut target = seeded();
        let before = target.transactions().to_vec();
        for bad in ["not json", "{\"id\": \"1\"}", "[{\"description\": 3}]"] {
            let err = ExchangeService::import_into(&mut target, bad).unwrap_err();
            assert!(matches!(err, ExchangeError::Parse(_)));
        }
        assert_eq!(target.transactions(), before.as_slice());
    }
}
