pub mod json_backend;
pub mod memory;

use std::{io, sync::Arc};

use thiserror::Error;

use crate::domain::Transaction;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// Storage key holding the serialized ledger.
pub const TRANSACTIONS_KEY: &str = "transactions";

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid storage key `{0}`")]
    InvalidKey(String),
}

/// String key-value store used to persist the ledger.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Loads and saves the full transaction list under [`TRANSACTIONS_KEY`].
pub struct TransactionRepository {
    store: Box<dyn KeyValueStore>,
}

impl TransactionRepository {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads the stored ledger. Absent data is an empty ledger.
    pub fn try_load(&self) -> Result<Vec<Transaction>> {
        match self.store.get(TRANSACTIONS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Reads the stored ledger, treating any failure as "no prior data".
    pub fn load(&self) -> Vec<Transaction> {
        match self.try_load() {
            Ok(transactions) => {
                tracing::debug!(count = transactions.len(), "loaded stored transactions");
                transactions
            }
            Err(err) => {
                tracing::warn!(error = %err, "no usable stored transactions; starting empty");
                Vec::new()
            }
        }
    }

    /// Replaces the stored ledger with `transactions`.
    pub fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string(transactions)?;
        self.store.set(TRANSACTIONS_KEY, &json)
    }
}
