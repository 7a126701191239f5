//! Canonical in-memory ledger with write-through persistence.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::time::Clock;
use crate::domain::{Identifiable, Transaction, TransactionInput};
use crate::storage::{KeyValueStore, TransactionRepository};

/// Owns the ordered transaction list (newest created first) and writes the
/// whole list back to storage after every mutation.
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    repository: TransactionRepository,
    clock: Arc<dyn Clock>,
    synced: bool,
}

impl LedgerStore {
    /// Restores the ledger from `store`. Missing or unreadable data yields an
    /// empty ledger.
    pub fn open(store: Box<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let repository = TransactionRepository::new(store);
        let transactions = repository.load();
        tracing::info!(count = transactions.len(), "ledger opened");
        Self {
            transactions,
            repository,
            clock,
            synced: true,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    /// Whether the last persistence write succeeded.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Records a new transaction at the front of the ledger. Input with a blank
    /// description or an unparsable amount is ignored and yields `None`.
    pub fn add(&mut self, input: TransactionInput) -> Option<Transaction> {
        let Some(transaction) = input.into_transaction(self.clock.now()) else {
            tracing::debug!("ignoring incomplete transaction input");
            return None;
        };
        self.transactions.insert(0, transaction.clone());
        tracing::info!(id = %transaction.id, kind = %transaction.kind, "transaction added");
        self.persist();
        Some(transaction)
    }

    /// Drops every entry carrying `id` and returns how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id() != id);
        let removed = before - self.transactions.len();
        tracing::info!(id, removed, "transaction remove requested");
        self.persist();
        removed
    }

    /// Prepends `records` verbatim, keeping their order. Nothing is validated or
    /// deduplicated, so ids may repeat afterwards.
    pub fn import_records(&mut self, records: Vec<Transaction>) -> usize {
        let count = records.len();
        self.transactions.splice(0..0, records);
        tracing::info!(count, total = self.transactions.len(), "transactions imported");
        self.persist();
        count
    }

    fn persist(&mut self) {
        match self.repository.save(&self.transactions) {
            Ok(()) => self.synced = true,
            Err(err) => {
                self.synced = false;
                tracing::error!(error = %err, "failed to persist transactions");
            }
        }
    }
}
