use serde::Serialize;

use crate::domain::{Transaction, TransactionKind};

/// Income, expense and balance over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums amounts by type in a single pass. Recomputed on every call.
    pub fn aggregate<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
        let (income, expense) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                    TransactionKind::Income => (income + txn.amount, expense),
                    TransactionKind::Expense => (income, expense + txn.amount),
                });
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }
}
