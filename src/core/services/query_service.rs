//! Filtered views over the ledger.

use std::{fmt, str::FromStr};

use crate::core::errors::TrackerError;
use crate::domain::{Transaction, TransactionKind};

/// Type restriction applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Income, TypeFilter::Expense];

    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => transaction.kind == TransactionKind::Income,
            TypeFilter::Expense => transaction.kind == TransactionKind::Expense,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            other => Err(TrackerError::InvalidInput(format!(
                "unknown filter `{}` (use all, income or expense)",
                other
            ))),
        }
    }
}

/// Combined view state: both predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub type_filter: TypeFilter,
    pub search: String,
}

impl TransactionQuery {
    pub fn new(type_filter: TypeFilter, search: impl Into<String>) -> Self {
        Self {
            type_filter,
            search: search.into(),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.type_filter == TypeFilter::All && self.search.is_empty()
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let by_type = QueryService::filter_by_type(transactions, self.type_filter);
        QueryService::filter_by_search(by_type, &self.search)
    }
}

pub struct QueryService;

impl QueryService {
    /// Keeps entries whose type matches `filter`; `All` keeps everything.
    pub fn filter_by_type<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
        filter: TypeFilter,
    ) -> Vec<&'a Transaction> {
        transactions
            .into_iter()
            .filter(|txn| filter.matches(txn))
            .collect()
    }

    /// Case-insensitive substring match on description or category. An empty
    /// term matches every entry.
    pub fn filter_by_search<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
        term: &str,
    ) -> Vec<&'a Transaction> {
        let needle = term.to_lowercase();
        transactions
            .into_iter()
            .filter(|txn| matches_search(txn, &needle))
            .collect()
    }
}

fn matches_search(transaction: &Transaction, needle: &str) -> bool {
    needle.is_empty()
        || transaction.description.to_lowercase().contains(needle)
        || transaction.category.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionInput;
    use chrono::{NaiveDate, Utc};

    fn ledger() -> Vec<Transaction> {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let now = Utc::now();
        vec![
            TransactionInput::new("Salary", "2000", today)
                .kind(TransactionKind::Income)
                .category("other")
                .into_transaction(now)
                .unwrap(),
            TransactionInput::new("Coffee", "4.5", today)
                .into_transaction(now)
                .unwrap(),
            TransactionInput::new("Gym membership", "30", today)
                .category("health")
                .into_transaction(now)
                .unwrap(),
        ]
    }

    fn names(view: &[&Transaction]) -> Vec<String> {
        view.iter().map(|t| t.description.clone()).collect()
    }

    #[test]
    fn all_filter_is_identity() {
        let ledger = ledger();
        assert_eq!(QueryService::filter_by_type(&ledger, TypeFilter::All).len(), 3);
    }

    #[test]
    fn type_filter_keeps_order() {
        let ledger = ledger();
        let expenses = QueryService::filter_by_type(&ledger, TypeFilter::Expense);
        assert_eq!(names(&expenses), vec!["Coffee", "Gym membership"]);
    }

    #[test]
    fn search_matches_description_or_category_ignoring_case() {
        let ledger = ledger();
        assert_eq!(
            names(&QueryService::filter_by_search(&ledger, "COF")),
            vec!["Coffee"]
        );
        assert_eq!(
            names(&QueryService::filter_by_search(&ledger, "heal")),
            vec!["Gym membership"]
        );
        assert_eq!(QueryService::filter_by_search(&ledger, "").len(), 3);
    }

    #[test]
    fn filters_commute() {
        let ledger = ledger();
        for filter in [TypeFilter::All, TypeFilter::Income, TypeFilter::Expense] {
            for term in ["", "o", "food", "xyz", "S"] {
                let type_first = QueryService::filter_by_search(
                    QueryService::filter_by_type(&ledger, filter),
                    term,
                );
                let search_first = QueryService::filter_by_type(
                    QueryService::filter_by_search(&ledger, term),
                    filter,
                );
                assert_eq!(type_first, search_first, "filter={filter} term={term}");
            }
        }
    }

    #[test]
    fn query_combines_both_predicates() {
        let ledger = ledger();
        let query = TransactionQuery::new(TypeFilter::Income, "o");
        assert_eq!(names(&query.apply(&ledger)), vec!["Salary"]);
        assert!(TransactionQuery::default().is_unfiltered());
    }

    #[test]
    fn parses_filter_names() {
        assert_eq!("Income".parse::<TypeFilter>().unwrap(), TypeFilter::Income);
        assert!("transfers".parse::<TypeFilter>().is_err());
    }
}
