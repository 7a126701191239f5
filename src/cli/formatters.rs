use crate::domain::Transaction;

/// Amount and label formatting driven by the configured currency symbol.
#[derive(Debug, Clone)]
pub struct CliFormatters {
    currency_symbol: String,
}

impl CliFormatters {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    /// `$12.50`; negative values keep their sign after the symbol.
    pub fn amount(&self, value: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, value)
    }

    /// `+$12.50` for income, `-$12.50` for expenses.
    pub fn signed_amount(&self, transaction: &Transaction) -> String {
        format!(
            "{}{}{:.2}",
            transaction.kind.sign(),
            self.currency_symbol,
            transaction.amount
        )
    }

    pub fn date(&self, transaction: &Transaction) -> String {
        match transaction.date.as_str() {
            "" => "no date".to_string(),
            date => date.to_string(),
        }
    }

    /// One listing row, numbered from 1.
    pub fn row(&self, index: usize, transaction: &Transaction) -> String {
        format!(
            "#{:<3} {:<24} {:<8} {} • {}  {:>12}  ({})",
            index,
            transaction.description,
            transaction.kind.as_str(),
            capitalize(&transaction.category),
            self.date(transaction),
            self.signed_amount(transaction),
            transaction.id.short()
        )
    }
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TransactionInput, TransactionKind};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample(kind: TransactionKind) -> Transaction {
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        TransactionInput::new("Coffee", "4.5", today)
            .kind(kind)
            .category("food")
            .into_transaction(Utc.with_ymd_and_hms(2024, 7, 4, 9, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn signs_follow_the_kind() {
        let fmt = CliFormatters::new("$");
        assert_eq!(fmt.signed_amount(&sample(TransactionKind::Expense)), "-$4.50");
        assert_eq!(fmt.signed_amount(&sample(TransactionKind::Income)), "+$4.50");
    }

    #[test]
    fn negative_balance_keeps_symbol_first() {
        assert_eq!(CliFormatters::new("€").amount(-3.0), "€-3.00");
    }

    #[test]
    fn rows_show_capitalized_category() {
        let row = CliFormatters::new("$").row(1, &sample(TransactionKind::Expense));
        assert!(row.starts_with("#1"));
        assert!(row.contains("Food • 2024-07-04"));
        assert!(row.contains("-$4.50"));
    }

    #[test]
    fn undated_rows_say_so() {
        let txn: Transaction = serde_json::from_str(
            r#"{"id":1,"description":"Cash","amount":5,"type":"income","category":"other","date":""}"#,
        )
        .unwrap();
        assert!(CliFormatters::new("$").row(1, &txn).contains("Other • no date"));
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("transport"), "Transport");
    }
}
