use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::core::errors::TrackerError;
use crate::domain::common::{Displayable, Identifiable};

/// Opaque transaction identifier. Generated ids are UUID v4 strings; imported
/// ids are kept exactly as they appear in the document; numeric ids are
/// stored in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scalar_text(deserializer).map(Self)
    }
}

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used by listings.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Calendar date as recorded. Dates entered here are `YYYY-MM-DD`; imported
/// values are kept as written, including an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionDate(String);

impl TransactionDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }
}

impl From<NaiveDate> for TransactionDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TransactionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scalar_text(deserializer).map(Self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

/// Accepts a JSON string or number and keeps its text.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(Scalar::into_text)
}

fn optional_scalar_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(TrackerError::InvalidInput(format!(
                "unknown transaction type `{}` (use income or expense)",
                other
            ))),
        }
    }
}

/// Categories offered when recording a transaction. Stored transactions keep the
/// category as free-form text, so imported values outside this list survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Utilities,
    Entertainment,
    Shopping,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Health,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| {
                TrackerError::InvalidInput(format!(
                    "unknown category `{}` (use one of: {})",
                    value.trim(),
                    Category::ALL.map(|c| c.as_str()).join(", ")
                ))
            })
    }
}

/// A single income or expense record. Only the fields the ledger computes
/// with are strictly typed; `id`, `date` and `timestamp` keep whatever text
/// the record carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: TransactionDate,
    /// Creation instant in RFC 3339 UTC. Absent on some imported records.
    #[serde(
        default,
        deserialize_with = "optional_scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        self.id.as_str()
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} ({} {}{:.2}, {})",
            self.description,
            self.kind,
            self.kind.sign(),
            self.amount,
            self.date
        )
    }
}

/// Raw form values for a new transaction. The amount stays textual until the
/// transaction is created so that unparsable input can be rejected there.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub description: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
}

impl TransactionInput {
    /// Blank form: expense, food, dated `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            kind: TransactionKind::default(),
            category: Category::default().as_str().to_string(),
            date: today,
        }
    }

    pub fn new(description: impl Into<String>, amount: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            ..Self::blank(today)
        }
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Parsed amount, if the text is a finite number.
    pub fn parsed_amount(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Builds the transaction, assigning a fresh id and `timestamp`. Returns
    /// `None` when the description is blank or the amount does not parse.
    pub fn into_transaction(self, timestamp: DateTime<Utc>) -> Option<Transaction> {
        if self.description.trim().is_empty() {
            return None;
        }
        let amount = self.parsed_amount()?;
        Some(Transaction {
            id: TransactionId::generate(),
            description: self.description,
            amount,
            kind: self.kind,
            category: self.category,
            date: self.date.into(),
            timestamp: Some(timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        })
    }
}
