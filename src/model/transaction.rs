use crate::model::{Amount, Categories};
use crate::Result;
use anyhow::{ensure, Context};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whether a transaction adds to or subtracts from the balance.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

impl TransactionType {
    /// The user-facing label, e.g. `Pemasukan` for income.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Pemasukan",
            TransactionType::Expense => "Pengeluaran",
        }
    }

    /// The short code used in the analysis payload.
    pub fn code(&self) -> &'static str {
        match self {
            TransactionType::Income => "IN",
            TransactionType::Expense => "OUT",
        }
    }

    /// The sign character used when listing transactions.
    pub fn sign(&self) -> char {
        match self {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        }
    }
}

/// One recorded income or expense event.
///
/// The serialized form matches the objects held in the ledger's storage key:
/// ```json
/// {
///   "id": "6f1c…",
///   "date": "2024-01-02T00:00:00Z",
///   "amount": 50000,
///   "category": "Bakery",
///   "description": "",
///   "type": "INCOME"
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub(crate) id: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
}

impl Transaction {
    /// Gives `entry` its identity. Only the `Ledger` assigns ids.
    pub(crate) fn from_new(id: impl Into<String>, entry: NewTransaction) -> Self {
        Self {
            id: id.into(),
            date: entry.date,
            amount: entry.amount,
            category: entry.category,
            description: entry.description,
            transaction_type: entry.transaction_type,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// The calendar date (UTC) on which the transaction falls.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }
}

/// A validated entry that has not yet been added to the ledger, i.e. it has no id.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewTransaction {
    transaction_type: TransactionType,
    amount: Amount,
    category: String,
    date: DateTime<Utc>,
    description: String,
}

impl NewTransaction {
    /// Validates the entry the way the entry form does before submission.
    ///
    /// # Errors
    /// - Returns an error if `category` is empty or is not allowed for `transaction_type`.
    pub fn new(
        transaction_type: TransactionType,
        amount: Amount,
        category: impl Into<String>,
        date: DateTime<Utc>,
        description: impl Into<String>,
        categories: &Categories,
    ) -> Result<Self> {
        let category = category.into();
        ensure!(!category.trim().is_empty(), "A category is required");
        categories.check(transaction_type, &category)?;
        Ok(Self {
            transaction_type,
            amount,
            category,
            date,
            description: description.into(),
        })
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Parses a `YYYY-MM-DD` date as midnight UTC.
pub fn parse_entry_date(s: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::from_str(s.trim())
        .with_context(|| format!("Invalid date '{s}', expected YYYY-MM-DD"))?;
    Ok(day_start(day))
}

/// Returns the instant at which `day` begins in UTC.
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}
