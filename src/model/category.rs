use crate::model::TransactionType;
use crate::Result;
use anyhow::bail;
use serde::{Deserialize, Serialize};

/// The business units used as categories by the default configuration.
const DEFAULT_CATEGORIES: &[&str] = &[
    "Menjahit",
    "Doorsmeer",
    "Pangkas",
    "Greenhouse",
    "Kantor",
    "Las",
    "Bakery",
    "Laundry",
    "Tenun",
    "Pertanian LT",
    "Meubel",
    "Miniatur",
];

/// Maps each `TransactionType` to the list of categories an entry of that type may use.
///
/// This is deployment data held in `config.json`, for example:
/// ```json
/// {
///   "INCOME": ["Gaji", "Bonus"],
///   "EXPENSE": ["Makanan", "Transportasi"]
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Categories {
    #[serde(rename = "INCOME")]
    income: Vec<String>,
    #[serde(rename = "EXPENSE")]
    expense: Vec<String>,
}

impl Default for Categories {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES.to_vec(), DEFAULT_CATEGORIES.to_vec())
    }
}

impl Categories {
    pub fn new<S>(
        income: impl IntoIterator<Item = S>,
        expense: impl IntoIterator<Item = S>,
    ) -> Self
    where
        S: Into<String>,
    {
        Self {
            income: income.into_iter().map(Into::into).collect(),
            expense: expense.into_iter().map(Into::into).collect(),
        }
    }

    /// The categories allowed for `transaction_type`, in configured order.
    pub fn for_type(&self, transaction_type: TransactionType) -> &[String] {
        match transaction_type {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
        }
    }

    pub fn contains(&self, transaction_type: TransactionType, category: &str) -> bool {
        self.for_type(transaction_type)
            .iter()
            .any(|c| c == category)
    }

    /// Fails unless `category` is allowed for `transaction_type`.
    pub fn check(&self, transaction_type: TransactionType, category: &str) -> Result<()> {
        if self.contains(transaction_type, category) {
            return Ok(());
        }
        bail!(
            "Category '{category}' is not allowed for {} transactions. Allowed categories: {}",
            transaction_type.label(),
            self.for_type(transaction_type).join(", ")
        )
    }
}
