//! Command handlers for the fintrack CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod analyze;
mod delete;
mod export;
mod init;
mod list;
mod report;

use crate::model::Transaction;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

pub use add::add;
pub use analyze::analyze;
pub use delete::{delete, prompt_confirmation, DeleteOutcome, CONFIRM_DELETE};
pub use export::export;
pub use init::init;
pub use list::list;
pub use report::{breakdown, categories, dashboard, summary, trend, Dashboard};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        println!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// One line of a transaction listing, e.g.
/// `2024-01-02  + Rp 50.000  Bakery  roti tawar  [6f1c…]`.
pub(crate) fn transaction_line(t: &Transaction) -> String {
    let mut line = format!(
        "{}  {} {}  {}",
        t.day().format("%Y-%m-%d"),
        t.transaction_type().sign(),
        t.amount().to_currency(),
        t.category()
    );
    if !t.description().is_empty() {
        line.push_str("  ");
        line.push_str(t.description());
    }
    line.push_str(&format!("  [{}]", t.id()));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;
    use crate::report::tests::tx;

    #[test]
    fn test_transaction_line() {
        let mut t = tx("abc", TransactionType::Income, "50000", "Bakery", "2024-01-02");
        assert_eq!(
            transaction_line(&t),
            "2024-01-02  + Rp 50.000  Bakery  [abc]"
        );
        t.description = "roti".to_string();
        t.transaction_type = TransactionType::Expense;
        assert_eq!(
            transaction_line(&t),
            "2024-01-02  - Rp 50.000  Bakery  roti  [abc]"
        );
    }

    #[test]
    fn test_out_from_message() {
        let out: Out<()> = "done".into();
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());
    }
}
