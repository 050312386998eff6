//! Pure aggregations over the ledger: totals, per-category breakdowns, the weekly trend and
//! chronological ordering. None of these mutate or persist anything.

mod breakdown;
mod summary;
mod trend;

pub use breakdown::{category_breakdown, CategoryTotal};
pub use summary::{summarize, FinancialSummary};
pub use trend::{short_label, weekly_trend, TrendPoint, TREND_DAYS};

use crate::model::Transaction;

/// Orders transactions by date, newest first. Transactions with the same date keep their
/// relative order.
pub fn sort_by_date_desc(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{parse_entry_date, Amount, TransactionType};
    use chrono::NaiveDate;
    use std::str::FromStr;

    /// Builds a transaction without category validation.
    pub(crate) fn tx(
        id: &str,
        transaction_type: TransactionType,
        amount: &str,
        category: &str,
        date: &str,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: parse_entry_date(date).unwrap(),
            amount: Amount::from_str(amount).unwrap(),
            category: category.to_string(),
            description: String::new(),
            transaction_type,
        }
    }

    pub(crate) fn day(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[test]
    fn test_sort_by_date_desc() {
        let transactions = vec![
            tx("a", TransactionType::Expense, "1", "X", "2024-01-01"),
            tx("b", TransactionType::Income, "1", "X", "2024-01-03"),
            tx("c", TransactionType::Expense, "1", "X", "2024-01-02"),
        ];
        let ids: Vec<&str> = sort_by_date_desc(&transactions)
            .into_iter()
            .map(|t| t.id())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let transactions = vec![
            tx("first", TransactionType::Expense, "1", "X", "2024-01-02"),
            tx("older", TransactionType::Expense, "1", "X", "2024-01-01"),
            tx("second", TransactionType::Income, "1", "X", "2024-01-02"),
            tx("third", TransactionType::Expense, "1", "X", "2024-01-02"),
        ];
        let ids: Vec<&str> = sort_by_date_desc(&transactions)
            .into_iter()
            .map(|t| t.id())
            .collect();
        assert_eq!(ids, vec!["first", "second", "third", "older"]);
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let transactions = vec![
            tx("a", TransactionType::Expense, "1", "X", "2024-01-01"),
            tx("b", TransactionType::Expense, "1", "X", "2024-01-05"),
        ];
        let _ = sort_by_date_desc(&transactions);
        assert_eq!(transactions[0].id(), "a");
    }
}
