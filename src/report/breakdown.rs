use crate::model::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// The summed amount of one category.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: Decimal,
}

/// Groups the transactions of `transaction_type` by category and sums each group.
///
/// The result is sorted by value, largest first; categories with equal values keep the order in
/// which they were first seen. Categories without matching transactions are absent.
pub fn category_breakdown(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for t in transactions
        .iter()
        .filter(|t| t.transaction_type() == transaction_type)
    {
        match index.get(t.category()) {
            Some(&ix) => totals[ix].value += t.amount().value(),
            None => {
                index.insert(t.category(), totals.len());
                totals.push(CategoryTotal {
                    name: t.category().to_string(),
                    value: t.amount().value(),
                });
            }
        }
    }

    totals.sort_by(|a, b| b.value.cmp(&a.value));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::summarize;
    use crate::report::tests::tx;

    fn sample() -> Vec<Transaction> {
        vec![
            tx("1", TransactionType::Expense, "20000", "Makanan", "2024-01-01"),
            tx("2", TransactionType::Expense, "5000", "Transportasi", "2024-01-01"),
            tx("3", TransactionType::Income, "50000", "Gaji", "2024-01-02"),
            tx("4", TransactionType::Expense, "15000", "Makanan", "2024-01-03"),
            tx("5", TransactionType::Expense, "40000", "Sewa", "2024-01-03"),
            tx("6", TransactionType::Income, "7500", "Bonus", "2024-01-04"),
        ]
    }

    #[test]
    fn test_groups_and_sorts_descending() {
        let breakdown = category_breakdown(&sample(), TransactionType::Expense);
        let names: Vec<&str> = breakdown.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Sewa", "Makanan", "Transportasi"]);
        assert_eq!(breakdown[1].value, Decimal::from(35000));
    }

    #[test]
    fn test_breakdowns_sum_to_type_totals() {
        let transactions = sample();
        let summary = summarize(&transactions);
        for t in [TransactionType::Income, TransactionType::Expense] {
            let sum: Decimal = category_breakdown(&transactions, t)
                .iter()
                .map(|c| c.value)
                .sum();
            assert_eq!(sum, summary.total(t));
        }
    }

    #[test]
    fn test_absent_type_yields_no_groups() {
        let only_income = vec![tx("1", TransactionType::Income, "1", "Gaji", "2024-01-01")];
        assert!(category_breakdown(&only_income, TransactionType::Expense).is_empty());
        assert!(category_breakdown(&[], TransactionType::Income).is_empty());
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let transactions = vec![
            tx("1", TransactionType::Expense, "10", "B", "2024-01-01"),
            tx("2", TransactionType::Expense, "10", "A", "2024-01-01"),
        ];
        let breakdown = category_breakdown(&transactions, TransactionType::Expense);
        assert_eq!(breakdown[0].name, "B");
        assert_eq!(breakdown[1].name, "A");
    }

    #[test]
    fn test_same_name_across_types_is_separated() {
        let transactions = vec![
            tx("1", TransactionType::Expense, "10", "Bakery", "2024-01-01"),
            tx("2", TransactionType::Income, "99", "Bakery", "2024-01-01"),
        ];
        let expense = category_breakdown(&transactions, TransactionType::Expense);
        assert_eq!(expense.len(), 1);
        assert_eq!(expense[0].value, Decimal::from(10));
    }
}
