use crate::model::{format_currency, Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Totals derived from the ledger. Never persisted.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

/// Sums income and expense in a single pass. `balance` is `total_income - total_expense`.
pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
    let (total_income, total_expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), t| match t.transaction_type() {
            TransactionType::Income => (income + t.amount().value(), expense),
            TransactionType::Expense => (income, expense + t.amount().value()),
        },
    );
    FinancialSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

impl FinancialSummary {
    /// The total for one transaction type.
    pub fn total(&self, transaction_type: TransactionType) -> Decimal {
        match transaction_type {
            TransactionType::Income => self.total_income,
            TransactionType::Expense => self.total_expense,
        }
    }
}

impl Display for FinancialSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Saldo : {}", format_currency(self.balance))?;
        writeln!(f, "Pemasukan   : {}", format_currency(self.total_income))?;
        write!(f, "Pengeluaran : {}", format_currency(self.total_expense))
    }
}
