use crate::model::{Transaction, TransactionType};
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// The number of days covered by the weekly trend, ending today.
pub const TREND_DAYS: u64 = 7;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Income and expense sums for one calendar day.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Short label such as `17 Agu`.
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Computes one point per day for the `TREND_DAYS` days ending at `today` (inclusive), oldest
/// first. Days without transactions carry zero sums.
pub fn weekly_trend(transactions: &[Transaction], today: NaiveDate) -> Vec<TrendPoint> {
    (0..TREND_DAYS)
        .rev()
        .map(|back| {
            let date = today.checked_sub_days(Days::new(back)).unwrap_or(today);
            let (income, expense) = transactions
                .iter()
                .filter(|t| t.day() == date)
                .fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), t| {
                    match t.transaction_type() {
                        TransactionType::Income => (income + t.amount().value(), expense),
                        TransactionType::Expense => (income, expense + t.amount().value()),
                    }
                });
            TrendPoint {
                date,
                label: short_label(date),
                income,
                expense,
            }
        })
        .collect()
}

/// Formats `date` as day and short Indonesian month, e.g. `2 Jan`.
pub fn short_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS[date.month0() as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{day, tx};

    #[test]
    fn test_always_seven_points_even_when_empty() {
        let points = weekly_trend(&[], day("2024-03-10"));
        assert_eq!(points.len(), 7);
        assert!(points
            .iter()
            .all(|p| p.income.is_zero() && p.expense.is_zero()));
        assert_eq!(points[0].date, day("2024-03-04"));
        assert_eq!(points[6].date, day("2024-03-10"));
    }

    #[test]
    fn test_buckets_by_calendar_day() {
        let transactions = vec![
            tx("1", TransactionType::Income, "50000", "Gaji", "2024-03-10"),
            tx("2", TransactionType::Expense, "20000", "Makanan", "2024-03-10"),
            tx("3", TransactionType::Expense, "5000", "Makanan", "2024-03-10"),
            tx("4", TransactionType::Expense, "1000", "Makanan", "2024-03-08"),
            // Outside the window on both sides.
            tx("5", TransactionType::Income, "999", "Gaji", "2024-03-03"),
            tx("6", TransactionType::Income, "999", "Gaji", "2024-03-11"),
        ];
        let points = weekly_trend(&transactions, day("2024-03-10"));
        assert_eq!(points.len(), 7);
        let last = &points[6];
        assert_eq!(last.income, Decimal::from(50000));
        assert_eq!(last.expense, Decimal::from(25000));
        assert_eq!(points[4].date, day("2024-03-08"));
        assert_eq!(points[4].expense, Decimal::from(1000));
        let total_income: Decimal = points.iter().map(|p| p.income).sum();
        assert_eq!(total_income, Decimal::from(50000));
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let points = weekly_trend(&[], day("2024-03-02"));
        assert_eq!(points[0].date, day("2024-02-25"));
        assert_eq!(points[0].label, "25 Feb");
        assert_eq!(points[6].label, "2 Mar");
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label(day("2024-08-17")), "17 Agu");
        assert_eq!(short_label(day("2024-05-01")), "1 Mei");
        assert_eq!(short_label(day("2024-12-25")), "25 Des");
    }
}
